//! Type descriptors: a base type plus its resolved generic arguments.
//!
//! `BaseType` is the closed type universe the engine reasons about:
//!   • built-ins form a fixed lattice (numerics under `Number`, `List`/`Set`
//!     under `Iterable`, everything under `Object`)
//!   • user classes form a single-inheritance chain through `ClassType`
//!   • arrays carry their component type, so `i32[]` and `string[]` differ
//!
//! `TypeDescriptor` adds ordered generic arguments on top, recursively, so
//! `map<string, list<i64>>` is representable. Descriptors have value
//! semantics: equality is structural and is the "same type" check.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

// ─── Class identity ───────────────────────────────────────────────────────────

/// Identity of a user-defined structural type.
///
/// Only the name takes part in equality and hashing. The parent chain and the
/// declared type parameters ride along so assignability and generic
/// substitution need no catalog lookup.
#[derive(Clone)]
pub struct ClassType {
    name:        &'static str,
    parent:      Option<Arc<ClassType>>,
    type_params: &'static [&'static str],
}

impl ClassType {
    pub fn new(name: &'static str) -> Self {
        Self { name, parent: None, type_params: &[] }
    }

    pub fn extending(mut self, parent: &ClassType) -> Self {
        self.parent = Some(Arc::new(parent.clone()));
        self
    }

    /// Declare generic type parameters, e.g. `&["K", "V"]`.
    pub fn with_type_params(mut self, params: &'static [&'static str]) -> Self {
        self.type_params = params;
        self
    }

    pub fn name(&self) -> &'static str { self.name }

    pub fn parent(&self) -> Option<&ClassType> { self.parent.as_deref() }

    pub fn type_params(&self) -> &'static [&'static str] { self.type_params }

    /// `true` if `self` is `other` or one of its descendants.
    pub fn is_subclass_of(&self, other: &ClassType) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if class == other {
                return true;
            }
            current = class.parent();
        }
        false
    }
}

impl PartialEq for ClassType {
    fn eq(&self, other: &Self) -> bool { self.name == other.name }
}

impl Eq for ClassType {}

impl Hash for ClassType {
    fn hash<H: Hasher>(&self, state: &mut H) { self.name.hash(state); }
}

impl fmt::Debug for ClassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassType({})", self.name)
    }
}

// ─── Enum identity ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct EnumType {
    name:     &'static str,
    variants: &'static [&'static str],
}

impl EnumType {
    pub fn new(name: &'static str, variants: &'static [&'static str]) -> Self {
        Self { name, variants }
    }

    pub fn name(&self) -> &'static str { self.name }

    pub fn variants(&self) -> &'static [&'static str] { self.variants }

    /// Exact, case-sensitive variant lookup.
    pub fn variant(&self, name: &str) -> Option<&'static str> {
        self.variants.iter().copied().find(|v| *v == name)
    }
}

impl PartialEq for EnumType {
    fn eq(&self, other: &Self) -> bool { self.name == other.name }
}

impl Eq for EnumType {}

impl Hash for EnumType {
    fn hash<H: Hasher>(&self, state: &mut H) { self.name.hash(state); }
}

impl fmt::Debug for EnumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EnumType({})", self.name)
    }
}

// ─── Base type ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BaseType {
    /// Universal root; every type is assignable to it.
    Object,
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    /// Abstract supertype of the six numeric types.
    Number,
    Str,
    Instant,
    /// Array with its component type.
    Array(Box<BaseType>),
    Iterable,
    List,
    Set,
    Map,
    Enum(EnumType),
    Class(ClassType),
}

impl BaseType {
    pub fn array_of(component: BaseType) -> Self {
        BaseType::Array(Box::new(component))
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, BaseType::I8 | BaseType::I16 | BaseType::I32 | BaseType::I64 | BaseType::F32 | BaseType::F64)
    }

    pub fn is_array(&self) -> bool { matches!(self, BaseType::Array(_)) }

    /// Subtype relation: `true` if a value of `other` may be stored where
    /// `self` is expected.
    pub fn is_assignable_from(&self, other: &BaseType) -> bool {
        if self == other {
            return true;
        }
        match (self, other) {
            (BaseType::Object, _)                            => true,
            (BaseType::Number, o)                            => o.is_numeric(),
            (BaseType::Iterable, BaseType::List | BaseType::Set) => true,
            (BaseType::Array(a), BaseType::Array(b))         => a.is_assignable_from(b),
            (BaseType::Class(a), BaseType::Class(b))         => b.is_subclass_of(a),
            _ => false,
        }
    }

    /// Direct supertype. `None` only for `Object`.
    pub fn supertype(&self) -> Option<BaseType> {
        match self {
            BaseType::Object => None,
            t if t.is_numeric() => Some(BaseType::Number),
            BaseType::List | BaseType::Set => Some(BaseType::Iterable),
            BaseType::Class(c) => Some(c.parent().map_or(BaseType::Object, |p| BaseType::Class(p.clone()))),
            _ => Some(BaseType::Object),
        }
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseType::Object    => f.write_str("object"),
            BaseType::Bool      => f.write_str("bool"),
            BaseType::Char      => f.write_str("char"),
            BaseType::I8        => f.write_str("i8"),
            BaseType::I16       => f.write_str("i16"),
            BaseType::I32       => f.write_str("i32"),
            BaseType::I64       => f.write_str("i64"),
            BaseType::F32       => f.write_str("f32"),
            BaseType::F64       => f.write_str("f64"),
            BaseType::Number    => f.write_str("number"),
            BaseType::Str       => f.write_str("string"),
            BaseType::Instant   => f.write_str("instant"),
            BaseType::Array(c)  => write!(f, "{c}[]"),
            BaseType::Iterable  => f.write_str("iterable"),
            BaseType::List      => f.write_str("list"),
            BaseType::Set       => f.write_str("set"),
            BaseType::Map       => f.write_str("map"),
            BaseType::Enum(e)   => f.write_str(e.name()),
            BaseType::Class(c)  => f.write_str(c.name()),
        }
    }
}

// ─── Descriptor ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    base: BaseType,
    args: Vec<TypeDescriptor>,
}

impl TypeDescriptor {
    pub fn of(base: BaseType) -> Self {
        Self { base, args: Vec::new() }
    }

    pub fn with_args(base: BaseType, args: Vec<TypeDescriptor>) -> Self {
        Self { base, args }
    }

    pub fn object() -> Self { Self::of(BaseType::Object) }

    pub fn class(class: &ClassType) -> Self { Self::of(BaseType::Class(class.clone())) }

    /// `T[]`. The element descriptor is kept as the single argument.
    pub fn array_of(element: TypeDescriptor) -> Self {
        Self::with_args(BaseType::array_of(element.base.clone()), vec![element])
    }

    pub fn list_of(element: TypeDescriptor) -> Self {
        Self::with_args(BaseType::List, vec![element])
    }

    pub fn set_of(element: TypeDescriptor) -> Self {
        Self::with_args(BaseType::Set, vec![element])
    }

    pub fn map_of(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        Self::with_args(BaseType::Map, vec![key, value])
    }

    pub fn base(&self) -> &BaseType { &self.base }

    pub fn args(&self) -> &[TypeDescriptor] { &self.args }

    pub fn arg(&self, index: usize) -> Option<&TypeDescriptor> { self.args.get(index) }

    /// Generic argument `index`, erased to `object` when undeclared.
    pub fn arg_or_object(&self, index: usize) -> TypeDescriptor {
        self.arg(index).cloned().unwrap_or_else(Self::object)
    }

    /// Arrays only count as parameterized when their element is.
    pub fn is_parameterized(&self) -> bool {
        match self.args.first() {
            None => false,
            Some(element) if self.base.is_array() => element.is_parameterized(),
            Some(_) => true,
        }
    }

    pub fn is_same_type(&self, other: &TypeDescriptor) -> bool { self == other }

    /// Base-type subtyping only; generic arguments are the caller's business.
    pub fn is_assignable_from(&self, other: &TypeDescriptor) -> bool {
        self.base.is_assignable_from(&other.base)
    }

    pub fn is_assignable_to(&self, other: &TypeDescriptor) -> bool {
        other.is_assignable_from(self)
    }

    /// Generic-aware assignability: base types are assignable and `self` is
    /// either raw or its arguments pairwise accept `other`'s.
    pub fn accepts(&self, other: &TypeDescriptor) -> bool {
        if !self.is_assignable_from(other) {
            return false;
        }
        self.args.is_empty()
            || (self.args.len() == other.args.len()
                && self.args.iter().zip(&other.args).all(|(a, b)| a.accepts(b)))
    }
}

impl From<BaseType> for TypeDescriptor {
    fn from(base: BaseType) -> Self { Self::of(base) }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.base.is_array() || self.args.is_empty() {
            return write!(f, "{}", self.base);
        }
        write!(f, "{}<", self.base)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(">")
    }
}

// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> ClassType { ClassType::new("Base") }
    fn sub() -> ClassType { ClassType::new("Sub").extending(&base()) }

    #[test]
    fn numerics_sit_under_number() {
        assert!(BaseType::Number.is_assignable_from(&BaseType::I32));
        assert!(BaseType::Object.is_assignable_from(&BaseType::Number));
        assert!(!BaseType::I32.is_assignable_from(&BaseType::I64));
        assert!(!BaseType::Number.is_assignable_from(&BaseType::Str));
    }

    #[test]
    fn class_chain_is_walked() {
        let b = BaseType::Class(base());
        let s = BaseType::Class(sub());
        assert!(b.is_assignable_from(&s));
        assert!(!s.is_assignable_from(&b));
        assert_eq!(s.supertype(), Some(b.clone()));
        assert_eq!(b.supertype(), Some(BaseType::Object));
    }

    #[test]
    fn arrays_are_covariant_in_component() {
        let numbers = BaseType::array_of(BaseType::Number);
        assert!(numbers.is_assignable_from(&BaseType::array_of(BaseType::I16)));
        assert!(!BaseType::array_of(BaseType::Str).is_assignable_from(&BaseType::array_of(BaseType::I16)));
    }

    #[test]
    fn array_of_plain_element_is_not_parameterized() {
        let strings = TypeDescriptor::array_of(BaseType::Str.into());
        assert!(!strings.is_parameterized());
        let lists = TypeDescriptor::array_of(TypeDescriptor::list_of(BaseType::I32.into()));
        assert!(lists.is_parameterized());
        assert!(TypeDescriptor::list_of(BaseType::I32.into()).is_parameterized());
        assert!(!TypeDescriptor::of(BaseType::List).is_parameterized());
    }

    #[test]
    fn equality_is_structural() {
        let a = TypeDescriptor::map_of(BaseType::Str.into(), TypeDescriptor::list_of(BaseType::I64.into()));
        let b = TypeDescriptor::map_of(BaseType::Str.into(), TypeDescriptor::list_of(BaseType::I64.into()));
        let c = TypeDescriptor::map_of(BaseType::Str.into(), TypeDescriptor::list_of(BaseType::I32.into()));
        assert!(a.is_same_type(&b));
        assert!(!a.is_same_type(&c));
        assert_eq!(a.to_string(), "map<string, list<i64>>");
    }

    #[test]
    fn accepts_compares_arguments_covariantly() {
        let raw = TypeDescriptor::of(BaseType::Iterable);
        let numbers = TypeDescriptor::list_of(BaseType::Number.into());
        let ints = TypeDescriptor::list_of(BaseType::I32.into());
        assert!(raw.accepts(&ints));
        assert!(numbers.accepts(&ints));
        assert!(!ints.accepts(&numbers));
    }
}

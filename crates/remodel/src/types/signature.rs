//! Method signatures as declared, and their resolution against a concrete
//! owner descriptor.
//!
//! A declared signature may mention the owner's type parameters (`T`, `K`,
//! ...). Resolving it against `Box<string>` substitutes `T := string`; a
//! parameter the owner leaves unbound is erased to `object`.

use crate::types::accessor::MethodRef;
use crate::types::descriptor::{BaseType, TypeDescriptor};

// ─── Declared signatures ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSig {
    /// Fully known type.
    Exact(TypeDescriptor),
    /// A type parameter of the declaring class, by name.
    Param(&'static str),
    /// Generic base applied to (possibly parameterized) arguments.
    Generic(BaseType, Vec<TypeSig>),
    /// Array whose element may itself be a parameter.
    ArrayOf(Box<TypeSig>),
}

impl TypeSig {
    pub fn of(base: BaseType) -> Self { TypeSig::Exact(TypeDescriptor::of(base)) }

    pub fn list_of(element: impl Into<TypeSig>) -> Self {
        TypeSig::Generic(BaseType::List, vec![element.into()])
    }

    pub fn set_of(element: impl Into<TypeSig>) -> Self {
        TypeSig::Generic(BaseType::Set, vec![element.into()])
    }

    pub fn map_of(key: impl Into<TypeSig>, value: impl Into<TypeSig>) -> Self {
        TypeSig::Generic(BaseType::Map, vec![key.into(), value.into()])
    }

    pub fn array_of(element: impl Into<TypeSig>) -> Self {
        TypeSig::ArrayOf(Box::new(element.into()))
    }

    /// Substitute the owner's generic arguments into this signature.
    pub fn resolve(&self, owner: &TypeDescriptor) -> TypeDescriptor {
        match self {
            TypeSig::Exact(t) => t.clone(),
            TypeSig::Param(name) => bound_argument(owner, name),
            TypeSig::Generic(base, args) => TypeDescriptor::with_args(
                base.clone(),
                args.iter().map(|a| a.resolve(owner)).collect(),
            ),
            TypeSig::ArrayOf(element) => TypeDescriptor::array_of(element.resolve(owner)),
        }
    }
}

impl From<BaseType> for TypeSig {
    fn from(base: BaseType) -> Self { TypeSig::of(base) }
}

impl From<TypeDescriptor> for TypeSig {
    fn from(t: TypeDescriptor) -> Self { TypeSig::Exact(t) }
}

fn bound_argument(owner: &TypeDescriptor, param: &str) -> TypeDescriptor {
    let BaseType::Class(class) = owner.base() else {
        return TypeDescriptor::object();
    };
    class.type_params()
        .iter()
        .position(|p| *p == param)
        .map_or_else(TypeDescriptor::object, |index| owner.arg_or_object(index))
}

// ─── Executable type resolver ─────────────────────────────────────────────────

/// Computes the concrete parameter and return descriptors of a method as seen
/// through a particular owner descriptor.
pub trait ExecutableTypeResolver: Send + Sync {
    fn parameter_types(&self, method: &MethodRef, owner: &TypeDescriptor) -> Vec<TypeDescriptor>;

    /// `None` for methods that return nothing.
    fn return_type(&self, method: &MethodRef, owner: &TypeDescriptor) -> Option<TypeDescriptor>;
}

/// Substitutes class type parameters positionally from the owner's arguments.
#[derive(Debug, Default, Clone, Copy)]
pub struct SignatureResolver;

impl ExecutableTypeResolver for SignatureResolver {
    fn parameter_types(&self, method: &MethodRef, owner: &TypeDescriptor) -> Vec<TypeDescriptor> {
        method.desc().params.iter().map(|p| p.resolve(owner)).collect()
    }

    fn return_type(&self, method: &MethodRef, owner: &TypeDescriptor) -> Option<TypeDescriptor> {
        method.desc().ret.as_ref().map(|r| r.resolve(owner))
    }
}

// ─────────────────────────────────────────────────────────────────────────────

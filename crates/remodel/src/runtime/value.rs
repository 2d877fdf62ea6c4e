use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use parking_lot::{Mutex, MutexGuard};

use crate::types::descriptor::{BaseType, ClassType, EnumType};

// ─── Value ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Char(char),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Str(String),
    Instant(DateTime<Utc>),
    /// Arrays remember their component type, lists and sets do not.
    Array { component: BaseType, items: Vec<Value> },
    List(Vec<Value>),
    /// Insertion-ordered, duplicates removed on construction.
    Set(Vec<Value>),
    Map(Vec<(Value, Value)>),
    Enum { ty: EnumType, variant: &'static str },
    Object(Object),
}

/// Numeric payload widened for cross-type casts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Value {
    pub fn str(s: impl Into<String>) -> Self { Value::Str(s.into()) }

    pub fn array(component: BaseType, items: Vec<Value>) -> Self {
        Value::Array { component, items }
    }

    pub fn set(items: Vec<Value>) -> Self {
        let mut unique: Vec<Value> = Vec::with_capacity(items.len());
        for item in items {
            if !unique.contains(&item) {
                unique.push(item);
            }
        }
        Value::Set(unique)
    }

    pub fn object(instance: Instance) -> Self { Value::Object(Object::new(instance)) }

    /// `None` if `name` is not a variant of `ty`.
    pub fn enum_variant(ty: &EnumType, name: &str) -> Option<Self> {
        ty.variant(name).map(|variant| Value::Enum { ty: ty.clone(), variant })
    }

    pub fn is_null(&self) -> bool { matches!(self, Value::Null) }

    /// Runtime type, generic arguments erased. `Null` reports `Object`.
    pub fn runtime_type(&self) -> BaseType {
        match self {
            Value::Null                      => BaseType::Object,
            Value::Bool(_)                   => BaseType::Bool,
            Value::Char(_)                   => BaseType::Char,
            Value::I8(_)                     => BaseType::I8,
            Value::I16(_)                    => BaseType::I16,
            Value::I32(_)                    => BaseType::I32,
            Value::I64(_)                    => BaseType::I64,
            Value::F32(_)                    => BaseType::F32,
            Value::F64(_)                    => BaseType::F64,
            Value::Str(_)                    => BaseType::Str,
            Value::Instant(_)                => BaseType::Instant,
            Value::Array { component, .. }   => BaseType::array_of(component.clone()),
            Value::List(_)                   => BaseType::List,
            Value::Set(_)                    => BaseType::Set,
            Value::Map(_)                    => BaseType::Map,
            Value::Enum { ty, .. }           => BaseType::Enum(ty.clone()),
            Value::Object(o)                 => BaseType::Class(o.class()),
        }
    }

    pub fn number(&self) -> Option<Number> {
        match *self {
            Value::I8(v)  => Some(Number::Int(v as i64)),
            Value::I16(v) => Some(Number::Int(v as i64)),
            Value::I32(v) => Some(Number::Int(v as i64)),
            Value::I64(v) => Some(Number::Int(v)),
            Value::F32(v) => Some(Number::Float(v as f64)),
            Value::F64(v) => Some(Number::Float(v)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Elements of an array, list or set.
    pub fn elements(&self) -> Option<&[Value]> {
        match self {
            Value::Array { items, .. } | Value::List(items) | Value::Set(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self { Value::Str(s.to_string()) }
}

impl From<String> for Value {
    fn from(s: String) -> Self { Value::Str(s) }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self { Value::Bool(b) }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self { Value::I32(v) }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self { Value::I64(v) }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self { Value::F64(v) }
}

fn write_seq(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str("]")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null         => f.write_str("null"),
            Value::Bool(v)      => write!(f, "{v}"),
            Value::Char(v)      => write!(f, "{v}"),
            Value::I8(v)        => write!(f, "{v}"),
            Value::I16(v)       => write!(f, "{v}"),
            Value::I32(v)       => write!(f, "{v}"),
            Value::I64(v)       => write!(f, "{v}"),
            // Debug keeps the trailing `.0` on whole floats.
            Value::F32(v)       => write!(f, "{v:?}"),
            Value::F64(v)       => write!(f, "{v:?}"),
            Value::Str(v)       => f.write_str(v),
            Value::Instant(v)   => f.write_str(&v.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Value::Array { items, .. } | Value::List(items) | Value::Set(items) => write_seq(f, items),
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}={v}")?;
                }
                f.write_str("}")
            }
            Value::Enum { variant, .. } => f.write_str(variant),
            Value::Object(o)    => write!(f, "{o}"),
        }
    }
}

// ─── Instances ────────────────────────────────────────────────────────────────

/// Slot storage behind an object. Accessor bodies read and write slots;
/// the engine never touches them directly.
#[derive(Debug, Clone)]
pub struct Instance {
    class: ClassType,
    slots: BTreeMap<&'static str, Value>,
}

impl Instance {
    pub fn new(class: ClassType) -> Self {
        Self { class, slots: BTreeMap::new() }
    }

    pub fn class(&self) -> &ClassType { &self.class }

    /// Slot value, `Null` when never written.
    pub fn get(&self, slot: &str) -> Value {
        self.slots.get(slot).cloned().unwrap_or(Value::Null)
    }

    pub fn slot(&self, slot: &str) -> Option<&Value> { self.slots.get(slot) }

    pub fn set(&mut self, slot: &'static str, value: Value) {
        self.slots.insert(slot, value);
    }

    pub fn with(mut self, slot: &'static str, value: impl Into<Value>) -> Self {
        self.set(slot, value.into());
        self
    }

    pub fn slot_count(&self) -> usize { self.slots.len() }
}

/// Shared handle to an instance. Cloning shares; equality is identity.
#[derive(Clone)]
pub struct Object(Arc<Mutex<Instance>>);

impl Object {
    pub fn new(instance: Instance) -> Self {
        Self(Arc::new(Mutex::new(instance)))
    }

    pub fn class(&self) -> ClassType { self.0.lock().class.clone() }

    pub fn lock(&self) -> MutexGuard<'_, Instance> { self.0.lock() }

    pub fn get(&self, slot: &str) -> Value { self.0.lock().get(slot) }

    pub fn ptr_eq(&self, other: &Object) -> bool { Arc::ptr_eq(&self.0, &other.0) }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool { self.ptr_eq(other) }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_lock() {
            Some(inner) => f.debug_struct(inner.class.name()).field("slots", &inner.slots).finish(),
            None => write!(f, "Object(<locked>)"),
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.0.lock();
        write!(f, "{}{{", inner.class.name())?;
        for (i, (slot, value)) in inner.slots.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{slot}={value}")?;
        }
        f.write_str("}")
    }
}

// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_drops_duplicates_keeping_first_order() {
        let set = Value::set(vec![Value::I32(2), Value::I32(1), Value::I32(2)]);
        assert_eq!(set, Value::Set(vec![Value::I32(2), Value::I32(1)]));
    }

    #[test]
    fn object_equality_is_identity() {
        let class = ClassType::new("Point");
        let a = Object::new(Instance::new(class.clone()).with("x", 1));
        let b = Object::new(Instance::new(class).with("x", 1));
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn display_renders_nested_values() {
        let map = Value::Map(vec![(Value::I64(4), Value::List(vec![Value::F64(1.0), Value::Null]))]);
        assert_eq!(map.to_string(), "{4=[1.0, null]}");
    }

    #[test]
    fn runtime_type_keeps_array_component() {
        let array = Value::array(BaseType::I64, vec![Value::I64(1)]);
        assert_eq!(array.runtime_type(), BaseType::array_of(BaseType::I64));
        assert_eq!(Value::List(vec![]).runtime_type(), BaseType::List);
    }
}

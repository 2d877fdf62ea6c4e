use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::AccessError;
use crate::runtime::value::{Object, Value};
use crate::types::catalog::{MethodBody, MethodDesc};
use crate::types::descriptor::{ClassType, TypeDescriptor};

// ─── Method handle ────────────────────────────────────────────────────────────

/// A method pinned to the class that declares it.
///
/// Identity is (declaring class, name, declared parameters), so handles
/// obtained through different lookups of the same method compare equal while
/// overloads stay distinct.
#[derive(Clone)]
pub struct MethodRef {
    declaring: ClassType,
    desc:      Arc<MethodDesc>,
}

impl MethodRef {
    pub fn new(declaring: ClassType, desc: Arc<MethodDesc>) -> Self {
        Self { declaring, desc }
    }

    pub fn declaring(&self) -> &ClassType { &self.declaring }
    pub fn desc(&self) -> &MethodDesc { &self.desc }
    pub fn name(&self) -> &'static str { self.desc.name }
    pub fn arity(&self) -> usize { self.desc.params.len() }

    /// Invoke a reader body. The object lock is held for the call only.
    pub fn read(&self, target: &Object) -> Result<Value, AccessError> {
        match self.desc.body {
            MethodBody::Read(f) => f(&target.lock()),
            _ => Err(AccessError::new(self.to_string(), "method has no reader body")),
        }
    }

    /// Invoke a writer body. The object lock is held for the call only.
    pub fn write(&self, target: &Object, value: Value) -> Result<(), AccessError> {
        match self.desc.body {
            MethodBody::Write(f) => f(&mut target.lock(), value),
            _ => Err(AccessError::new(self.to_string(), "method has no writer body")),
        }
    }
}

impl PartialEq for MethodRef {
    fn eq(&self, other: &Self) -> bool {
        self.declaring == other.declaring
            && self.name() == other.name()
            && self.desc.params == other.desc.params
    }
}

impl Eq for MethodRef {}

impl Hash for MethodRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.declaring.hash(state);
        self.name().hash(state);
        self.desc.params.hash(state);
    }
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}/{}", self.declaring.name(), self.name(), self.arity())
    }
}

impl fmt::Debug for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MethodRef({self})")
    }
}

// ─── Accessor ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorKind {
    Reader,
    Writer,
}

/// A discovered reader or writer together with the value type it produces or
/// consumes, resolved against the owner it was discovered on.
#[derive(Debug, Clone, PartialEq)]
pub struct Accessor {
    pub method:     MethodRef,
    pub kind:       AccessorKind,
    pub value_type: TypeDescriptor,
}

impl Accessor {
    pub fn name(&self) -> &'static str { self.method.name() }
}

//! Value converters.
//!
//! Two families implement `TypeConverter`:
//!   • leaf converters (`simple`, `enumeration`) with fixed source and target
//!     types, e.g. string → i32
//!   • structural converters (`array`, `iterable`, `map`, `custom`) that walk a
//!     container or object and recurse into the context for every element
//!
//! Resolution does not hand out bare converters. It hands out a
//! `BoundConverter`: the chosen converter kind plus the target descriptor it
//! was resolved for, so generic arguments travel with it.

pub mod registry;
pub mod simple;
pub mod enumeration;
pub mod iterable;
pub mod array;
pub mod map;
pub mod custom;
pub mod util;

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

use crate::context::ConversionContext;
use crate::error::ConvertError;
use crate::runtime::value::Value;
use crate::types::descriptor::{BaseType, TypeDescriptor};

pub use custom::CustomTypeConverter;
pub use registry::ConverterRegistry;

// ─── Converter trait ──────────────────────────────────────────────────────────

pub trait TypeConverter: Send + Sync + 'static {
    /// Short name used in logs and in `disabled_converters`.
    fn name(&self) -> &'static str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }

    /// Identity of the implementation, used for de-duplication and for
    /// positional registration.
    fn implementation(&self) -> TypeId { TypeId::of::<Self>() }

    /// Whether this converter handles values of runtime type `from` headed for
    /// a slot of base type `to`.
    fn can_convert(&self, from: &BaseType, to: &BaseType) -> bool;

    /// Convert a non-null `value` to `to`. Leaf converters return
    /// `Value::Null` for unparseable input rather than failing.
    fn convert(&self, value: Value, to: &TypeDescriptor, ctx: &ConversionContext) -> Result<Value, ConvertError>;
}

// ─── Resolved converter ───────────────────────────────────────────────────────

#[derive(Clone)]
pub enum Converter {
    /// Value is already assignable; pass it through untouched.
    Identity,
    /// Taken from the registry. `builtin` is false for user registrations.
    Registered { converter: Arc<dyn TypeConverter>, builtin: bool },
    /// Object-to-object fallback living outside the registry.
    CustomType,
}

/// A converter chosen for one concrete target descriptor.
#[derive(Clone)]
pub struct BoundConverter {
    pub kind:   Converter,
    pub target: TypeDescriptor,
}

impl BoundConverter {
    pub fn identity(target: TypeDescriptor) -> Self {
        Self { kind: Converter::Identity, target }
    }

    pub fn custom_type(target: TypeDescriptor) -> Self {
        Self { kind: Converter::CustomType, target }
    }

    pub fn registered(converter: Arc<dyn TypeConverter>, builtin: bool, target: TypeDescriptor) -> Self {
        Self { kind: Converter::Registered { converter, builtin }, target }
    }

    /// Only converters a caller registered count; identity and the
    /// object-to-object fallback ship with the library.
    pub fn is_user_registered(&self) -> bool {
        matches!(self.kind, Converter::Registered { builtin: false, .. })
    }

    pub fn name(&self) -> &'static str {
        match &self.kind {
            Converter::Identity                     => "Identity",
            Converter::Registered { converter, .. } => converter.name(),
            Converter::CustomType                   => "CustomTypeConverter",
        }
    }

    pub fn apply(&self, value: Value, ctx: &ConversionContext) -> Result<Value, ConvertError> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        match &self.kind {
            Converter::Identity                     => Ok(value),
            Converter::Registered { converter, .. } => converter.convert(value, &self.target, ctx),
            Converter::CustomType                   => CustomTypeConverter.convert(value, &self.target, ctx),
        }
    }
}

impl fmt::Debug for BoundConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.name(), self.target)
    }
}

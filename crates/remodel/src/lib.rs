pub mod types;
pub mod runtime;
pub mod convert;
pub mod resolve;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;

pub use config::ContextConfig;
pub use context::ConversionContext;
pub use convert::{BoundConverter, Converter, TypeConverter};
pub use error::{AccessError, ConvertError};
pub use runtime::value::{Instance, Object, Value};
pub use types::{
    Accessor, BaseType, ClassCatalog, ClassDesc, ClassType, EnumType, ExecutableTypeResolver, MethodDesc,
    MethodRef, SignatureResolver, TypeDescriptor, TypeSig,
};

use std::sync::Arc;

// ─── Public API ───────────────────────────────────────────────────────────────

/// Entry point: converts a donor value into an instance of a target type.
///
/// Cheap to clone; clones share one `ConversionContext`, so converters,
/// classes and mappings registered through any of them are seen by all.
#[derive(Clone, Default)]
pub struct ModelConverter {
    context: Arc<ConversionContext>,
}

impl ModelConverter {
    pub fn new() -> Self { Self::default() }

    pub fn with_context(context: Arc<ConversionContext>) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &Arc<ConversionContext> { &self.context }

    /// Null yields null. A donor already assignable to a raw `target` is
    /// returned as the same value (same shared object for instances).
    pub fn convert(&self, donor: Value, target: &TypeDescriptor) -> Result<Value, ConvertError> {
        if donor.is_null() {
            tracing::info!(%target, "received null, returning null");
            return Ok(Value::Null);
        }
        if !target.is_parameterized() && target.base().is_assignable_from(&donor.runtime_type()) {
            return Ok(donor);
        }
        self.context.convert(donor, target)
    }
}

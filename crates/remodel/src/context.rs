//! Conversion context: shared, mutable state behind every conversion.
//!
//! Owns three stores, each behind its own `RwLock`:
//!   • the converter registry
//!   • the custom mapping overlay
//!   • the class catalog
//!
//! Conversions take short read locks and copy out what they need, so no lock
//! is held while a nested conversion runs. Registrations take the write lock.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::ContextConfig;
use crate::convert::TypeConverter;
use crate::convert::registry::ConverterRegistry;
use crate::error::ConvertError;
use crate::resolve::overlay::MappingOverlay;
use crate::resolve::resolver::ConverterResolver;
use crate::types::accessor::MethodRef;
use crate::types::catalog::{ClassCatalog, ClassDesc};
use crate::types::descriptor::{ClassType, TypeDescriptor};
use crate::types::signature::ExecutableTypeResolver;

pub struct ConversionContext {
    config:   ContextConfig,
    registry: RwLock<ConverterRegistry>,
    overlay:  RwLock<MappingOverlay>,
    catalog:  RwLock<ClassCatalog>,
}

impl Default for ConversionContext {
    fn default() -> Self { Self::new() }
}

impl ConversionContext {
    pub fn new() -> Self {
        Self::with_config(ContextConfig::default())
    }

    pub fn with_config(config: ContextConfig) -> Self {
        Self::build(config, ClassCatalog::new())
    }

    /// Use a custom executable type resolver for accessor discovery.
    pub fn with_type_resolver(config: ContextConfig, resolver: Arc<dyn ExecutableTypeResolver>) -> Self {
        Self::build(config, ClassCatalog::with_resolver(resolver))
    }

    fn build(config: ContextConfig, catalog: ClassCatalog) -> Self {
        let registry = if config.builtin_converters {
            ConverterRegistry::with_builtins(&config.disabled_converters)
        } else {
            ConverterRegistry::new()
        };
        tracing::debug!(converters = registry.len(), "conversion context created");
        Self {
            config,
            registry: RwLock::new(registry),
            overlay:  RwLock::new(MappingOverlay::new()),
            catalog:  RwLock::new(catalog),
        }
    }

    pub fn config(&self) -> &ContextConfig { &self.config }

    // ── Registration ──────────────────────────────────────────────────────────

    pub fn register_converter<C: TypeConverter>(&self, converter: C) -> bool {
        self.registry.write().register(converter)
    }

    pub fn register_converter_first<C: TypeConverter>(&self, converter: C) -> bool {
        self.registry.write().register_first(converter)
    }

    pub fn register_converter_before<M: TypeConverter, C: TypeConverter>(&self, converter: C) -> bool {
        self.registry.write().register_before::<M, C>(converter)
    }

    pub fn register_converter_after<M: TypeConverter, C: TypeConverter>(&self, converter: C) -> bool {
        self.registry.write().register_after::<M, C>(converter)
    }

    pub fn register_class(&self, desc: ClassDesc) {
        tracing::info!(class = desc.ty.name(), methods = desc.methods.len(), "registering class");
        self.catalog.write().register(desc);
    }

    /// Route `reader` on any donor to `writer` when converting to exactly
    /// `acceptor`.
    pub fn register_mapping(&self, reader: &MethodRef, writer: &MethodRef, acceptor: &TypeDescriptor) -> Result<(), ConvertError> {
        self.overlay.write().register(reader, writer, acceptor)
    }

    /// Convenience over `register_mapping` that looks both methods up by name.
    pub fn register_mapping_by_name(
        &self,
        donor:    &ClassType,
        reader:   &str,
        acceptor: &ClassType,
        writer:   &str,
    ) -> Result<(), ConvertError> {
        let find = |class: &ClassType, name: &str| {
            self.find_method(class, name)
                .ok_or_else(|| ConvertError::invalid_mapping(format!("{} has no method `{name}`", class.name())))
        };
        let (reader_ref, writer_ref) = (find(donor, reader)?, find(acceptor, writer)?);
        self.register_mapping(&reader_ref, &writer_ref, &TypeDescriptor::class(acceptor))
    }

    /// First method called `name` visible on `class`, inherited ones included.
    pub fn find_method(&self, class: &ClassType, name: &str) -> Option<MethodRef> {
        self.catalog.read().find_method(class, name)
    }

    // ── Snapshots ─────────────────────────────────────────────────────────────

    /// Resolver over the registry as it is right now.
    pub fn resolver(&self) -> ConverterResolver {
        ConverterResolver::new(self.registry.read().snapshot())
    }

    pub fn converter_names(&self) -> Vec<&'static str> {
        self.registry.read().names()
    }

    pub(crate) fn catalog(&self) -> &RwLock<ClassCatalog> { &self.catalog }

    pub(crate) fn lookup_mapping(&self, reader: &MethodRef, acceptor: &TypeDescriptor) -> Option<MethodRef> {
        self.overlay.read().lookup(reader, acceptor)
    }
}

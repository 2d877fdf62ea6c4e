//! Conversion engine.
//!
//! Object conversion runs as:
//!   Start → InstanceCreated → (per reader: AccessorMatched | AccessorSkipped) → Done
//!
//! A failing reader or writer skips its field with a warning. Converter
//! errors abort the whole conversion.

use crate::context::ConversionContext;
use crate::error::ConvertError;
use crate::resolve::mapper::GetterSetterMapper;
use crate::runtime::value::Value;
use crate::types::catalog::Introspect;
use crate::types::descriptor::{BaseType, TypeDescriptor};

impl ConversionContext {
    /// Whether any converter turns `from` values into `to`.
    pub fn can_convert(&self, from: &BaseType, to: &TypeDescriptor) -> bool {
        self.resolver().resolve(from, to).is_some()
    }

    /// Convert `value` to `to`. Null passes through.
    pub fn convert(&self, value: Value, to: &TypeDescriptor) -> Result<Value, ConvertError> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        let from = value.runtime_type();
        match self.resolver().resolve(&from, to) {
            Some(converter) => converter.apply(value, self),
            None => {
                tracing::error!(%from, %to, "no converter found");
                Err(ConvertError::impossible(from, to))
            }
        }
    }

    /// Build a fresh `target` instance and feed it every donor reader that
    /// finds a matching writer.
    pub fn convert_object(&self, donor: Value, target: &TypeDescriptor) -> Result<Value, ConvertError> {
        let donor = match donor {
            Value::Null => return Ok(Value::Null),
            Value::Object(o) => o,
            other => return Err(ConvertError::impossible(other.runtime_type(), target)),
        };

        let donor_type = TypeDescriptor::class(&donor.class());
        let (acceptor, readers, writers, types) = {
            let catalog = self.catalog().read();
            let acceptor = catalog.instantiate(target)?;
            (acceptor, catalog.readers_of(&donor_type), catalog.writers_of(target), catalog.resolver())
        };
        tracing::debug!(from = %donor_type, to = %target, readers = readers.len(), writers = writers.len(), "instance created");

        let resolver = self.resolver();
        let mapper = GetterSetterMapper {
            resolver:      &resolver,
            types:         types.as_ref(),
            reader_prefix: &self.config().reader_prefix,
            writer_prefix: &self.config().writer_prefix,
        };

        for reader in &readers {
            let value = match reader.method.read(&donor) {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!(reader = %reader.method, error = %e, "failed to read donor value, skipping");
                    continue;
                }
            };
            if value.is_null() {
                tracing::debug!(reader = reader.name(), "donor value is null, skipping");
                continue;
            }

            let overridden = self.lookup_mapping(&reader.method, target);
            let Some(pair) = mapper.map(reader, &value, target, &writers, overridden) else {
                continue;
            };
            let converted = match &pair.converter {
                Some(converter) => converter.apply(value, self)?,
                None => value,
            };
            if let Err(e) = pair.writer.method.write(&acceptor, converted) {
                tracing::warn!(writer = %pair.writer.method, error = %e, "failed to write acceptor value, skipping");
            }
        }

        tracing::debug!(from = %donor_type, to = %target, "converted");
        Ok(Value::Object(acceptor))
    }
}

use crate::context::ConversionContext;
use crate::convert::TypeConverter;
use crate::convert::util::common_type;
use crate::error::ConvertError;
use crate::runtime::value::Value;
use crate::types::descriptor::{BaseType, TypeDescriptor};

/// Map to map, converting keys and values independently. Two keys that become
/// equal after conversion are an error.
#[derive(Debug, Default, Clone, Copy)]
pub struct MapToMap;

impl TypeConverter for MapToMap {
    fn can_convert(&self, from: &BaseType, to: &BaseType) -> bool {
        *from == BaseType::Map && (BaseType::Map.is_assignable_from(to) || to.is_assignable_from(&BaseType::Map))
    }

    fn convert(&self, value: Value, to: &TypeDescriptor, ctx: &ConversionContext) -> Result<Value, ConvertError> {
        let arity = to.args().len();
        if arity != 0 && arity != 2 {
            return Err(ConvertError::UnsupportedTarget {
                converter: self.name(),
                to:        to.to_string(),
                reason:    format!("expected 0 or 2 generic arguments, got {arity}"),
            });
        }
        let Value::Map(entries) = value else {
            return Ok(Value::Null);
        };

        let key_to = to.arg_or_object(0);
        let value_to = to.arg_or_object(1);
        let key_from = common_type(entries.iter().map(|(k, _)| k));
        if !ctx.can_convert(&key_from, &key_to) {
            tracing::warn!(from = %key_from, to = %key_to, "cannot convert map keys, returning null");
            return Ok(Value::Null);
        }
        let value_from = common_type(entries.iter().map(|(_, v)| v));
        if !ctx.can_convert(&value_from, &value_to) {
            tracing::warn!(from = %value_from, to = %value_to, "cannot convert map values, returning null");
            return Ok(Value::Null);
        }

        let mut out: Vec<(Value, Value)> = Vec::with_capacity(entries.len());
        for (k, v) in entries {
            let key = ctx.convert(k, &key_to)?;
            if out.iter().any(|(existing, _)| *existing == key) {
                return Err(ConvertError::DuplicateKey { key: key.to_string(), to: to.to_string() });
            }
            out.push((key, ctx.convert(v, &value_to)?));
        }
        Ok(Value::Map(out))
    }
}

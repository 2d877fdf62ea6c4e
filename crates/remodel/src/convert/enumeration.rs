use crate::context::ConversionContext;
use crate::convert::TypeConverter;
use crate::error::ConvertError;
use crate::runtime::value::Value;
use crate::types::descriptor::{BaseType, TypeDescriptor};

/// String to enum variant by exact, case-sensitive name. Unknown names become
/// null.
#[derive(Debug, Default, Clone, Copy)]
pub struct StrToEnum;

impl TypeConverter for StrToEnum {
    fn can_convert(&self, from: &BaseType, to: &BaseType) -> bool {
        BaseType::Str.is_assignable_from(from) && matches!(to, BaseType::Enum(_))
    }

    fn convert(&self, value: Value, to: &TypeDescriptor, _: &ConversionContext) -> Result<Value, ConvertError> {
        let (BaseType::Enum(ty), Some(name)) = (to.base(), value.as_str()) else {
            return Ok(Value::Null);
        };
        Ok(Value::enum_variant(ty, name).unwrap_or_else(|| {
            tracing::warn!(input = name, to = ty.name(), "no such variant, returning null");
            Value::Null
        }))
    }
}

use crate::context::ConversionContext;
use crate::convert::TypeConverter;
use crate::error::ConvertError;
use crate::runtime::value::Value;
use crate::types::descriptor::{BaseType, TypeDescriptor};

/// Object to object through accessor matching. Not part of the registry;
/// resolution falls back to it when nothing registered applies. An
/// `object`-typed source is accepted too, as empty containers report it.
#[derive(Debug, Default, Clone, Copy)]
pub struct CustomTypeConverter;

impl TypeConverter for CustomTypeConverter {
    fn name(&self) -> &'static str { "CustomTypeConverter" }

    fn can_convert(&self, from: &BaseType, to: &BaseType) -> bool {
        matches!(from, BaseType::Class(_) | BaseType::Object) && matches!(to, BaseType::Class(_))
    }

    fn convert(&self, value: Value, to: &TypeDescriptor, ctx: &ConversionContext) -> Result<Value, ConvertError> {
        ctx.convert_object(value, to)
    }
}

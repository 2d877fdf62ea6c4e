use crate::context::ConversionContext;
use crate::convert::TypeConverter;
use crate::convert::iterable::{check_arity, convert_sequence, Sequence};
use crate::convert::util::array_element_type;
use crate::error::ConvertError;
use crate::runtime::value::Value;
use crate::types::descriptor::{BaseType, TypeDescriptor};

macro_rules! array_converter {
    ($name:ident => $shape:expr) => {
        #[derive(Debug, Default, Clone, Copy)]
        pub struct $name;

        impl TypeConverter for $name {
            fn can_convert(&self, from: &BaseType, to: &BaseType) -> bool {
                from.is_array() && $shape.accepts_target(to)
            }

            fn convert(&self, value: Value, to: &TypeDescriptor, ctx: &ConversionContext) -> Result<Value, ConvertError> {
                check_arity(self.name(), to)?;
                let Value::Array { component, items } = value else {
                    return Ok(Value::Null);
                };
                let element_from = array_element_type(&component, &items);
                convert_sequence($shape, items, element_from, to, ctx)
            }
        }
    };
}

array_converter! { ArrayToList => Sequence::List }
array_converter! { ArrayToSet => Sequence::Set }
array_converter! { ArrayToArray => Sequence::Array }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_to_array_retypes_component() {
        let ctx = ConversionContext::new();
        let from = Value::array(BaseType::I32, vec![Value::I32(1), Value::Null, Value::I32(3)]);
        let to = TypeDescriptor::array_of(BaseType::Str.into());
        assert_eq!(
            ArrayToArray.convert(from, &to, &ctx),
            Ok(Value::array(BaseType::Str, vec!["1".into(), Value::Null, "3".into()])),
        );
    }

    #[test]
    fn only_arrays_are_sources() {
        assert!(ArrayToList.can_convert(&BaseType::array_of(BaseType::Str), &BaseType::Object));
        assert!(!ArrayToList.can_convert(&BaseType::List, &BaseType::List));
    }
}

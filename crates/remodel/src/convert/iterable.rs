//! Lists and sets into lists, sets or arrays, converting every element.
//!
//! The element pair is checked once up front against the items' common type.
//! If no converter exists for it the whole container becomes null; elements
//! are never dropped one by one.

use crate::context::ConversionContext;
use crate::convert::TypeConverter;
use crate::convert::util::common_type;
use crate::error::ConvertError;
use crate::runtime::value::Value;
use crate::types::descriptor::{BaseType, TypeDescriptor};

// ─── Shared sequence plumbing ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Sequence {
    List,
    Set,
    Array,
}

impl Sequence {
    /// Whether a result of this shape can be stored in a `to` slot.
    pub(crate) fn accepts_target(self, to: &BaseType) -> bool {
        let own = match self {
            Sequence::List  => BaseType::List,
            Sequence::Set   => BaseType::Set,
            Sequence::Array => return to.is_array(),
        };
        own.is_assignable_from(to) || to.is_assignable_from(&own)
    }

    /// Target element descriptor, `object` when the target is raw.
    pub(crate) fn element_target(self, to: &TypeDescriptor) -> TypeDescriptor {
        if let Some(element) = to.arg(0) {
            return element.clone();
        }
        match (self, to.base()) {
            (Sequence::Array, BaseType::Array(component)) => TypeDescriptor::of((**component).clone()),
            _ => TypeDescriptor::object(),
        }
    }

    fn build(self, element: &TypeDescriptor, items: Vec<Value>) -> Value {
        match self {
            Sequence::List  => Value::List(items),
            Sequence::Set   => Value::set(items),
            Sequence::Array => Value::array(element.base().clone(), items),
        }
    }
}

/// At most one generic argument is allowed on a sequence target.
pub(crate) fn check_arity(converter: &'static str, to: &TypeDescriptor) -> Result<(), ConvertError> {
    if to.args().len() > 1 {
        return Err(ConvertError::UnsupportedTarget {
            converter,
            to: to.to_string(),
            reason: format!("expected 0 or 1 generic arguments, got {}", to.args().len()),
        });
    }
    Ok(())
}

/// Convert `items` element-wise into `shape`. `element_from` is the items'
/// common type.
pub(crate) fn convert_sequence(
    shape:        Sequence,
    items:        Vec<Value>,
    element_from: BaseType,
    to:           &TypeDescriptor,
    ctx:          &ConversionContext,
) -> Result<Value, ConvertError> {
    let element_to = shape.element_target(to);
    if !ctx.can_convert(&element_from, &element_to) {
        tracing::warn!(from = %element_from, to = %element_to, "cannot convert container elements, returning null");
        return Ok(Value::Null);
    }
    let converted = items
        .into_iter()
        .map(|item| ctx.convert(item, &element_to))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(shape.build(&element_to, converted))
}

fn is_iterable(from: &BaseType) -> bool {
    BaseType::Iterable.is_assignable_from(from)
}

fn into_items(value: Value) -> Vec<Value> {
    match value {
        Value::List(items) | Value::Set(items) => items,
        _ => Vec::new(),
    }
}

// ─── Converters ───────────────────────────────────────────────────────────────

macro_rules! iterable_converter {
    ($(#[$meta:meta])* $name:ident => $shape:expr) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, Copy)]
        pub struct $name;

        impl TypeConverter for $name {
            fn can_convert(&self, from: &BaseType, to: &BaseType) -> bool {
                is_iterable(from) && $shape.accepts_target(to)
            }

            fn convert(&self, value: Value, to: &TypeDescriptor, ctx: &ConversionContext) -> Result<Value, ConvertError> {
                check_arity(self.name(), to)?;
                let element_from = value.elements().map_or(BaseType::Object, |items| common_type(items));
                convert_sequence($shape, into_items(value), element_from, to, ctx)
            }
        }
    };
}

iterable_converter! { IterableToList => Sequence::List }
iterable_converter! { IterableToSet => Sequence::Set }
iterable_converter! {
    /// Component type of the result comes from the target's element type.
    IterableToArray => Sequence::Array
}

// ─────────────────────────────────────────────────────────────────────────────

//! Leaf converters: one fixed source type to one fixed target type.
//!
//! Each converter handles any runtime type assignable to its source and any
//! slot type its target is assignable to: `NumberToI32` accepts an `i8` value
//! and serves an `i32`, `number` or `object` slot alike.
//!
//! Unparseable input becomes `Value::Null` with a warning, never an error.

use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::context::ConversionContext;
use crate::convert::TypeConverter;
use crate::error::ConvertError;
use crate::runtime::value::{Number, Value};
use crate::types::descriptor::{BaseType, TypeDescriptor};

macro_rules! leaf_converter {
    ($(#[$meta:meta])* $name:ident : $from:expr => $to:expr, |$v:ident| $body:expr) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, Copy)]
        pub struct $name;

        impl TypeConverter for $name {
            fn can_convert(&self, from: &BaseType, to: &BaseType) -> bool {
                $from.is_assignable_from(from) && to.is_assignable_from(&$to)
            }

            fn convert(&self, $v: Value, _: &TypeDescriptor, _: &ConversionContext) -> Result<Value, ConvertError> {
                Ok($body)
            }
        }
    };
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

fn parse<T: FromStr>(value: &Value, to: BaseType) -> Option<T> {
    let text = value.as_str()?;
    match text.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!(input = text, to = %to, "failed to parse, returning null");
            None
        }
    }
}

fn numeric<T>(value: &Value, int: fn(i64) -> T, float: fn(f64) -> T) -> Option<T> {
    match value.number()? {
        Number::Int(i)   => Some(int(i)),
        Number::Float(f) => Some(float(f)),
    }
}

fn epoch_millis(value: &Value) -> Option<i64> {
    match value {
        Value::Instant(t) => Some(t.timestamp_millis()),
        _ => None,
    }
}

fn str_to_bool(value: &Value) -> Value {
    let Some(text) = value.as_str() else { return Value::Null };
    let lower = text.to_ascii_lowercase();
    match lower.as_str() {
        "true" | "y" | "yes" | "t" | "1"  => Value::Bool(true),
        "false" | "n" | "no" | "f" | "0" => Value::Bool(false),
        _ => {
            tracing::warn!(input = text, to = "bool", "unrecognized boolean, returning null");
            Value::Null
        }
    }
}

fn str_to_char(value: &Value) -> Value {
    match value.as_str().map(|s| s.chars().next()) {
        Some(Some(c)) => Value::Char(c),
        Some(None) => {
            tracing::warn!(to = "char", "empty string, returning null");
            Value::Null
        }
        None => Value::Null,
    }
}

// ─── Text ─────────────────────────────────────────────────────────────────────

leaf_converter! {
    /// Any value to its display form.
    ObjectToStr: BaseType::Object => BaseType::Str, |v| Value::Str(v.to_string())
}

leaf_converter! { StrToF64: BaseType::Str => BaseType::F64, |v| parse(&v, BaseType::F64).map_or(Value::Null, Value::F64) }
leaf_converter! { StrToI64: BaseType::Str => BaseType::I64, |v| parse(&v, BaseType::I64).map_or(Value::Null, Value::I64) }
leaf_converter! { StrToF32: BaseType::Str => BaseType::F32, |v| parse(&v, BaseType::F32).map_or(Value::Null, Value::F32) }
leaf_converter! { StrToI32: BaseType::Str => BaseType::I32, |v| parse(&v, BaseType::I32).map_or(Value::Null, Value::I32) }
leaf_converter! { StrToI16: BaseType::Str => BaseType::I16, |v| parse(&v, BaseType::I16).map_or(Value::Null, Value::I16) }
leaf_converter! { StrToI8:  BaseType::Str => BaseType::I8,  |v| parse(&v, BaseType::I8).map_or(Value::Null, Value::I8) }

leaf_converter! {
    /// Case-insensitive `true`/`false`, plus `y`/`yes`/`t`/`1` and `n`/`no`/`f`/`0`.
    StrToBool: BaseType::Str => BaseType::Bool, |v| str_to_bool(&v)
}

leaf_converter! {
    /// First character; empty input becomes null.
    StrToChar: BaseType::Str => BaseType::Char, |v| str_to_char(&v)
}

// ─── Numbers ──────────────────────────────────────────────────────────────────

leaf_converter! {
    /// Non-zero is `true`.
    NumberToBool: BaseType::Number => BaseType::Bool,
    |v| numeric(&v, |i| i != 0, |f| f != 0.0).map_or(Value::Null, Value::Bool)
}

leaf_converter! {
    /// Code point; values outside the Unicode scalar range become null.
    NumberToChar: BaseType::Number => BaseType::Char,
    |v| numeric(&v, |i| u32::try_from(i).ok(), |f| (0.0..=f64::from(u32::MAX)).contains(&f).then_some(f as u32))
        .flatten()
        .and_then(char::from_u32)
        .map_or(Value::Null, Value::Char)
}

leaf_converter! {
    /// Epoch milliseconds.
    NumberToInstant: BaseType::Number => BaseType::Instant,
    |v| numeric(&v, |i| i, |f| f as i64)
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map_or(Value::Null, Value::Instant)
}

leaf_converter! { NumberToF64: BaseType::Number => BaseType::F64, |v| numeric(&v, |i| i as f64, |f| f).map_or(Value::Null, Value::F64) }
leaf_converter! { NumberToF32: BaseType::Number => BaseType::F32, |v| numeric(&v, |i| i as f32, |f| f as f32).map_or(Value::Null, Value::F32) }
leaf_converter! { NumberToI64: BaseType::Number => BaseType::I64, |v| numeric(&v, |i| i, |f| f as i64).map_or(Value::Null, Value::I64) }
leaf_converter! { NumberToI32: BaseType::Number => BaseType::I32, |v| numeric(&v, |i| i as i32, |f| f as i32).map_or(Value::Null, Value::I32) }
leaf_converter! { NumberToI16: BaseType::Number => BaseType::I16, |v| numeric(&v, |i| i as i16, |f| f as i16).map_or(Value::Null, Value::I16) }
leaf_converter! { NumberToI8:  BaseType::Number => BaseType::I8,  |v| numeric(&v, |i| i as i8, |f| f as i8).map_or(Value::Null, Value::I8) }

// ─── Time ─────────────────────────────────────────────────────────────────────

leaf_converter! { InstantToF64: BaseType::Instant => BaseType::F64, |v| epoch_millis(&v).map_or(Value::Null, |ms| Value::F64(ms as f64)) }
leaf_converter! { InstantToI64: BaseType::Instant => BaseType::I64, |v| epoch_millis(&v).map_or(Value::Null, Value::I64) }
leaf_converter! { InstantToF32: BaseType::Instant => BaseType::F32, |v| epoch_millis(&v).map_or(Value::Null, |ms| Value::F32(ms as f32)) }
leaf_converter! { InstantToI32: BaseType::Instant => BaseType::I32, |v| epoch_millis(&v).map_or(Value::Null, |ms| Value::I32(ms as i32)) }
leaf_converter! { InstantToI16: BaseType::Instant => BaseType::I16, |v| epoch_millis(&v).map_or(Value::Null, |ms| Value::I16(ms as i16)) }
leaf_converter! { InstantToI8:  BaseType::Instant => BaseType::I8,  |v| epoch_millis(&v).map_or(Value::Null, |ms| Value::I8(ms as i8)) }

// ─────────────────────────────────────────────────────────────────────────────

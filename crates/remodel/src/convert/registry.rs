//! Converter registry: an ordered list of converters where order is priority.
//!
//! Adding a converter = calling one of the `register*` methods. Duplicates are
//! detected by implementation type, so registering a second instance of the
//! same converter type is a no-op.

use std::any::TypeId;
use std::collections::HashSet;
use std::sync::Arc;

use crate::convert::TypeConverter;
use crate::convert::{array, enumeration, iterable, map, simple};

// ─── Entries ──────────────────────────────────────────────────────────────────

/// A converter as seen by resolution: the converter and whether it shipped
/// with the library.
#[derive(Clone)]
pub struct ConverterEntry {
    pub converter: Arc<dyn TypeConverter>,
    pub builtin:   bool,
}

// ─── Registry ─────────────────────────────────────────────────────────────────

pub struct ConverterRegistry {
    converters: Vec<Arc<dyn TypeConverter>>,
    /// Fixed at construction.
    builtin:    HashSet<TypeId>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self { converters: Vec::new(), builtin: HashSet::new() }
    }

    /// The built-in set in priority order, minus any whose short name is in
    /// `disabled`.
    pub fn with_builtins(disabled: &[String]) -> Self {
        let converters: Vec<Arc<dyn TypeConverter>> = builtin_converters()
            .into_iter()
            .filter(|c| !disabled.iter().any(|d| d == c.name()))
            .collect();
        let builtin = converters.iter().map(|c| c.implementation()).collect();
        Self { converters, builtin }
    }

    pub fn len(&self) -> usize { self.converters.len() }
    pub fn is_empty(&self) -> bool { self.converters.is_empty() }

    pub fn contains<M: TypeConverter>(&self) -> bool {
        self.position(TypeId::of::<M>()).is_some()
    }

    pub fn is_builtin(&self, converter: &dyn TypeConverter) -> bool {
        self.builtin.contains(&converter.implementation())
    }

    /// Short names in priority order.
    pub fn names(&self) -> Vec<&'static str> {
        self.converters.iter().map(|c| c.name()).collect()
    }

    /// Copy of the current order for lock-free iteration.
    pub fn snapshot(&self) -> Vec<ConverterEntry> {
        self.converters
            .iter()
            .map(|c| ConverterEntry { converter: c.clone(), builtin: self.is_builtin(c.as_ref()) })
            .collect()
    }

    // ── Mutation ──────────────────────────────────────────────────────────────

    /// Append with the lowest priority. Returns `false` on a duplicate.
    pub fn register<C: TypeConverter>(&mut self, converter: C) -> bool {
        self.insert(self.converters.len(), Arc::new(converter))
    }

    /// Insert with the highest priority.
    pub fn register_first<C: TypeConverter>(&mut self, converter: C) -> bool {
        self.insert(0, Arc::new(converter))
    }

    /// Insert right before the converter of type `M`, or append if `M` is not
    /// registered.
    pub fn register_before<M: TypeConverter, C: TypeConverter>(&mut self, converter: C) -> bool {
        let index = self.marker_index::<M>().unwrap_or(self.converters.len());
        self.insert(index, Arc::new(converter))
    }

    /// Insert right after the converter of type `M`, or append if `M` is not
    /// registered.
    pub fn register_after<M: TypeConverter, C: TypeConverter>(&mut self, converter: C) -> bool {
        let index = self.marker_index::<M>().map_or(self.converters.len(), |i| i + 1);
        self.insert(index, Arc::new(converter))
    }

    fn marker_index<M: TypeConverter>(&self) -> Option<usize> {
        let index = self.position(TypeId::of::<M>());
        if index.is_none() {
            tracing::info!(
                marker = std::any::type_name::<M>(),
                "marker converter not registered, appending to the end"
            );
        }
        index
    }

    fn position(&self, id: TypeId) -> Option<usize> {
        self.converters.iter().position(|c| c.implementation() == id)
    }

    fn insert(&mut self, index: usize, converter: Arc<dyn TypeConverter>) -> bool {
        if self.position(converter.implementation()).is_some() {
            tracing::info!(converter = converter.name(), "converter already registered, skipping");
            return false;
        }
        tracing::info!(converter = converter.name(), index, "registering converter");
        self.converters.insert(index, converter);
        true
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self { Self::with_builtins(&[]) }
}

// ─── Built-in set ─────────────────────────────────────────────────────────────

fn builtin_converters() -> Vec<Arc<dyn TypeConverter>> {
    use simple::*;
    vec![
        // text
        Arc::new(ObjectToStr),
        Arc::new(StrToF64),
        Arc::new(StrToI64),
        Arc::new(StrToF32),
        Arc::new(StrToI32),
        Arc::new(StrToI16),
        Arc::new(StrToI8),
        Arc::new(StrToBool),
        Arc::new(StrToChar),
        Arc::new(enumeration::StrToEnum),
        // numbers
        Arc::new(NumberToBool),
        Arc::new(NumberToI8),
        Arc::new(NumberToChar),
        Arc::new(NumberToInstant),
        Arc::new(NumberToF64),
        Arc::new(NumberToF32),
        Arc::new(NumberToI32),
        Arc::new(NumberToI64),
        Arc::new(NumberToI16),
        // containers
        Arc::new(iterable::IterableToList),
        Arc::new(iterable::IterableToSet),
        Arc::new(iterable::IterableToArray),
        Arc::new(map::MapToMap),
        Arc::new(array::ArrayToList),
        Arc::new(array::ArrayToSet),
        Arc::new(array::ArrayToArray),
        // time
        Arc::new(InstantToF64),
        Arc::new(InstantToI64),
        Arc::new(InstantToF32),
        Arc::new(InstantToI32),
        Arc::new(InstantToI16),
        Arc::new(InstantToI8),
    ]
}

// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ConversionContext;
    use crate::convert::simple::{ObjectToStr, StrToBool, StrToChar, StrToI32};
    use crate::error::ConvertError;
    use crate::runtime::value::Value;
    use crate::types::descriptor::{BaseType, TypeDescriptor};

    struct Shout;

    impl TypeConverter for Shout {
        fn can_convert(&self, from: &BaseType, to: &BaseType) -> bool {
            *from == BaseType::Str && *to == BaseType::Str
        }
        fn convert(&self, value: Value, _: &TypeDescriptor, _: &ConversionContext) -> Result<Value, ConvertError> {
            Ok(Value::str(value.to_string().to_uppercase()))
        }
    }

    #[test]
    fn builtins_start_with_object_to_string() {
        let r = ConverterRegistry::default();
        assert_eq!(r.names()[0], "ObjectToStr");
        assert!(r.snapshot().iter().all(|e| e.builtin));
    }

    #[test]
    fn disabled_builtins_are_left_out() {
        let r = ConverterRegistry::with_builtins(&["StrToBool".to_string()]);
        assert!(!r.contains::<StrToBool>());
        assert!(r.contains::<StrToI32>());
    }

    #[test]
    fn duplicate_type_is_ignored() {
        let mut r = ConverterRegistry::default();
        let before = r.len();
        assert!(!r.register(StrToI32));
        assert_eq!(r.len(), before);
    }

    #[test]
    fn positional_insertion() {
        let mut r = ConverterRegistry::default();
        assert!(r.register_before::<StrToChar, _>(Shout));
        let names = r.names();
        let shout = names.iter().position(|n| *n == "Shout");
        let chr = names.iter().position(|n| *n == "StrToChar");
        assert_eq!(shout.map(|i| i + 1), chr);
        assert!(!r.snapshot()[shout.unwrap_or(0)].builtin);
    }

    #[test]
    fn insertion_after_marker_and_first() {
        let mut r = ConverterRegistry::new();
        r.register(StrToI32);
        r.register(StrToBool);
        r.register_after::<StrToI32, _>(Shout);
        assert_eq!(r.names(), vec!["StrToI32", "Shout", "StrToBool"]);

        let mut r = ConverterRegistry::new();
        r.register(StrToI32);
        r.register_first(ObjectToStr);
        assert_eq!(r.names(), vec!["ObjectToStr", "StrToI32"]);
    }

    #[test]
    fn missing_marker_appends() {
        let mut r = ConverterRegistry::new();
        r.register(StrToI32);
        r.register_before::<StrToChar, _>(Shout);
        assert_eq!(r.names(), vec!["StrToI32", "Shout"]);
    }
}

//! Converter resolution: which converter turns a `from` runtime type into a
//! `to` descriptor.
//!
//! Priority, highest first:
//!   1. identity, when `to` is raw and already accepts `from`
//!   2. the first user-registered converter, in registry order
//!   3. the first built-in converter, in registry order
//!   4. the object-to-object fallback

use crate::convert::registry::ConverterEntry;
use crate::convert::{BoundConverter, Converter, CustomTypeConverter, TypeConverter};
use crate::types::accessor::Accessor;
use crate::types::descriptor::{BaseType, TypeDescriptor};

pub struct ConverterResolver {
    converters: Vec<ConverterEntry>,
}

impl ConverterResolver {
    /// Resolve against a snapshot of the registry taken by the caller.
    pub fn new(converters: Vec<ConverterEntry>) -> Self {
        Self { converters }
    }

    pub fn resolve(&self, from: &BaseType, to: &TypeDescriptor) -> Option<BoundConverter> {
        let picked = self.pick(from, to);
        match &picked {
            Some(bound) => tracing::debug!(%from, %to, converter = bound.name(), "resolved converter"),
            None => tracing::debug!(%from, %to, "no converter"),
        }
        picked
    }

    fn pick(&self, from: &BaseType, to: &TypeDescriptor) -> Option<BoundConverter> {
        if !to.is_parameterized() && to.base().is_assignable_from(from) {
            return Some(BoundConverter::identity(to.clone()));
        }
        let mut first_builtin: Option<&ConverterEntry> = None;
        for entry in &self.converters {
            if !entry.converter.can_convert(from, to.base()) {
                continue;
            }
            if !entry.builtin {
                return Some(BoundConverter::registered(entry.converter.clone(), false, to.clone()));
            }
            first_builtin.get_or_insert(entry);
        }
        if let Some(entry) = first_builtin {
            return Some(BoundConverter::registered(entry.converter.clone(), true, to.clone()));
        }
        CustomTypeConverter
            .can_convert(from, to.base())
            .then(|| BoundConverter::custom_type(to.clone()))
    }

    /// Pick one writer among `candidates` for a value of runtime type `from`.
    ///
    /// A user-registered converter wins at once. Otherwise the first candidate
    /// with any library converter wins, and the object-to-object fallback only
    /// counts when nothing else resolved.
    pub fn resolve_candidates(&self, from: &BaseType, candidates: &[Accessor]) -> Option<(Accessor, BoundConverter)> {
        let mut picked: Option<(Accessor, BoundConverter)> = None;
        let mut fallback: Option<(Accessor, BoundConverter)> = None;
        for candidate in candidates {
            let Some(bound) = self.pick(from, &candidate.value_type) else {
                continue;
            };
            if bound.is_user_registered() {
                tracing::debug!(writer = candidate.name(), converter = bound.name(), "picked user converter");
                return Some((candidate.clone(), bound));
            }
            if matches!(bound.kind, Converter::CustomType) {
                if picked.is_none() && fallback.is_none() {
                    fallback = Some((candidate.clone(), bound));
                }
            } else if picked.is_none() {
                picked = Some((candidate.clone(), bound));
            }
        }
        let chosen = picked.or(fallback);
        match &chosen {
            Some((writer, bound)) => tracing::debug!(writer = writer.name(), converter = bound.name(), "picked candidate"),
            None => tracing::debug!(%from, candidates = candidates.len(), "no candidate convertible"),
        }
        chosen
    }
}

// ─────────────────────────────────────────────────────────────────────────────

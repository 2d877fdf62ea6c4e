//! Reader → writer matching for one donor value.
//!
//! Order of preference:
//!   1. a custom mapping from the overlay, when its writer can take the value
//!   2. a name-matching writer of exactly the value's type
//!   3. the first name-matching writer whose type accepts the value
//!   4. candidate-list resolution over the name-matching writers seen
//!
//! Names match exactly, or after stripping the reader prefix from the reader
//! and/or the writer prefix from the writer: `getName` feeds `setName`,
//! `name` and `set_name` alike.

use crate::convert::BoundConverter;
use crate::resolve::resolver::ConverterResolver;
use crate::runtime::value::Value;
use crate::types::accessor::{Accessor, AccessorKind, MethodRef};
use crate::types::descriptor::{BaseType, TypeDescriptor};
use crate::types::signature::ExecutableTypeResolver;

/// A writer to feed and the converter to run on the value first. `None`
/// means the value is stored unchanged.
#[derive(Debug, Clone)]
pub struct MappedAccessorPair {
    pub writer:    Accessor,
    pub converter: Option<BoundConverter>,
}

impl MappedAccessorPair {
    fn direct(writer: &Accessor) -> Self {
        Self { writer: writer.clone(), converter: None }
    }

    fn converted(writer: &Accessor, converter: BoundConverter) -> Self {
        Self { writer: writer.clone(), converter: Some(converter) }
    }
}

pub struct GetterSetterMapper<'a> {
    pub resolver:      &'a ConverterResolver,
    pub types:         &'a dyn ExecutableTypeResolver,
    pub reader_prefix: &'a str,
    pub writer_prefix: &'a str,
}

impl GetterSetterMapper<'_> {
    /// `overridden` is the overlay's writer for this reader, if one exists.
    /// When no converter fits that writer, name matching takes over.
    /// `None` means the value is deliberately not copied.
    pub fn map(
        &self,
        reader:     &Accessor,
        value:      &Value,
        acceptor:   &TypeDescriptor,
        writers:    &[Accessor],
        overridden: Option<MethodRef>,
    ) -> Option<MappedAccessorPair> {
        let runtime = value.runtime_type();
        let custom = overridden.and_then(|writer| {
            tracing::debug!(reader = reader.name(), %acceptor, "using custom mapping");
            let pair = self.map_custom(writer, &runtime, acceptor);
            if pair.is_none() {
                tracing::debug!(reader = reader.name(), "custom mapping cannot take the value, matching by name");
            }
            pair
        });
        let mapped = custom.or_else(|| self.map_by_name(reader.name(), &runtime, writers));
        match &mapped {
            Some(pair) => tracing::debug!(
                reader = reader.name(),
                writer = pair.writer.name(),
                converter = pair.converter.as_ref().map_or("none", |c| c.name()),
                "mapped reader"
            ),
            None => tracing::debug!(reader = reader.name(), "no matching writer"),
        }
        mapped
    }

    fn map_custom(&self, writer: MethodRef, runtime: &BaseType, acceptor: &TypeDescriptor) -> Option<MappedAccessorPair> {
        let value_type = self.types.parameter_types(&writer, acceptor).into_iter().next()?;
        let accessor = Accessor { method: writer, kind: AccessorKind::Writer, value_type };
        if !accessor.value_type.is_parameterized() && accessor.value_type.base().is_assignable_from(runtime) {
            return Some(MappedAccessorPair::direct(&accessor));
        }
        self.resolver
            .resolve_candidates(runtime, std::slice::from_ref(&accessor))
            .map(|(writer, converter)| MappedAccessorPair::converted(&writer, converter))
    }

    fn map_by_name(&self, reader: &str, runtime: &BaseType, writers: &[Accessor]) -> Option<MappedAccessorPair> {
        let mut best: Option<MappedAccessorPair> = None;
        let mut candidates: Vec<Accessor> = Vec::new();
        for writer in writers.iter().filter(|w| self.names_match(reader, w.name())) {
            if let Some(pair) = self.same_type(writer, runtime) {
                return Some(pair);
            }
            if best.is_none() {
                best = self.assignable_type(writer, runtime);
                candidates.push(writer.clone());
            }
        }
        best.or_else(|| {
            self.resolver
                .resolve_candidates(runtime, &candidates)
                .map(|(writer, converter)| MappedAccessorPair::converted(&writer, converter))
        })
    }

    fn same_type(&self, writer: &Accessor, runtime: &BaseType) -> Option<MappedAccessorPair> {
        if writer.value_type.base() != runtime {
            return None;
        }
        self.pair_for(writer, runtime)
    }

    fn assignable_type(&self, writer: &Accessor, runtime: &BaseType) -> Option<MappedAccessorPair> {
        if !writer.value_type.base().is_assignable_from(runtime) {
            return None;
        }
        self.pair_for(writer, runtime)
    }

    fn pair_for(&self, writer: &Accessor, runtime: &BaseType) -> Option<MappedAccessorPair> {
        if !writer.value_type.is_parameterized() {
            return Some(MappedAccessorPair::direct(writer));
        }
        self.resolver
            .resolve(runtime, &writer.value_type)
            .map(|converter| MappedAccessorPair::converted(writer, converter))
    }

    fn names_match(&self, reader: &str, writer: &str) -> bool {
        if reader == writer {
            return true;
        }
        let bare_reader = strip_prefix(reader, self.reader_prefix);
        let bare_writer = strip_prefix(writer, self.writer_prefix);
        bare_reader == writer || reader == bare_writer || bare_reader == bare_writer
    }
}

/// `getFirstName` → `firstName`, `get_first_name` → `first_name`. Names
/// without the prefix, or consisting of nothing but it, come back unchanged.
pub fn strip_prefix(name: &str, prefix: &str) -> String {
    let Some(rest) = name.strip_prefix(prefix) else {
        return name.to_string();
    };
    let rest = rest.strip_prefix('_').unwrap_or(rest);
    let mut chars = rest.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => name.to_string(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────

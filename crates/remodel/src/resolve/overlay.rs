//! Custom reader → writer mappings, grouped by acceptor type.
//!
//! Nodes are kept so that a subtype's node precedes its supertypes' nodes.
//! Lookup only consults the node of exactly the queried acceptor type; an
//! acceptor merely assignable to a registered type does not inherit it.

use std::collections::HashMap;

use crate::error::ConvertError;
use crate::types::accessor::MethodRef;
use crate::types::descriptor::{BaseType, TypeDescriptor};

struct OverlayNode {
    acceptor: TypeDescriptor,
    mappings: HashMap<MethodRef, MethodRef>,
}

#[derive(Default)]
pub struct MappingOverlay {
    nodes: Vec<OverlayNode>,
}

impl MappingOverlay {
    pub fn new() -> Self { Self::default() }

    pub fn register(&mut self, reader: &MethodRef, writer: &MethodRef, acceptor: &TypeDescriptor) -> Result<(), ConvertError> {
        validate(reader, writer, acceptor)?;
        let index = match self.nodes.iter().position(|n| n.acceptor == *acceptor) {
            Some(i) => i,
            None => self.insert_node(acceptor),
        };
        self.nodes[index].mappings.insert(reader.clone(), writer.clone());
        tracing::info!(%acceptor, %reader, %writer, "registered custom mapping");
        Ok(())
    }

    /// The writer mapped to `reader` for exactly `acceptor`, if any.
    pub fn lookup(&self, reader: &MethodRef, acceptor: &TypeDescriptor) -> Option<MethodRef> {
        self.nodes
            .iter()
            .filter(|n| n.acceptor == *acceptor)
            .find_map(|n| n.mappings.get(reader).cloned())
    }

    /// Node acceptor types in lookup order.
    pub fn acceptors(&self) -> Vec<&TypeDescriptor> {
        self.nodes.iter().map(|n| &n.acceptor).collect()
    }

    fn insert_node(&mut self, acceptor: &TypeDescriptor) -> usize {
        let mut index = self.nodes.len();
        for (i, node) in self.nodes.iter().enumerate() {
            if node.acceptor.accepts(acceptor) {
                index = i;
                break;
            }
            if acceptor.accepts(&node.acceptor) {
                index = i + 1;
            }
        }
        self.nodes.insert(index, OverlayNode { acceptor: acceptor.clone(), mappings: HashMap::new() });
        index
    }
}

fn validate(reader: &MethodRef, writer: &MethodRef, acceptor: &TypeDescriptor) -> Result<(), ConvertError> {
    if reader.desc().ret.is_none() {
        return Err(ConvertError::invalid_mapping(format!("reader {reader} must return a value")));
    }
    if reader.arity() != 0 {
        return Err(ConvertError::invalid_mapping(format!("reader {reader} must take no arguments")));
    }
    if writer.arity() != 1 {
        return Err(ConvertError::invalid_mapping(format!("writer {writer} must take exactly one argument")));
    }
    if !BaseType::Class(writer.declaring().clone()).is_assignable_from(acceptor.base()) {
        return Err(ConvertError::invalid_mapping(format!(
            "writer {writer} is not declared in the hierarchy of {acceptor}"
        )));
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────

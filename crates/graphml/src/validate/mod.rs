//! Schema validation for GraphML documents.
//!
//! [`ValidationContext`] holds the lookup tables the decoder threads through
//! one decode pass: declared keys and identifiers seen so far. The same
//! tables back [`validate_document`], which checks a document built in code
//! before it is handed to the encoder (the encoder trusts its input).

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::ValidationError;
use crate::model::{Data, Document, Graph, Key, Node, Scope};

/// Key and identifier tables for one document.
///
/// Keys declared for [`Scope::All`] are visible to every element kind;
/// scope-specific keys only to elements of that kind, so a `data` reference
/// is checked against both tables. Element identifiers share one
/// document-wide namespace, separate from key identifiers.
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    keys_all: FxHashMap<String, Key>,
    keys: FxHashMap<(String, Scope), Key>,
    ids: FxHashSet<String>,
}

impl ValidationContext {
    /// Creates empty tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a key declaration.
    pub fn declare_key(&mut self, key: &Key) -> Result<(), ValidationError> {
        let duplicate = match key.scope {
            Scope::All => self.keys_all.contains_key(&key.id),
            scope => self.keys.contains_key(&(key.id.clone(), scope)),
        };
        if duplicate {
            return Err(ValidationError::DuplicateKey {
                id: key.id.clone(),
                scope: key.scope,
            });
        }
        match key.scope {
            Scope::All => self.keys_all.insert(key.id.clone(), key.clone()),
            scope => self.keys.insert((key.id.clone(), scope), key.clone()),
        };
        Ok(())
    }

    /// Looks up the key a `data` element under an element of `scope` refers to.
    ///
    /// A scope-specific declaration wins over a [`Scope::All`] one.
    pub fn resolve_key(&self, id: &str, scope: Scope) -> Result<&Key, ValidationError> {
        self.keys
            .get(&(id.to_owned(), scope))
            .or_else(|| self.keys_all.get(id))
            .ok_or_else(|| ValidationError::UnknownAttribute {
                key: id.to_owned(),
                scope,
            })
    }

    /// Records an element identifier. Absent and empty identifiers count as
    /// unassigned and are ignored.
    pub fn claim_id(&mut self, id: Option<&str>) -> Result<(), ValidationError> {
        let Some(id) = id.filter(|id| !id.is_empty()) else {
            return Ok(());
        };
        if !self.ids.insert(id.to_owned()) {
            return Err(ValidationError::DuplicateId { id: id.to_owned() });
        }
        Ok(())
    }

    /// Number of declared keys across both tables.
    pub fn key_count(&self) -> usize {
        self.keys_all.len() + self.keys.len()
    }

    /// Number of element identifiers claimed so far.
    pub fn id_count(&self) -> usize {
        self.ids.len()
    }
}

/// Validates a document's schema invariants.
///
/// Checks, in the order the encoder emits elements:
/// - no key is declared twice for the same scope
/// - no graph, node or edge identifier is used twice
/// - every `data` element references a key declared for its scope or for all
///
/// Nesting rules need no check here; the model's types already enforce them.
pub fn validate_document(doc: &Document) -> Result<(), ValidationError> {
    let mut ctx = ValidationContext::new();
    for key in &doc.keys {
        ctx.declare_key(key)?;
    }
    validate_data(&ctx, &doc.data, Scope::GraphMl)?;
    for graph in &doc.graphs {
        validate_graph(&mut ctx, graph)?;
    }
    Ok(())
}

fn validate_data(ctx: &ValidationContext, data: &[Data], scope: Scope) -> Result<(), ValidationError> {
    for d in data {
        ctx.resolve_key(&d.key, scope)?;
    }
    Ok(())
}

fn validate_graph(ctx: &mut ValidationContext, graph: &Graph) -> Result<(), ValidationError> {
    ctx.claim_id(graph.id())?;
    validate_data(ctx, &graph.data, Scope::Graph)?;
    for node in &graph.nodes {
        validate_node(ctx, node)?;
    }
    for edge in &graph.edges {
        ctx.claim_id(edge.id())?;
        validate_data(ctx, &edge.data, Scope::Edge)?;
    }
    Ok(())
}

fn validate_node(ctx: &mut ValidationContext, node: &Node) -> Result<(), ValidationError> {
    ctx.claim_id(node.id())?;
    validate_data(ctx, &node.data, Scope::Node)?;
    for graph in &node.graphs {
        validate_graph(ctx, graph)?;
    }
    Ok(())
}

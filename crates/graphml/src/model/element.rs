//! Element kinds and the attribute marshalling contract.

use crate::NAMESPACE;
use crate::error::DecodeError;
use crate::model::{Attr, Name};

/// The GraphML elements this crate models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    GraphMl,
    Key,
    /// `<default>` inside `<key>`.
    Default,
    Graph,
    Node,
    Edge,
    Data,
}

impl ElementKind {
    /// Returns the element's local name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::GraphMl => "graphml",
            ElementKind::Key => "key",
            ElementKind::Default => "default",
            ElementKind::Graph => "graph",
            ElementKind::Node => "node",
            ElementKind::Edge => "edge",
            ElementKind::Data => "data",
        }
    }

    /// Maps a resolved element name to a kind.
    ///
    /// Returns `None` for names outside the GraphML namespace and for
    /// GraphML elements this crate does not model (hyperedge, port, ...).
    pub fn from_name(name: &Name) -> Option<Self> {
        if name.namespace.as_deref() != Some(NAMESPACE) {
            return None;
        }
        match name.local() {
            "graphml" => Some(ElementKind::GraphMl),
            "key" => Some(ElementKind::Key),
            "default" => Some(ElementKind::Default),
            "graph" => Some(ElementKind::Graph),
            "node" => Some(ElementKind::Node),
            "edge" => Some(ElementKind::Edge),
            "data" => Some(ElementKind::Data),
            _ => None,
        }
    }
}

/// Attribute marshalling shared by every modeled element.
///
/// Known attribute names map to typed fields; everything else is kept in
/// source order and re-emitted after the typed fields.
pub trait Element {
    /// The element this type models.
    const KIND: ElementKind;

    /// Absorbs one raw attribute from the element's start tag.
    fn absorb_attr(&mut self, attr: Attr) -> Result<(), DecodeError>;

    /// Produces the attribute list for re-emission, in canonical order.
    fn attrs(&self) -> Vec<Attr>;

    /// Absorbs every attribute of a start tag, in order.
    fn absorb_attrs(&mut self, attrs: Vec<Attr>) -> Result<(), DecodeError> {
        for attr in attrs {
            self.absorb_attr(attr)?;
        }
        Ok(())
    }
}

/// Attributes common to graphs, nodes and edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Object {
    /// Document-wide unique identifier.
    pub id: Option<String>,
    /// Attributes without a typed field, in source order.
    pub unrecognized: Vec<Attr>,
}

impl Object {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            unrecognized: Vec::new(),
        }
    }

    pub(crate) fn absorb_attr(&mut self, attr: Attr) {
        if attr.name == "id" {
            self.id = Some(attr.value);
        } else {
            self.unrecognized.push(attr);
        }
    }

    /// Starts an attribute list with the `id`, if any.
    pub(crate) fn leading_attrs(&self, capacity: usize) -> Vec<Attr> {
        let mut attrs = Vec::with_capacity(capacity + self.unrecognized.len() + 1);
        if let Some(id) = &self.id {
            attrs.push(Attr::new("id", id.as_str()));
        }
        attrs
    }

    pub(crate) fn trailing_attrs(&self, attrs: &mut Vec<Attr>) {
        attrs.extend(self.unrecognized.iter().cloned());
    }
}

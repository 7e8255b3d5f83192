//! Custom attribute declarations.

use std::fmt;

use crate::error::DecodeError;
use crate::model::{Attr, Element, ElementKind, Payload};

/// The element kind a key may be attached to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Visible to every element kind. Also used when `for` is absent.
    #[default]
    All,
    GraphMl,
    Graph,
    Node,
    Edge,
    HyperEdge,
    Port,
    Endpoint,
}

impl Scope {
    /// Returns the wire literal (e.g., "node").
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::All => "all",
            Scope::GraphMl => "graphml",
            Scope::Graph => "graph",
            Scope::Node => "node",
            Scope::Edge => "edge",
            Scope::HyperEdge => "hyperedge",
            Scope::Port => "port",
            Scope::Endpoint => "endpoint",
        }
    }

    /// Parses a `for` literal. The empty string means [`Scope::All`].
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "" | "all" => Some(Scope::All),
            "graphml" => Some(Scope::GraphMl),
            "graph" => Some(Scope::Graph),
            "node" => Some(Scope::Node),
            "edge" => Some(Scope::Edge),
            "hyperedge" => Some(Scope::HyperEdge),
            "port" => Some(Scope::Port),
            "endpoint" => Some(Scope::Endpoint),
            _ => None,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declaration of a custom attribute (`<key>`).
///
/// Key identifiers live in their own namespace: they are unique per scope
/// and never collide with graph, node or edge identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Key {
    pub id: String,
    pub scope: Scope,
    /// Display name (`attr.name`), empty when absent.
    pub name: String,
    /// Declared value type (`attr.type`), empty when absent. Not checked.
    pub ty: String,
    /// Content of the `<default>` child, kept verbatim.
    pub default: Option<Payload>,
    pub unrecognized: Vec<Attr>,
}

impl Key {
    /// Creates a key declaration.
    pub fn new(scope: Scope, id: impl Into<String>, name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            scope,
            name: name.into(),
            ty: ty.into(),
            default: None,
            unrecognized: Vec::new(),
        }
    }

    /// Sets the default value payload.
    pub fn with_default(mut self, default: Payload) -> Self {
        self.default = Some(default);
        self
    }
}

impl Element for Key {
    const KIND: ElementKind = ElementKind::Key;

    fn absorb_attr(&mut self, attr: Attr) -> Result<(), DecodeError> {
        match attr.name.as_str() {
            "id" => self.id = attr.value,
            "for" => {
                self.scope = Scope::parse(&attr.value).ok_or(DecodeError::InvalidValue {
                    element: "key",
                    attr: "for",
                    value: attr.value,
                })?;
            }
            "attr.name" => self.name = attr.value,
            "attr.type" => self.ty = attr.value,
            _ => self.unrecognized.push(attr),
        }
        Ok(())
    }

    fn attrs(&self) -> Vec<Attr> {
        let mut attrs = Vec::with_capacity(4 + self.unrecognized.len());
        attrs.push(Attr::new("id", self.id.as_str()));
        attrs.push(Attr::new("for", self.scope.as_str()));
        if !self.name.is_empty() {
            attrs.push(Attr::new("attr.name", self.name.as_str()));
        }
        if !self.ty.is_empty() {
            attrs.push(Attr::new("attr.type", self.ty.as_str()));
        }
        attrs.extend(self.unrecognized.iter().cloned());
        attrs
    }
}

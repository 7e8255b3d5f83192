//! Graphs, nodes and edges.

use crate::error::DecodeError;
use crate::model::{Attr, Data, Element, ElementKind, Object};

/// Default direction of a graph's edges (`edgedefault`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeDefault {
    Directed,
    Undirected,
}

impl EdgeDefault {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeDefault::Directed => "directed",
            EdgeDefault::Undirected => "undirected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "directed" => Some(EdgeDefault::Directed),
            "undirected" => Some(EdgeDefault::Undirected),
            _ => None,
        }
    }
}

/// A set of nodes and edges. Appears at top level or inside a node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    pub object: Object,
    pub data: Vec<Data>,
    pub edge_default: Option<EdgeDefault>,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new(id: impl Into<String>, edge_default: Option<EdgeDefault>) -> Self {
        Self {
            object: Object::with_id(id),
            edge_default,
            ..Default::default()
        }
    }

    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn with_edge(mut self, edge: Edge) -> Self {
        self.edges.push(edge);
        self
    }

    pub fn with_data(mut self, data: Data) -> Self {
        self.data.push(data);
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.object.id.as_deref()
    }

    pub(crate) fn has_children(&self) -> bool {
        !(self.data.is_empty() && self.nodes.is_empty() && self.edges.is_empty())
    }
}

impl Element for Graph {
    const KIND: ElementKind = ElementKind::Graph;

    fn absorb_attr(&mut self, attr: Attr) -> Result<(), DecodeError> {
        if attr.name == "edgedefault" {
            self.edge_default =
                Some(EdgeDefault::parse(&attr.value).ok_or(DecodeError::InvalidValue {
                    element: "graph",
                    attr: "edgedefault",
                    value: attr.value,
                })?);
        } else {
            self.object.absorb_attr(attr);
        }
        Ok(())
    }

    fn attrs(&self) -> Vec<Attr> {
        let mut attrs = self.object.leading_attrs(1);
        if let Some(dir) = self.edge_default {
            attrs.push(Attr::new("edgedefault", dir.as_str()));
        }
        self.object.trailing_attrs(&mut attrs);
        attrs
    }
}

/// A node. Nested graphs make it a subgraph container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub object: Object,
    pub data: Vec<Data>,
    pub graphs: Vec<Graph>,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            object: Object::with_id(id),
            ..Default::default()
        }
    }

    pub fn with_graph(mut self, graph: Graph) -> Self {
        self.graphs.push(graph);
        self
    }

    pub fn with_data(mut self, data: Data) -> Self {
        self.data.push(data);
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.object.id.as_deref()
    }

    pub(crate) fn has_children(&self) -> bool {
        !(self.data.is_empty() && self.graphs.is_empty())
    }
}

impl Element for Node {
    const KIND: ElementKind = ElementKind::Node;

    fn absorb_attr(&mut self, attr: Attr) -> Result<(), DecodeError> {
        self.object.absorb_attr(attr);
        Ok(())
    }

    fn attrs(&self) -> Vec<Attr> {
        let mut attrs = self.object.leading_attrs(0);
        self.object.trailing_attrs(&mut attrs);
        attrs
    }
}

/// A connection between two nodes.
///
/// `source` and `target` are stored as written; they are not resolved
/// against node identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Edge {
    pub object: Object,
    pub data: Vec<Data>,
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.object.id = Some(id.into());
        self
    }

    pub fn with_data(mut self, data: Data) -> Self {
        self.data.push(data);
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.object.id.as_deref()
    }
}

impl Element for Edge {
    const KIND: ElementKind = ElementKind::Edge;

    fn absorb_attr(&mut self, attr: Attr) -> Result<(), DecodeError> {
        match attr.name.as_str() {
            "source" => self.source = attr.value,
            "target" => self.target = attr.value,
            _ => self.object.absorb_attr(attr),
        }
        Ok(())
    }

    fn attrs(&self) -> Vec<Attr> {
        let mut attrs = self.object.leading_attrs(2);
        attrs.push(Attr::new("source", self.source.as_str()));
        attrs.push(Attr::new("target", self.target.as_str()));
        self.object.trailing_attrs(&mut attrs);
        attrs
    }
}

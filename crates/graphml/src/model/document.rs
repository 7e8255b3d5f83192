//! The document root.

use crate::NAMESPACE;
use crate::model::{Attr, Data, Graph, Key, ProcInst};

/// A self-contained GraphML document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Processing instructions before the root element, XML declaration
    /// included, in source order.
    pub instructions: Vec<ProcInst>,
    /// Namespace prefix of the root element (`g` for `<g:graphml>`). The
    /// encoder writes every structural element with it.
    pub prefix: Option<String>,
    /// Attributes of the root element as written, namespace declarations
    /// included.
    pub attrs: Vec<Attr>,
    pub keys: Vec<Key>,
    pub graphs: Vec<Graph>,
    /// Custom attributes of the document itself.
    pub data: Vec<Data>,
}

impl Document {
    /// Creates an empty document with an XML declaration and the default
    /// GraphML namespace.
    pub fn new() -> Self {
        Self {
            instructions: vec![ProcInst::xml_declaration()],
            attrs: vec![Attr::new("xmlns", NAMESPACE)],
            ..Default::default()
        }
    }

    pub fn with_key(mut self, key: Key) -> Self {
        self.keys.push(key);
        self
    }

    pub fn with_graph(mut self, graph: Graph) -> Self {
        self.graphs.push(graph);
        self
    }

    pub fn with_data(mut self, data: Data) -> Self {
        self.data.push(data);
        self
    }

    pub(crate) fn has_children(&self) -> bool {
        !(self.keys.is_empty() && self.data.is_empty() && self.graphs.is_empty())
    }
}

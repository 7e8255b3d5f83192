//! Document encoding.
//!
//! The inverse walk of the decoder: elements are emitted in the order they
//! are stored, attributes in each element's canonical order, and payloads
//! replayed token by token. No validation happens here; use
//! [`validate_document`](crate::validate_document) for documents built in
//! code.

use std::io::Write;

use log::debug;

use crate::codec::stream::{TokenSink, XmlWriter};
use crate::error::EncodeError;
use crate::model::{
    Attr, Data, Document, Edge, Element, ElementKind, Graph, Key, Name, Node, Payload, StartTag,
    Token,
};

/// Options for encoding documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodeOptions {
    /// Indentation width for structural elements.
    ///
    /// When set, a newline and `depth * width` spaces are written before
    /// each structural tag. Payloads are never reformatted, so decoding
    /// indented output yields the same document as decoding compact output.
    pub indent: Option<usize>,
}

impl EncodeOptions {
    /// Creates default (compact) encoding options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options indenting by two spaces.
    pub fn pretty() -> Self {
        Self { indent: Some(2) }
    }
}

/// Encodes a document to a writer.
pub fn encode_document<W: Write>(writer: W, doc: &Document) -> Result<(), EncodeError> {
    encode_document_with_options(writer, doc, &EncodeOptions::default())
}

/// Encodes a document to a writer with the given options.
pub fn encode_document_with_options<W: Write>(
    writer: W,
    doc: &Document,
    options: &EncodeOptions,
) -> Result<(), EncodeError> {
    let mut sink = XmlWriter::new(writer);
    encode_document_to(&mut sink, doc, options)
}

/// Encodes a document to a string.
pub fn encode_document_to_string(doc: &Document) -> Result<String, EncodeError> {
    let mut out = Vec::new();
    encode_document(&mut out, doc)?;
    Ok(String::from_utf8(out)?)
}

/// Encodes a document to any token sink, flushing it on success.
pub fn encode_document_to<S: TokenSink + ?Sized>(
    sink: &mut S,
    doc: &Document,
    options: &EncodeOptions,
) -> Result<(), EncodeError> {
    let mut encoder = DocumentEncoder {
        sink: &mut *sink,
        prefix: doc.prefix.as_deref(),
        indent: options.indent,
        depth: 0,
        started: false,
        written: 0,
    };
    encoder.encode(doc)?;
    debug!("encoded graphml document: {} tokens", encoder.written);
    sink.flush()
}

struct DocumentEncoder<'a, S: ?Sized> {
    sink: &'a mut S,
    prefix: Option<&'a str>,
    indent: Option<usize>,
    depth: usize,
    /// Whether anything has been written yet.
    started: bool,
    written: usize,
}

impl<S: TokenSink + ?Sized> DocumentEncoder<'_, S> {
    fn token(&mut self, token: &Token) -> Result<(), EncodeError> {
        self.started = true;
        self.written += 1;
        self.sink.write_token(token)
    }

    /// Structural element name, qualified with the document's prefix.
    fn name(&self, kind: ElementKind) -> Name {
        match self.prefix {
            Some(prefix) => Name::new(format!("{}:{}", prefix, kind.as_str())),
            None => Name::new(kind.as_str()),
        }
    }

    fn line_break(&mut self) -> Result<(), EncodeError> {
        if let Some(width) = self.indent {
            if self.started {
                let text = format!("\n{}", " ".repeat(self.depth * width));
                self.token(&Token::Text(text))?;
            }
        }
        Ok(())
    }

    /// Opens a structural element; childless elements are written empty.
    fn open(&mut self, kind: ElementKind, attrs: Vec<Attr>, has_children: bool) -> Result<(), EncodeError> {
        self.line_break()?;
        let tag = StartTag::new(self.name(kind), attrs);
        if has_children {
            self.depth += 1;
            self.token(&Token::Start(tag))
        } else {
            self.token(&Token::Empty(tag))
        }
    }

    /// Closes an element opened with children.
    fn close(&mut self, kind: ElementKind) -> Result<(), EncodeError> {
        self.depth -= 1;
        self.line_break()?;
        self.token(&Token::End(self.name(kind)))
    }

    /// Writes a payload-carrying element. Nothing is inserted between the
    /// tags and the payload.
    fn payload_element(&mut self, kind: ElementKind, attrs: Vec<Attr>, payload: &Payload) -> Result<(), EncodeError> {
        self.open(kind, attrs, !payload.is_empty())?;
        if payload.is_empty() {
            return Ok(());
        }
        for token in payload.tokens() {
            self.token(token)?;
        }
        self.depth -= 1;
        self.token(&Token::End(self.name(kind)))
    }

    fn encode(&mut self, doc: &Document) -> Result<(), EncodeError> {
        for pi in &doc.instructions {
            self.token(&Token::ProcInst(pi.clone()))?;
        }
        let has_children = doc.has_children();
        self.open(ElementKind::GraphMl, doc.attrs.clone(), has_children)?;
        for key in &doc.keys {
            self.encode_key(key)?;
        }
        self.encode_data(&doc.data)?;
        for graph in &doc.graphs {
            self.encode_graph(graph)?;
        }
        if has_children {
            self.close(ElementKind::GraphMl)?;
        }
        if self.indent.is_some() {
            self.token(&Token::Text("\n".to_string()))?;
        }
        Ok(())
    }

    fn encode_key(&mut self, key: &Key) -> Result<(), EncodeError> {
        match &key.default {
            None => self.open(Key::KIND, key.attrs(), false),
            Some(default) => {
                self.open(Key::KIND, key.attrs(), true)?;
                self.payload_element(ElementKind::Default, Vec::new(), default)?;
                self.close(Key::KIND)
            }
        }
    }

    fn encode_data(&mut self, data: &[Data]) -> Result<(), EncodeError> {
        for d in data {
            self.payload_element(Data::KIND, d.attrs(), &d.payload)?;
        }
        Ok(())
    }

    fn encode_graph(&mut self, graph: &Graph) -> Result<(), EncodeError> {
        let has_children = graph.has_children();
        self.open(Graph::KIND, graph.attrs(), has_children)?;
        self.encode_data(&graph.data)?;
        for node in &graph.nodes {
            self.encode_node(node)?;
        }
        for edge in &graph.edges {
            self.encode_edge(edge)?;
        }
        if has_children {
            self.close(Graph::KIND)?;
        }
        Ok(())
    }

    fn encode_node(&mut self, node: &Node) -> Result<(), EncodeError> {
        let has_children = node.has_children();
        self.open(Node::KIND, node.attrs(), has_children)?;
        self.encode_data(&node.data)?;
        for graph in &node.graphs {
            self.encode_graph(graph)?;
        }
        if has_children {
            self.close(Node::KIND)?;
        }
        Ok(())
    }

    fn encode_edge(&mut self, edge: &Edge) -> Result<(), EncodeError> {
        let has_children = !edge.data.is_empty();
        self.open(Edge::KIND, edge.attrs(), has_children)?;
        self.encode_data(&edge.data)?;
        if has_children {
            self.close(Edge::KIND)?;
        }
        Ok(())
    }
}

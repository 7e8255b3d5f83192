//! Document decoding.
//!
//! Recursive descent over a [`TokenSource`], one handler per element kind.
//! Each handler loops until its closing tag, dropping comments and
//! whitespace, dispatching child elements, and rejecting anything else.
//! `<data>` and `<default>` content is captured verbatim instead.

use std::io::BufRead;

use log::{debug, trace};

use crate::codec::stream::{TokenSource, XmlReader};
use crate::error::DecodeError;
use crate::limits::MAX_NESTING_DEPTH;
use crate::model::{
    Data, Document, Edge, Element, ElementKind, Graph, Key, Name, Node, Payload, Scope, StartTag,
    Token,
};
use crate::validate::ValidationContext;

/// Options for decoding documents.
#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions {
    /// Maximum nesting depth of graph and node elements.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: MAX_NESTING_DEPTH,
        }
    }
}

impl DecodeOptions {
    /// Creates default decoding options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Decodes a GraphML document from a reader.
pub fn decode_document<R: BufRead>(reader: R) -> Result<Document, DecodeError> {
    decode_document_with_options(reader, &DecodeOptions::default())
}

/// Decodes a GraphML document from a string.
pub fn decode_document_str(input: &str) -> Result<Document, DecodeError> {
    decode_document_from(&mut XmlReader::from_text(input), &DecodeOptions::default())
}

/// Decodes a GraphML document from a reader with the given options.
pub fn decode_document_with_options<R: BufRead>(
    reader: R,
    options: &DecodeOptions,
) -> Result<Document, DecodeError> {
    let mut source = XmlReader::new(reader);
    decode_document_from(&mut source, options)
}

/// Decodes a GraphML document from any token source.
///
/// The document is returned only once the root element has closed; on error
/// nothing decoded so far is exposed. Tokens after the root are not read.
pub fn decode_document_from<S: TokenSource + ?Sized>(
    source: &mut S,
    options: &DecodeOptions,
) -> Result<Document, DecodeError> {
    let mut ctx = ValidationContext::new();
    let mut decoder = DocumentDecoder {
        source,
        max_depth: options.max_depth,
        depth: 0,
    };
    let doc = decoder.decode(&mut ctx)?;
    debug!(
        "decoded graphml document: {} keys, {} graphs, {} element ids",
        ctx.key_count(),
        doc.graphs.len(),
        ctx.id_count()
    );
    Ok(doc)
}

/// A child element of the element being decoded.
struct Child {
    kind: ElementKind,
    tag: StartTag,
    /// Written as `<name/>`: no content and no closing tag follow.
    empty: bool,
}

impl Child {
    fn unexpected(self, parent: &Name) -> DecodeError {
        DecodeError::UnexpectedElement {
            parent: parent.qualified.clone(),
            element: self.tag.name.qualified,
        }
    }
}

struct DocumentDecoder<'a, S: ?Sized> {
    source: &'a mut S,
    max_depth: usize,
    depth: usize,
}

impl<S: TokenSource + ?Sized> DocumentDecoder<'_, S> {
    /// Pulls the next token inside `open`.
    fn token(&mut self, open: &Name) -> Result<Token, DecodeError> {
        self.source
            .next_token()?
            .ok_or_else(|| DecodeError::PrematureEnd {
                element: open.qualified.clone(),
            })
    }

    /// Returns the next child element of `open`, or `None` once `open` closes.
    fn next_child(&mut self, open: &Name) -> Result<Option<Child>, DecodeError> {
        loop {
            let token = self.token(open)?;
            if token.is_skippable() {
                continue;
            }
            return match token {
                Token::Start(tag) => child(open, tag, false).map(Some),
                Token::Empty(tag) => child(open, tag, true).map(Some),
                Token::End(name) if name.qualified == open.qualified => Ok(None),
                Token::End(name) => Err(DecodeError::MismatchedEnd {
                    expected: open.qualified.clone(),
                    found: name.qualified,
                }),
                other => Err(DecodeError::UnexpectedToken {
                    element: open.qualified.clone(),
                    token: other.describe(),
                }),
            };
        }
    }

    /// Enters one level of graph/node nesting.
    fn descend(&mut self) -> Result<(), DecodeError> {
        if self.depth >= self.max_depth {
            return Err(DecodeError::DepthExceeded {
                max: self.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn decode(&mut self, ctx: &mut ValidationContext) -> Result<Document, DecodeError> {
        let mut doc = Document::default();
        let root = self.start_root(&mut doc)?;
        let StartTag { name, attrs } = root.tag;
        doc.prefix = name.prefix().map(str::to_owned);
        doc.attrs = attrs;
        if root.empty {
            return Ok(doc);
        }

        while let Some(child) = self.next_child(&name)? {
            match child.kind {
                ElementKind::Key => {
                    let key = self.decode_key(child, ctx)?;
                    doc.keys.push(key);
                }
                ElementKind::Graph => {
                    let graph = self.decode_graph(child, ctx)?;
                    doc.graphs.push(graph);
                }
                ElementKind::Data => {
                    let data = self.decode_data(child, Scope::GraphMl, ctx)?;
                    doc.data.push(data);
                }
                _ => return Err(child.unexpected(&name)),
            }
        }
        Ok(doc)
    }

    /// Skips the prologue up to the root element, recording processing
    /// instructions on the way.
    fn start_root(&mut self, doc: &mut Document) -> Result<Child, DecodeError> {
        loop {
            let Some(token) = self.source.next_token()? else {
                return Err(DecodeError::MalformedRoot { found: None });
            };
            if token.is_skippable() {
                continue;
            }
            let (tag, empty) = match token {
                Token::ProcInst(pi) => {
                    doc.instructions.push(pi);
                    continue;
                }
                Token::DocType(_) => continue,
                Token::Start(tag) => (tag, false),
                Token::Empty(tag) => (tag, true),
                other => {
                    return Err(DecodeError::MalformedRoot {
                        found: Some(other.describe()),
                    });
                }
            };
            return match ElementKind::from_name(&tag.name) {
                Some(kind @ ElementKind::GraphMl) => Ok(Child { kind, tag, empty }),
                _ => Err(DecodeError::MalformedRoot {
                    found: Some(tag.name.qualified),
                }),
            };
        }
    }

    fn decode_key(&mut self, child: Child, ctx: &mut ValidationContext) -> Result<Key, DecodeError> {
        let StartTag { name, attrs } = child.tag;
        if !attrs.iter().any(|a| a.name == "id") {
            return Err(DecodeError::MissingAttribute {
                element: "key",
                attr: "id",
            });
        }
        let mut key = Key::default();
        key.absorb_attrs(attrs)?;
        ctx.declare_key(&key)?;
        trace!("declared key {:?} for {}", key.id, key.scope);
        if child.empty {
            return Ok(key);
        }

        while let Some(grandchild) = self.next_child(&name)? {
            match grandchild.kind {
                ElementKind::Default if key.default.is_none() => {
                    key.default = Some(self.capture(grandchild)?);
                }
                _ => return Err(grandchild.unexpected(&name)),
            }
        }
        Ok(key)
    }

    fn decode_graph(&mut self, child: Child, ctx: &mut ValidationContext) -> Result<Graph, DecodeError> {
        self.descend()?;
        let StartTag { name, attrs } = child.tag;
        let mut graph = Graph::default();
        graph.absorb_attrs(attrs)?;
        ctx.claim_id(graph.id())?;

        if !child.empty {
            while let Some(child) = self.next_child(&name)? {
                match child.kind {
                    ElementKind::Data => {
                        let data = self.decode_data(child, Scope::Graph, ctx)?;
                        graph.data.push(data);
                    }
                    ElementKind::Node => {
                        let node = self.decode_node(child, ctx)?;
                        graph.nodes.push(node);
                    }
                    ElementKind::Edge => {
                        let edge = self.decode_edge(child, ctx)?;
                        graph.edges.push(edge);
                    }
                    _ => return Err(child.unexpected(&name)),
                }
            }
        }
        self.depth -= 1;
        Ok(graph)
    }

    fn decode_node(&mut self, child: Child, ctx: &mut ValidationContext) -> Result<Node, DecodeError> {
        self.descend()?;
        let StartTag { name, attrs } = child.tag;
        let mut node = Node::default();
        node.absorb_attrs(attrs)?;
        ctx.claim_id(node.id())?;

        if !child.empty {
            while let Some(child) = self.next_child(&name)? {
                match child.kind {
                    ElementKind::Data => {
                        let data = self.decode_data(child, Scope::Node, ctx)?;
                        node.data.push(data);
                    }
                    ElementKind::Graph => {
                        let graph = self.decode_graph(child, ctx)?;
                        node.graphs.push(graph);
                    }
                    _ => return Err(child.unexpected(&name)),
                }
            }
        }
        self.depth -= 1;
        Ok(node)
    }

    fn decode_edge(&mut self, child: Child, ctx: &mut ValidationContext) -> Result<Edge, DecodeError> {
        let StartTag { name, attrs } = child.tag;
        let mut edge = Edge::default();
        edge.absorb_attrs(attrs)?;
        ctx.claim_id(edge.id())?;

        if !child.empty {
            while let Some(child) = self.next_child(&name)? {
                match child.kind {
                    ElementKind::Data => {
                        let data = self.decode_data(child, Scope::Edge, ctx)?;
                        edge.data.push(data);
                    }
                    _ => return Err(child.unexpected(&name)),
                }
            }
        }
        Ok(edge)
    }

    fn decode_data(
        &mut self,
        mut child: Child,
        scope: Scope,
        ctx: &mut ValidationContext,
    ) -> Result<Data, DecodeError> {
        if child.tag.attr("key").is_none() {
            return Err(DecodeError::MissingAttribute {
                element: "data",
                attr: "key",
            });
        }
        let mut data = Data::default();
        data.absorb_attrs(std::mem::take(&mut child.tag.attrs))?;
        ctx.resolve_key(&data.key, scope)?;
        data.payload = self.capture(child)?;
        Ok(data)
    }

    /// Captures every token up to the child's closing tag, unfiltered.
    ///
    /// Open elements inside the payload are tracked by name, so a nested
    /// element with the same name as the child does not end the capture.
    fn capture(&mut self, child: Child) -> Result<Payload, DecodeError> {
        let mut payload = Payload::default();
        if child.empty {
            return Ok(payload);
        }
        let outer = child.tag.name;
        let mut open: Vec<Name> = Vec::new();
        loop {
            let token = self.token(open.last().unwrap_or(&outer))?;
            match &token {
                Token::Start(tag) => open.push(tag.name.clone()),
                Token::End(name) => match open.pop() {
                    Some(expected) if expected.qualified == name.qualified => {}
                    None if outer.qualified == name.qualified => return Ok(payload),
                    expected => {
                        return Err(DecodeError::MismatchedEnd {
                            expected: expected.unwrap_or(outer).qualified,
                            found: name.qualified.clone(),
                        });
                    }
                },
                _ => {}
            }
            payload.push(token);
        }
    }
}

fn child(open: &Name, tag: StartTag, empty: bool) -> Result<Child, DecodeError> {
    match ElementKind::from_name(&tag.name) {
        Some(kind) => Ok(Child { kind, tag, empty }),
        None => Err(DecodeError::UnexpectedElement {
            parent: open.qualified.clone(),
            element: tag.name.qualified,
        }),
    }
}

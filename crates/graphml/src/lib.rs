//! GraphML: lossless codec for the GraphML graph exchange format.
//!
//! This crate decodes GraphML documents into a typed tree, enforces the
//! schema rules GraphML places on custom attributes, and encodes the tree back
//! with the same element nesting and canonical attribute order.
//!
//! # Quick Start
//!
//! ```rust
//! use graphml::{decode_document_str, encode_document_to_string};
//!
//! let input = r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns">
//!   <key id="label" for="node" attr.name="label" attr.type="string"/>
//!   <graph id="G" edgedefault="directed">
//!     <node id="n0"><data key="label">first</data></node>
//!     <node id="n1"/>
//!     <edge source="n0" target="n1"/>
//!   </graph>
//! </graphml>"#;
//!
//! let doc = decode_document_str(input).unwrap();
//! assert_eq!(doc.graphs[0].nodes.len(), 2);
//!
//! let output = encode_document_to_string(&doc).unwrap();
//! assert_eq!(decode_document_str(&output).unwrap(), doc);
//! ```
//!
//! # Modules
//!
//! - [`model`]: Document tree (Document, Key, Graph, Node, Edge, Data) and the
//!   token vocabulary shared with the token source/sink
//! - [`codec`]: Decoder, encoder and the quick-xml backed token adapters
//! - [`validate`]: Key and identifier tables used during decoding
//! - [`error`]: Error types
//! - [`limits`]: Limits for decoding untrusted input
//!
//! # Custom attributes
//!
//! `<data>` content is never interpreted. Every event inside it, including
//! comments and whitespace, is kept as a [`Payload`] and replayed unchanged
//! on encode, which keeps the codec lossless for vendor extensions such as
//! yFiles graphics.

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;
pub mod validate;

// Re-export commonly used types at crate root
pub use codec::{
    DecodeOptions, EncodeOptions, TokenReader, TokenSink, TokenSource, XmlReader, XmlWriter,
    decode_document, decode_document_from, decode_document_str, decode_document_with_options,
    encode_document, encode_document_to, encode_document_to_string, encode_document_with_options,
};
pub use error::{DecodeError, EncodeError, ErrorKind, ValidationError};
pub use model::{
    Attr, Data, Document, Edge, EdgeDefault, Element, ElementKind, Graph, Key, Name, Node,
    Object, Payload, ProcInst, Scope, StartTag, Token,
};
pub use validate::{ValidationContext, validate_document};

/// File extension for GraphML files.
pub const EXT: &str = ".graphml";

/// Canonical XML namespace of GraphML elements.
pub const NAMESPACE: &str = "http://graphml.graphdrawing.org/xmlns";

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

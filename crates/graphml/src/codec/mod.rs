//! GraphML encoding/decoding.
//!
//! The decoder and encoder work against the [`TokenSource`] / [`TokenSink`]
//! pair in [`stream`]; the XML-backed adapters are the usual entry points.

pub mod decode;
pub mod encode;
pub mod stream;

pub use decode::{
    DecodeOptions, decode_document, decode_document_from, decode_document_str,
    decode_document_with_options,
};
pub use encode::{
    EncodeOptions, encode_document, encode_document_to, encode_document_to_string,
    encode_document_with_options,
};
pub use stream::{TokenReader, TokenSink, TokenSource, XmlReader, XmlWriter};

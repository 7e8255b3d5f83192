//! Document model for GraphML.
//!
//! This module contains the typed tree produced by the decoder and consumed
//! by the encoder:
//! - Document root and key declarations
//! - Graphs, nodes and edges
//! - Custom attribute data with raw payloads
//! - The token vocabulary shared with token sources and sinks

pub mod data;
pub mod document;
pub mod element;
pub mod graph;
pub mod key;
pub mod token;

pub use data::{Data, Payload};
pub use document::Document;
pub use element::{Element, ElementKind, Object};
pub use graph::{Edge, EdgeDefault, Graph, Node};
pub use key::{Key, Scope};
pub use token::{Attr, Name, ProcInst, StartTag, Token};

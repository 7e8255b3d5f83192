//! Custom attribute values and their replayable payloads.

use crate::codec::TokenReader;
use crate::error::DecodeError;
use crate::model::{Attr, Element, ElementKind, Token};

/// The raw content of a `<data>` or `<default>` element.
///
/// Every event between the opening and closing tag is kept, comments and
/// whitespace included, and replayed unchanged on encode. The content is
/// never interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    tokens: Vec<Token>,
}

impl Payload {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// Creates a payload holding a single text node (escaped as needed).
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        Self {
            tokens: vec![Token::text(text)],
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns a token source replaying the payload.
    pub fn reader(&self) -> TokenReader<'_> {
        TokenReader::new(&self.tokens)
    }

    /// Concatenates the unescaped text and CDATA content at every depth.
    pub fn text(&self) -> Result<String, DecodeError> {
        let mut out = String::new();
        for token in &self.tokens {
            if let Some(text) = token.unescaped_text()? {
                out.push_str(&text);
            }
        }
        Ok(out)
    }
}

impl From<Vec<Token>> for Payload {
    fn from(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }
}

impl FromIterator<Token> for Payload {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

/// A custom attribute value (`<data key="...">`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Data {
    /// Identifier of the declaring key.
    pub key: String,
    pub unrecognized: Vec<Attr>,
    pub payload: Payload,
}

impl Data {
    pub fn new(key: impl Into<String>, payload: Payload) -> Self {
        Self {
            key: key.into(),
            unrecognized: Vec::new(),
            payload,
        }
    }

    /// Creates a data element holding plain text.
    pub fn text(key: impl Into<String>, text: &str) -> Self {
        Self::new(key, Payload::from_text(text))
    }
}

impl Element for Data {
    const KIND: ElementKind = ElementKind::Data;

    fn absorb_attr(&mut self, attr: Attr) -> Result<(), DecodeError> {
        if attr.name == "key" {
            self.key = attr.value;
        } else {
            self.unrecognized.push(attr);
        }
        Ok(())
    }

    fn attrs(&self) -> Vec<Attr> {
        let mut attrs = Vec::with_capacity(1 + self.unrecognized.len());
        attrs.push(Attr::new("key", self.key.as_str()));
        attrs.extend(self.unrecognized.iter().cloned());
        attrs
    }
}

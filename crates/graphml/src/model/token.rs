//! Structural events exchanged with the token source and sink.
//!
//! The decoder consumes these, the encoder produces them, and `<data>`
//! payloads store them verbatim.

use std::borrow::Cow;
use std::fmt;

use quick_xml::escape::{escape, unescape};

use crate::error::DecodeError;

/// An element name.
///
/// `qualified` is the name exactly as written (`prefix:local` or `local`).
/// `namespace` is the URI the name resolved to; token sources fill it in,
/// sinks ignore it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name {
    pub qualified: String,
    pub namespace: Option<String>,
}

impl Name {
    /// Creates an unresolved name.
    pub fn new(qualified: impl Into<String>) -> Self {
        Self {
            qualified: qualified.into(),
            namespace: None,
        }
    }

    /// Creates a name resolved to the given namespace.
    pub fn with_namespace(qualified: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            qualified: qualified.into(),
            namespace: Some(namespace.into()),
        }
    }

    /// Returns the part after the prefix.
    pub fn local(&self) -> &str {
        match self.qualified.split_once(':') {
            Some((_, local)) => local,
            None => &self.qualified,
        }
    }

    /// Returns the prefix, if the name has one.
    pub fn prefix(&self) -> Option<&str> {
        self.qualified.split_once(':').map(|(prefix, _)| prefix)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified)
    }
}

/// A single attribute with its unescaped value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attr {
    /// Qualified attribute name as written.
    pub name: String,
    pub value: String,
}

impl Attr {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An opening tag and its attributes in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag {
    pub name: Name,
    pub attrs: Vec<Attr>,
}

impl StartTag {
    pub fn new(name: Name, attrs: Vec<Attr>) -> Self {
        Self { name, attrs }
    }

    /// Returns the value of the first attribute with the given name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }
}

/// A processing instruction, including the XML declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcInst {
    pub target: String,
    pub content: String,
}

impl ProcInst {
    pub fn new(target: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            content: content.into(),
        }
    }

    /// The standard `<?xml version="1.0" encoding="UTF-8"?>` declaration.
    pub fn xml_declaration() -> Self {
        Self::new("xml", r#"version="1.0" encoding="UTF-8""#)
    }

    /// Splits the raw text between `<?` and `?>` into target and content.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(|c: char| c.is_ascii_whitespace()) {
            Some((target, content)) => Self::new(target, content.trim_start()),
            None => Self::new(raw, ""),
        }
    }
}

impl fmt::Display for ProcInst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.content.is_empty() {
            f.write_str(&self.target)
        } else {
            write!(f, "{} {}", self.target, self.content)
        }
    }
}

/// A structural event.
///
/// `Text`, `Comment` and `DocType` hold their content exactly as it appeared
/// in the source, entity references included, so that replay reproduces the
/// source bytes. `CData` holds the section content without delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Start(StartTag),
    /// A self-closing element: `<name .../>`.
    Empty(StartTag),
    End(Name),
    Text(String),
    CData(String),
    Comment(String),
    ProcInst(ProcInst),
    DocType(String),
}

impl Token {
    /// Creates a text token from unescaped text.
    pub fn text(text: &str) -> Self {
        Token::Text(escape(text).into_owned())
    }

    /// True for tokens the decoder drops between structural elements:
    /// comments and whitespace-only text.
    pub fn is_skippable(&self) -> bool {
        match self {
            Token::Comment(_) => true,
            Token::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    /// Returns the unescaped character content of `Text` and `CData` tokens.
    pub fn unescaped_text(&self) -> Result<Option<Cow<'_, str>>, DecodeError> {
        match self {
            Token::Text(text) => Ok(Some(unescape(text)?)),
            Token::CData(text) => Ok(Some(Cow::Borrowed(text))),
            _ => Ok(None),
        }
    }

    /// Short description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::Start(tag) | Token::Empty(tag) => format!("element <{}>", tag.name),
            Token::End(name) => format!("closing tag </{name}>"),
            Token::Text(_) => "text".to_string(),
            Token::CData(_) => "CDATA section".to_string(),
            Token::Comment(_) => "comment".to_string(),
            Token::ProcInst(pi) => format!("processing instruction <?{}?>", pi.target),
            Token::DocType(_) => "DOCTYPE".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_parts() {
        let name = Name::new("y:ShapeNode");
        assert_eq!(name.prefix(), Some("y"));
        assert_eq!(name.local(), "ShapeNode");

        let name = Name::new("node");
        assert_eq!(name.prefix(), None);
        assert_eq!(name.local(), "node");
    }

    #[test]
    fn test_proc_inst_parse() {
        let pi = ProcInst::parse(r#"xml version="1.0" encoding="UTF-8""#);
        assert_eq!(pi.target, "xml");
        assert_eq!(pi.content, r#"version="1.0" encoding="UTF-8""#);
        assert_eq!(pi.to_string(), r#"xml version="1.0" encoding="UTF-8""#);

        let pi = ProcInst::parse("marker");
        assert_eq!(pi.target, "marker");
        assert_eq!(pi.content, "");
        assert_eq!(pi.to_string(), "marker");
    }

    #[test]
    fn test_skippable() {
        assert!(Token::Text(" \n\t ".to_string()).is_skippable());
        assert!(Token::Comment("note".to_string()).is_skippable());
        assert!(!Token::Text(" x ".to_string()).is_skippable());
        assert!(!Token::CData(" ".to_string()).is_skippable());
    }

    #[test]
    fn test_text_escapes() {
        let token = Token::text("a < b & c");
        assert_eq!(token, Token::Text("a &lt; b &amp; c".to_string()));
        assert_eq!(token.unescaped_text().unwrap().as_deref(), Some("a < b & c"));
    }
}

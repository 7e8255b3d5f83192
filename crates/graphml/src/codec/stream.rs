//! Token sources and sinks.
//!
//! The codec never tokenizes markup itself. [`XmlReader`] and [`XmlWriter`]
//! adapt quick-xml's namespace-aware reader and its writer to the
//! [`TokenSource`] / [`TokenSink`] pair; [`TokenReader`] and `Vec<Token>`
//! cover in-memory replay and capture.

use std::io::{BufRead, Write};

use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesCData, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;

use crate::error::{DecodeError, EncodeError};
use crate::model::{Attr, Name, ProcInst, StartTag, Token};

/// Pull interface yielding one structural event per call.
pub trait TokenSource {
    /// Returns the next token, or `None` at end of stream.
    fn next_token(&mut self) -> Result<Option<Token>, DecodeError>;
}

/// Push interface accepting one structural event per call.
pub trait TokenSink {
    fn write_token(&mut self, token: &Token) -> Result<(), EncodeError>;

    /// Flushes buffered output. Called once after a successful encode.
    fn flush(&mut self) -> Result<(), EncodeError> {
        Ok(())
    }
}

impl<S: TokenSource + ?Sized> TokenSource for &mut S {
    fn next_token(&mut self) -> Result<Option<Token>, DecodeError> {
        (**self).next_token()
    }
}

impl<S: TokenSink + ?Sized> TokenSink for &mut S {
    fn write_token(&mut self, token: &Token) -> Result<(), EncodeError> {
        (**self).write_token(token)
    }

    fn flush(&mut self) -> Result<(), EncodeError> {
        (**self).flush()
    }
}

// =============================================================================
// IN-MEMORY
// =============================================================================

/// Replays a token slice.
#[derive(Debug, Clone)]
pub struct TokenReader<'a> {
    tokens: &'a [Token],
}

impl<'a> TokenReader<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens }
    }

    /// Returns the tokens not yet replayed.
    pub fn remaining(&self) -> &'a [Token] {
        self.tokens
    }
}

impl TokenSource for TokenReader<'_> {
    fn next_token(&mut self) -> Result<Option<Token>, DecodeError> {
        match self.tokens.split_first() {
            Some((token, rest)) => {
                self.tokens = rest;
                Ok(Some(token.clone()))
            }
            None => Ok(None),
        }
    }
}

impl TokenSink for Vec<Token> {
    fn write_token(&mut self, token: &Token) -> Result<(), EncodeError> {
        self.push(token.clone());
        Ok(())
    }
}

// =============================================================================
// READING
// =============================================================================

/// Token source over quick-xml's namespace-aware reader.
///
/// Element names carry the namespace they resolved to. Text, comments and
/// DOCTYPE content are passed through still escaped; attribute values are
/// unescaped.
pub struct XmlReader<R> {
    reader: NsReader<R>,
    buf: Vec<u8>,
}

impl<R: BufRead> XmlReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            reader: NsReader::from_reader(inner),
            buf: Vec::new(),
        }
    }
}

impl<'a> XmlReader<&'a [u8]> {
    pub fn from_text(input: &'a str) -> Self {
        Self::new(input.as_bytes())
    }
}

impl<R: BufRead> TokenSource for XmlReader<R> {
    fn next_token(&mut self) -> Result<Option<Token>, DecodeError> {
        let decoder = self.reader.decoder();
        self.buf.clear();
        let (resolved, event) = self.reader.read_resolved_event_into(&mut self.buf)?;
        let namespace = match resolved {
            ResolveResult::Bound(ns) => Some(utf8(ns.as_ref(), "namespace")?.to_owned()),
            _ => None,
        };

        let token = match event {
            Event::Start(e) => Token::Start(start_tag(&e, namespace, decoder)?),
            Event::Empty(e) => Token::Empty(start_tag(&e, namespace, decoder)?),
            Event::End(e) => Token::End(Name {
                qualified: utf8(e.name().as_ref(), "element name")?.to_owned(),
                namespace,
            }),
            Event::Text(e) => Token::Text(utf8(&e, "text")?.to_owned()),
            Event::CData(e) => Token::CData(utf8(&e, "CDATA section")?.to_owned()),
            Event::Comment(e) => Token::Comment(utf8(&e, "comment")?.to_owned()),
            Event::Decl(e) => Token::ProcInst(ProcInst::parse(utf8(&e, "declaration")?)),
            Event::PI(e) => Token::ProcInst(ProcInst::parse(utf8(&e, "processing instruction")?)),
            Event::DocType(e) => Token::DocType(utf8(&e, "DOCTYPE")?.to_owned()),
            Event::Eof => return Ok(None),
        };
        Ok(Some(token))
    }
}

fn utf8<'b>(bytes: &'b [u8], context: &'static str) -> Result<&'b str, DecodeError> {
    std::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8 { context })
}

fn start_tag(
    e: &BytesStart<'_>,
    namespace: Option<String>,
    decoder: Decoder,
) -> Result<StartTag, DecodeError> {
    let name = Name {
        qualified: utf8(e.name().as_ref(), "element name")?.to_owned(),
        namespace,
    };
    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::InvalidAttr)?;
        let value = attr.decode_and_unescape_value(decoder)?;
        attrs.push(Attr::new(utf8(attr.key.as_ref(), "attribute name")?, value));
    }
    Ok(StartTag { name, attrs })
}

// =============================================================================
// WRITING
// =============================================================================

/// Token sink over quick-xml's writer.
///
/// Attribute values are escaped on write; text, comments and DOCTYPE content
/// are written as stored.
pub struct XmlWriter<W: Write> {
    writer: quick_xml::Writer<W>,
}

impl<W: Write> XmlWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: quick_xml::Writer::new(inner),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write> TokenSink for XmlWriter<W> {
    fn write_token(&mut self, token: &Token) -> Result<(), EncodeError> {
        let event = match token {
            Token::Start(tag) => Event::Start(bytes_start(tag)),
            Token::Empty(tag) => Event::Empty(bytes_start(tag)),
            Token::End(name) => Event::End(BytesEnd::new(name.qualified.as_str())),
            Token::Text(text) => Event::Text(BytesText::from_escaped(text.as_str())),
            Token::CData(text) => Event::CData(BytesCData::new(text.as_str())),
            Token::Comment(text) => Event::Comment(BytesText::from_escaped(text.as_str())),
            Token::ProcInst(pi) => Event::PI(BytesPI::new(pi.to_string())),
            Token::DocType(text) => Event::DocType(BytesText::from_escaped(text.as_str())),
        };
        self.writer.write_event(event)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), EncodeError> {
        self.writer.get_mut().flush()?;
        Ok(())
    }
}

fn bytes_start(tag: &StartTag) -> BytesStart<'_> {
    let mut start = BytesStart::new(tag.name.qualified.as_str());
    for attr in &tag.attrs {
        start.push_attribute((attr.name.as_str(), attr.value.as_str()));
    }
    start
}

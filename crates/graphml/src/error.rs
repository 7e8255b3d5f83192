//! Error types for GraphML decoding, encoding and validation.

use thiserror::Error;

use crate::model::Scope;

/// Classification of decode failures.
///
/// Every [`DecodeError`] maps to exactly one kind, so callers can branch on
/// the failure class without matching on variant payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The stream ended before the current element closed.
    PrematureEnd,
    /// A child element is not permitted under its parent.
    UnexpectedElement,
    /// Non-whitespace text, CDATA or a processing instruction between
    /// structural elements.
    UnexpectedToken,
    /// A closing tag does not match the currently open element.
    MismatchedEnd,
    /// The GraphML root element is missing or has the wrong name.
    MalformedRoot,
    /// A required attribute is absent.
    MissingAttribute,
    /// An attribute carries a value outside its allowed set.
    InvalidValue,
    /// A `data` element references an undeclared key.
    UnknownAttribute,
    /// A key is declared twice for the same scope.
    DuplicateKey,
    /// An element identifier is used twice in the document.
    DuplicateId,
    /// Graph/node nesting exceeds the configured limit.
    DepthExceeded,
    /// The token source failed (malformed markup, bad encoding or escapes).
    Syntax,
}

impl ErrorKind {
    /// Returns the kind's name (e.g., "DuplicateKey").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::PrematureEnd => "PrematureEnd",
            ErrorKind::UnexpectedElement => "UnexpectedElement",
            ErrorKind::UnexpectedToken => "UnexpectedToken",
            ErrorKind::MismatchedEnd => "MismatchedEnd",
            ErrorKind::MalformedRoot => "MalformedRoot",
            ErrorKind::MissingAttribute => "MissingAttribute",
            ErrorKind::InvalidValue => "InvalidValue",
            ErrorKind::UnknownAttribute => "UnknownAttribute",
            ErrorKind::DuplicateKey => "DuplicateKey",
            ErrorKind::DuplicateId => "DuplicateID",
            ErrorKind::DepthExceeded => "DepthExceeded",
            ErrorKind::Syntax => "Syntax",
        }
    }
}

/// Error during decoding.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unexpected end of stream inside <{element}>")]
    PrematureEnd { element: String },

    #[error("element <{element}> is not allowed inside <{parent}>")]
    UnexpectedElement { parent: String, element: String },

    #[error("unexpected {token} inside <{element}>")]
    UnexpectedToken { element: String, token: String },

    #[error("closing tag </{found}> does not match open element <{expected}>")]
    MismatchedEnd { expected: String, found: String },

    #[error("missing graphml root element (found {})", .found.as_deref().unwrap_or("end of stream"))]
    MalformedRoot { found: Option<String> },

    #[error("<{element}> is missing required attribute {attr:?}")]
    MissingAttribute {
        element: &'static str,
        attr: &'static str,
    },

    #[error("invalid value {value:?} for attribute {attr:?} on <{element}>")]
    InvalidValue {
        element: &'static str,
        attr: &'static str,
        value: String,
    },

    #[error("nesting depth exceeds maximum {max}")]
    DepthExceeded { max: usize },

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("malformed xml: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("invalid escape sequence: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    #[error("invalid UTF-8 in {context}")]
    InvalidUtf8 { context: &'static str },
}

impl DecodeError {
    /// Returns the failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::PrematureEnd { .. } => ErrorKind::PrematureEnd,
            DecodeError::UnexpectedElement { .. } => ErrorKind::UnexpectedElement,
            DecodeError::UnexpectedToken { .. } => ErrorKind::UnexpectedToken,
            DecodeError::MismatchedEnd { .. } => ErrorKind::MismatchedEnd,
            DecodeError::MalformedRoot { .. } => ErrorKind::MalformedRoot,
            DecodeError::MissingAttribute { .. } => ErrorKind::MissingAttribute,
            DecodeError::InvalidValue { .. } => ErrorKind::InvalidValue,
            DecodeError::DepthExceeded { .. } => ErrorKind::DepthExceeded,
            DecodeError::Invalid(err) => err.kind(),
            DecodeError::Xml(_) | DecodeError::Escape(_) | DecodeError::InvalidUtf8 { .. } => {
                ErrorKind::Syntax
            }
        }
    }
}

/// Error during encoding.
///
/// Encoding performs no semantic checks; only sink failures surface here.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("xml writer failed: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("encoded output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Violation of the document's schema invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("data references undeclared key {key:?} for {scope}")]
    UnknownAttribute { key: String, scope: Scope },

    #[error("redefinition of key {id:?} for {scope}")]
    DuplicateKey { id: String, scope: Scope },

    #[error("redefinition of id {id:?}")]
    DuplicateId { id: String },
}

impl ValidationError {
    /// Returns the failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::UnknownAttribute { .. } => ErrorKind::UnknownAttribute,
            ValidationError::DuplicateKey { .. } => ErrorKind::DuplicateKey,
            ValidationError::DuplicateId { .. } => ErrorKind::DuplicateId,
        }
    }
}

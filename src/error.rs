//! All error types for the xliff-bridge crate.
//!
//! These are returned from all fallible operations (parsing, rendering, file I/O,
//! reconciliation, etc.).

use thiserror::Error;

/// Prefix shared by every structural XLIFF error message.
pub const FORMAT_ERROR_PREFIX: &str = "XML document does not conform XLIFF specification: ";

#[derive(Error, Debug)]
pub enum Error {
    /// The document does not follow the structure required by its declared XLIFF version.
    #[error("XML document does not conform XLIFF specification: {0}")]
    Format(String),

    #[error("unknown XLIFF specification `{0}`")]
    UnknownSpecification(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("invalid XML: {0}")]
    InvalidXml(String),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("translation store error: {0}")]
    Store(String),
}

impl Error {
    /// Creates a new format error; the uniform prefix is added on display.
    pub fn format(message: impl Into<String>) -> Self {
        Error::Format(message.into())
    }

    /// Creates a new invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    /// Returns `true` for structural XLIFF errors.
    pub fn is_format_error(&self) -> bool {
        matches!(self, Error::Format(_))
    }
}

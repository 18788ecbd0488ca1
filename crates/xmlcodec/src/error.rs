//! Error types for XML mapping and for codec operations.
//!
//! [`XmlError`] is what the mapping layer produces. [`CodecError`] is the
//! operation-level taxonomy the codec reports to its error sink.

use std::io;
use std::path::PathBuf;

use xmlcodec_core::CoreError;

/// Errors that can occur while mapping values to or from XML.
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    /// An I/O error during XML reading or writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An error from the underlying quick-xml library.
    #[error("XML processing error: {0}")]
    QuickXml(#[from] quick_xml::Error),

    /// An error from quick-xml attribute handling.
    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// The document is not well-formed in a way quick-xml does not report
    /// itself (no root element, content after the root).
    #[error("malformed XML document: {0}")]
    Malformed(String),

    /// A required XML element was missing.
    #[error("missing required XML element: {0}")]
    MissingElement(String),

    /// A required XML attribute was missing.
    #[error("missing required XML attribute: {0}")]
    MissingAttribute(String),

    /// An unexpected XML element was encountered.
    #[error("unexpected XML element: {0}")]
    UnexpectedElement(String),

    /// An error parsing a value from XML text content.
    #[error("failed to parse value: {0}")]
    ParseError(String),
}

impl XmlError {
    /// Whether the error means the input is not well-formed XML, as opposed
    /// to well-formed XML that does not fit the target type.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::QuickXml(_) | Self::Attribute(_) | Self::Malformed(_)
        )
    }
}

/// Operation-level failures of [`XmlCodec`](crate::XmlCodec).
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Absent value to serialize, or empty text to deserialize.
    #[error("input is absent or empty")]
    NullOrEmptyInput,

    /// The destination exists and overwriting was not allowed.
    #[error("file already exists: {}", .path.display())]
    FileConflict {
        /// The resolved destination path.
        path: PathBuf,
    },

    /// The source file does not exist.
    #[error("file not found: {}", .path.display())]
    NotFound {
        /// The resolved source path.
        path: PathBuf,
    },

    /// The text is not well-formed XML.
    #[error("malformed XML: {0}")]
    MalformedDocument(#[source] XmlError),

    /// The XML does not map to or from the target type.
    #[error("XML mapping failed: {0}")]
    Mapping(#[source] XmlError),

    /// A storage operation failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// The resolved path being read or written.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// The path collaborator rejected the path.
    #[error(transparent)]
    InvalidPath(#[from] CoreError),
}

impl CodecError {
    /// Short machine-readable name of the error kind, used as a log field.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NullOrEmptyInput => "null_or_empty_input",
            Self::FileConflict { .. } => "file_conflict",
            Self::NotFound { .. } => "not_found",
            Self::MalformedDocument(_) => "malformed_document",
            Self::Mapping(_) => "mapping",
            Self::Io { .. } => "io",
            Self::InvalidPath(_) => "invalid_path",
        }
    }

    /// Attach a path to an I/O error.
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<XmlError> for CodecError {
    fn from(err: XmlError) -> Self {
        if err.is_malformed() {
            Self::MalformedDocument(err)
        } else {
            Self::Mapping(err)
        }
    }
}

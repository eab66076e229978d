//! Error types for draftpress.

use std::io;
use thiserror::Error;

/// Result type alias for draftpress operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while exporting a document.
///
/// Malformed notation is never an error: the parser degrades to plain text.
/// Only validation, backend and collaborator failures surface here.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading input or writing an artifact.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A required request field is empty or missing.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The requested export format is not known.
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// Remote export was requested but no collaborator is configured.
    #[error("No document collaborator configured for remote export")]
    NoCollaborator,

    /// Error producing the PDF byte stream.
    #[error("PDF writing error: {0}")]
    Pdf(String),

    /// Error producing the DOCX container.
    #[error("DOCX archive error: {0}")]
    Archive(String),

    /// Error during rendering (JSON, XML).
    #[error("Rendering error: {0}")]
    Render(String),

    /// The remote document service rejected the request.
    #[error("Remote document creation failed: {0}")]
    Remote(String),

    /// Transport failure while talking to the remote document service.
    #[error("HTTP error: {0}")]
    Http(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::Pdf(err.to_string()),
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            _ => Error::Archive(err.to_string()),
        }
    }
}

#[cfg(feature = "remote")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err.to_string())
    }
}

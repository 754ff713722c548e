//! Error types for the undocx library.

use std::io;
use thiserror::Error;

/// Result type alias for undocx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading a document.
///
/// The top-level [`read_document`](crate::read_document) and
/// [`read_document_from_memory`](crate::read_document_from_memory) functions
/// never surface these; they fall back to an empty
/// [`Document`](crate::model::Document) instead. The lower-level
/// [`DocxContainer`](crate::container::DocxContainer) and
/// [`DocxReader`](crate::docx::DocxReader) APIs do report them.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error reading the ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// A requested archive part is not present.
    #[error("missing part: {0}")]
    MissingPart(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

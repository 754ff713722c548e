//! # undocx
//!
//! DOCX (WordprocessingML) paragraph, run and style extraction.
//!
//! This library reads a Word document and produces a structured in-memory
//! [`Document`]: body paragraphs with their runs, the raw style map, and
//! footnotes/endnotes. Style inheritance (`basedOn` chains) is resolved
//! with the documented precedence — inherited style, then paragraph-level
//! formatting, then run-level formatting — and adjacent runs that end up
//! stylistically identical are merged.
//!
//! ## Quick Start
//!
//! ```no_run
//! use undocx::read_document;
//!
//! let doc = read_document("report.docx");
//! for para in &doc.paragraphs {
//!     println!("{}", para.plain_text());
//! }
//! ```
//!
//! Both entry points are total: a file that cannot be opened or is not a
//! ZIP archive yields an empty [`Document`] rather than an error. Documents
//! in the wild are routinely slightly non-conformant, so every recoverable
//! problem (missing part, malformed attribute, unknown or cyclic style)
//! degrades to absent data. Callers that need stricter validation can use
//! [`DocxReader`] directly or inspect [`Document::is_empty`].

pub mod container;
pub mod docx;
pub mod error;
pub mod model;

// Re-exports
pub use container::DocxContainer;
pub use docx::DocxReader;
pub use error::{Error, Result};
pub use model::{
    CharProps, Color, Document, Justification, Note, ParaProps, Paragraph, Run, StyleDef,
    StyleKind, TabAlignment, TabStop,
};

use std::path::Path;

/// Read a DOCX document from a file path.
///
/// Returns an empty [`Document`] when the file cannot be opened or is not a
/// ZIP archive.
///
/// # Example
///
/// ```no_run
/// let doc = undocx::read_document("document.docx");
/// println!("{}", doc.plain_text());
/// ```
pub fn read_document(path: impl AsRef<Path>) -> Document {
    let path = path.as_ref();
    match DocxReader::open(path) {
        Ok(mut reader) => reader.read(),
        Err(err) => {
            log::warn!("cannot open {}: {err}", path.display());
            Document::default()
        }
    }
}

/// Read a DOCX document from an in-memory byte slice.
///
/// Returns an empty [`Document`] when the bytes are not a ZIP archive.
///
/// # Example
///
/// ```no_run
/// let data = std::fs::read("document.docx")?;
/// let doc = undocx::read_document_from_memory(&data);
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn read_document_from_memory(data: &[u8]) -> Document {
    match DocxReader::from_bytes(data.to_vec()) {
        Ok(mut reader) => reader.read(),
        Err(err) => {
            log::warn!("cannot open in-memory archive: {err}");
            Document::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_yield_empty_document() {
        let doc = read_document_from_memory(b"definitely not a zip archive");
        assert!(doc.is_empty());
    }

    #[test]
    fn test_missing_file_yields_empty_document() {
        let doc = read_document("no-such-file.docx");
        assert!(doc.is_empty());
    }
}

//! DOCX (Word) document reading.
//!
//! This module wires the archive, style, note and paragraph readers
//! together. The four parts of interest are read up front; whichever of
//! them is missing simply contributes nothing.

mod notes;
mod paragraph;
mod properties;
mod styles;

use self::styles::StyleResolver;
use crate::container::DocxContainer;
use crate::error::Result;
use crate::model::Document;
use std::path::Path;

const STYLES_PART: &str = "word/styles.xml";
const DOCUMENT_PART: &str = "word/document.xml";
const FOOTNOTES_PART: &str = "word/footnotes.xml";
const ENDNOTES_PART: &str = "word/endnotes.xml";

/// Reader for DOCX (Word) documents.
///
/// # Example
///
/// ```no_run
/// use undocx::docx::DocxReader;
///
/// let mut reader = DocxReader::open("report.docx")?;
/// let document = reader.read();
/// println!("{} paragraphs", document.paragraphs.len());
/// # Ok::<(), undocx::Error>(())
/// ```
pub struct DocxReader {
    container: DocxContainer,
}

impl DocxReader {
    /// Open a DOCX file for reading.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            container: DocxContainer::open(path)?,
        })
    }

    /// Create a reader from bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Ok(Self {
            container: DocxContainer::from_bytes(data)?,
        })
    }

    /// Read the document.
    ///
    /// Never fails once the archive is open: missing parts, malformed XML
    /// and unknown style references all degrade to absent data.
    pub fn read(&mut self) -> Document {
        let styles_xml = self.part(STYLES_PART);
        let document_xml = self.part(DOCUMENT_PART);
        let footnotes_xml = self.part(FOOTNOTES_PART);
        let endnotes_xml = self.part(ENDNOTES_PART);

        let styles = styles::parse_styles(&styles_xml);
        // the resolver cache is scoped to this load; concurrent loads on
        // other readers never observe it
        let mut resolver = StyleResolver::new(&styles);
        let footnotes = notes::read_notes(&footnotes_xml, b"w:footnotes", b"w:footnote", &mut resolver);
        let endnotes = notes::read_notes(&endnotes_xml, b"w:endnotes", b"w:endnote", &mut resolver);
        let paragraphs = paragraph::read_body(&document_xml, &mut resolver);

        log::debug!(
            "docx read: {} paragraphs, {} styles, {} footnotes, {} endnotes",
            paragraphs.len(),
            styles.len(),
            footnotes.len(),
            endnotes.len()
        );

        Document {
            paragraphs,
            styles,
            footnotes,
            endnotes,
        }
    }

    /// Read one part as a string; absent parts read as empty.
    fn part(&self, name: &str) -> String {
        self.container.read_xml(name).unwrap_or_default()
    }
}

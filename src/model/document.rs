//! Document model structures.

use super::{Paragraph, StyleDef};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A footnote or endnote.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Note {
    /// Note id as referenced from body runs.
    pub id: i32,
    /// Note content.
    pub paragraphs: Vec<Paragraph>,
}

/// A parsed DOCX document.
///
/// `styles` holds the raw (un-merged) definitions from `styles.xml`; every
/// paragraph and run already carries its resolved formatting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    /// Body paragraphs in document order.
    pub paragraphs: Vec<Paragraph>,

    /// Raw style definitions by style id.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub styles: HashMap<String, StyleDef>,

    /// Footnotes by id, separator entries excluded.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub footnotes: HashMap<i32, Note>,

    /// Endnotes by id, separator entries excluded.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub endnotes: HashMap<i32, Note>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the document holds no content at all.
    ///
    /// This is also what the total entry points return when the archive
    /// cannot be opened, so callers can use it to detect the degenerate
    /// outcome.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
            && self.styles.is_empty()
            && self.footnotes.is_empty()
            && self.endnotes.is_empty()
    }

    /// Extract the body text as a single newline-separated string.
    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        for para in &self.paragraphs {
            text.push_str(&para.plain_text());
            text.push('\n');
        }
        text.trim_end().to_string()
    }

    /// Convert to a pretty-printed JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

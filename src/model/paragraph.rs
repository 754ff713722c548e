//! Paragraph and run models.

use super::{CharProps, ParaProps};
use serde::{Deserialize, Serialize};

/// A contiguous span of text sharing character-level formatting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Run {
    /// The text content.
    pub text: String,

    /// Language tag from `w:lang`, empty when unset.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub lang: String,

    /// The run style id this run was resolved against.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub style_id: String,

    /// Resolved character formatting (style chain plus direct properties).
    pub props: CharProps,

    /// Footnote/endnote id when this run is a note reference, 0 otherwise.
    /// For a note reference `text` holds the marker glyph, usually empty.
    #[serde(skip_serializing_if = "is_zero_i32")]
    pub note_id: i32,
}

impl Run {
    /// Check if this run references a footnote or endnote.
    pub fn is_note_reference(&self) -> bool {
        self.note_id != 0
    }

    /// Check whether two runs are stylistically indistinguishable.
    ///
    /// The fingerprint covers the style id, language, and every character
    /// property. Note references never compare equal to anything so their
    /// markers survive coalescing as distinct runs.
    pub fn same_style(&self, other: &Run) -> bool {
        !self.is_note_reference()
            && !other.is_note_reference()
            && self.style_id == other.style_id
            && self.lang == other.lang
            && self.props == other.props
    }
}

/// A block of runs with paragraph-level formatting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Paragraph {
    /// Style id, `"Normal"` for unstyled paragraphs.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub style_id: String,

    /// Resolved paragraph formatting (style chain plus direct properties).
    pub props: ParaProps,

    /// Runs in document order.
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// Get the plain text content.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Check if this paragraph has no text.
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|r| r.text.is_empty())
    }

    /// Merge adjacent runs whose style fingerprints are equal.
    ///
    /// Word frequently splits visually continuous text into many runs (per
    /// word, or even per character); merging them back gives downstream
    /// consumers one run per formatting change.
    pub fn merge_adjacent_runs(&mut self) {
        if self.runs.len() <= 1 {
            return;
        }

        let mut merged: Vec<Run> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            match merged.last_mut() {
                Some(last) if last.same_style(&run) => last.text.push_str(&run.text),
                _ => merged.push(run),
            }
        }
        self.runs = merged;
    }
}

fn is_zero_i32(value: &i32) -> bool {
    *value == 0
}

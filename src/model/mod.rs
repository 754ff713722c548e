//! In-memory document model.
//!
//! All types are plain data: constructed once while reading, never mutated
//! afterwards, serializable with serde.

mod color;
mod document;
mod paragraph;
mod style;

pub use color::Color;
pub use document::{Document, Note};
pub use paragraph::{Paragraph, Run};
pub use style::{
    CharProps, Justification, ParaProps, StyleDef, StyleKind, TabAlignment, TabStop,
};

//! Footnote and endnote parsing.

use super::paragraph::{empty_paragraph, read_paragraph};
use super::properties::attr_value;
use super::styles::StyleResolver;
use crate::error::Result;
use crate::model::Note;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;

/// Read `footnotes.xml` or `endnotes.xml` into a note map.
///
/// The two parts are structurally identical apart from the element names,
/// so one routine serves both (`w:footnotes`/`w:footnote` and
/// `w:endnotes`/`w:endnote`). Separator and continuation-separator entries
/// carry no authored content and are skipped.
pub(crate) fn read_notes(
    xml: &str,
    root: &[u8],
    entry: &[u8],
    resolver: &mut StyleResolver<'_>,
) -> HashMap<i32, Note> {
    let mut notes = HashMap::new();
    if xml.trim().is_empty() {
        return notes;
    }

    let mut reader = Reader::from_str(xml);
    let mut in_root = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.name();
                if !in_root {
                    if name.as_ref() == root {
                        in_root = true;
                    } else if reader.read_to_end(name).is_err() {
                        break;
                    }
                } else if name.as_ref() == entry {
                    match read_note(&mut reader, entry, &e, resolver) {
                        Ok(Some(note)) => {
                            notes.insert(note.id, note);
                        }
                        Ok(None) => {}
                        Err(_) => break,
                    }
                } else if reader.read_to_end(name).is_err() {
                    break;
                }
            }
            Ok(Event::Empty(e)) if in_root && e.name().as_ref() == entry => {
                if let Some(id) = note_id(&e) {
                    notes.insert(
                        id,
                        Note {
                            id,
                            paragraphs: Vec::new(),
                        },
                    );
                }
            }
            Ok(Event::End(e)) if e.name().as_ref() == root => break,
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
    }

    notes
}

/// Read one note entry; `None` for separators and id-less entries.
fn read_note(
    reader: &mut Reader<&[u8]>,
    entry: &[u8],
    start: &BytesStart,
    resolver: &mut StyleResolver<'_>,
) -> Result<Option<Note>> {
    let Some(id) = note_id(start) else {
        reader.read_to_end(start.name())?;
        return Ok(None);
    };

    let mut paragraphs = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name();
                if name.as_ref() == b"w:p" {
                    paragraphs.push(read_paragraph(reader, resolver)?);
                } else {
                    reader.read_to_end(name)?;
                }
            }
            Event::Empty(e) if e.name().as_ref() == b"w:p" => {
                paragraphs.push(empty_paragraph(resolver));
            }
            Event::End(e) if e.name().as_ref() == entry => break,
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(Some(Note { id, paragraphs }))
}

/// The id of a content-bearing note; separators resolve to `None`.
fn note_id(e: &BytesStart) -> Option<i32> {
    if matches!(
        attr_value(e, b"w:type").as_deref(),
        Some("separator") | Some("continuationSeparator")
    ) {
        return None;
    }
    attr_value(e, b"w:id").and_then(|id| id.parse::<i32>().ok())
}

//! Style parsing and inheritance resolution.

use super::properties::{attr_value, ParaPatch, RunPatch};
use crate::error::Result;
use crate::model::{StyleDef, StyleKind};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;

/// Raw style definitions keyed by style id.
pub(crate) type StyleMap = HashMap<String, StyleDef>;

/// Parse `styles.xml` into the raw style map.
///
/// Styles without a `w:styleId` are skipped; an empty buffer or a document
/// without a `w:styles` root yields an empty map.
pub(crate) fn parse_styles(xml: &str) -> StyleMap {
    let mut map = StyleMap::new();
    if xml.trim().is_empty() {
        return map;
    }

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.name();
                if name.as_ref() == b"w:styles" {
                    read_style_list(&mut reader, &mut map);
                    break;
                } else if reader.read_to_end(name).is_err() {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
    }

    map
}

fn read_style_list(reader: &mut Reader<&[u8]>, map: &mut StyleMap) {
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.name();
                if name.as_ref() == b"w:style" {
                    match read_style(reader, &e) {
                        Ok(Some((id, def))) => {
                            map.insert(id, def);
                        }
                        Ok(None) => {}
                        Err(_) => return,
                    }
                } else if reader.read_to_end(name).is_err() {
                    return;
                }
            }
            Ok(Event::Empty(e)) if e.name().as_ref() == b"w:style" => {
                if let Some(entry) = style_from_attrs(&e) {
                    map.insert(entry.0, entry.1);
                }
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"w:styles" => return,
            Ok(Event::Eof) => return,
            Err(_) => return,
            _ => {}
        }
    }
}

fn style_from_attrs(e: &BytesStart) -> Option<(String, StyleDef)> {
    let id = attr_value(e, b"w:styleId")?;
    let mut def = StyleDef::default();
    if let Some(kind) = attr_value(e, b"w:type") {
        def.kind = if kind == "paragraph" {
            StyleKind::Paragraph
        } else {
            StyleKind::Run
        };
    }
    Some((id, def))
}

/// Read one `w:style` subtree; `None` when the style carries no id.
fn read_style(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart,
) -> Result<Option<(String, StyleDef)>> {
    let mut entry = style_from_attrs(start);
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name();
                match name.as_ref() {
                    b"w:rPr" => {
                        let patch = RunPatch::read(reader)?;
                        if let Some((_, def)) = entry.as_mut() {
                            patch.apply(&mut def.run);
                        }
                    }
                    b"w:pPr" => {
                        let patch = ParaPatch::read(reader)?;
                        if let Some((_, def)) = entry.as_mut() {
                            patch.apply(&mut def.para);
                        }
                    }
                    b"w:basedOn" => {
                        apply_based_on(&e, &mut entry);
                        reader.read_to_end(name)?;
                    }
                    _ => {
                        reader.read_to_end(name)?;
                    }
                }
            }
            Event::Empty(e) => {
                if e.name().as_ref() == b"w:basedOn" {
                    apply_based_on(&e, &mut entry);
                }
            }
            Event::End(e) if e.name().as_ref() == b"w:style" => break,
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(entry)
}

fn apply_based_on(e: &BytesStart, entry: &mut Option<(String, StyleDef)>) {
    if let (Some(parent), Some((_, def))) = (attr_value(e, b"w:val"), entry.as_mut()) {
        def.based_on = parent;
    }
}

/// Flattens `based_on` chains with memoisation.
///
/// The cache lives inside the resolver value and the reader creates a fresh
/// resolver per document load, so independent loads never share state. A
/// default placeholder is inserted before recursing on the parent: a
/// `based_on` cycle re-entering an id in flight resolves to that partial
/// default instead of recursing forever.
pub(crate) struct StyleResolver<'a> {
    styles: &'a StyleMap,
    cache: HashMap<String, StyleDef>,
}

impl<'a> StyleResolver<'a> {
    pub(crate) fn new(styles: &'a StyleMap) -> Self {
        Self {
            styles,
            cache: HashMap::new(),
        }
    }

    /// Resolve the fully merged definition of `id`.
    ///
    /// The empty id resolves to the default definition; an unknown id
    /// resolves to the default and is cached as such.
    pub(crate) fn resolve(&mut self, id: &str) -> StyleDef {
        if id.is_empty() {
            return StyleDef::default();
        }
        if let Some(cached) = self.cache.get(id) {
            return cached.clone();
        }
        let Some(def) = self.styles.get(id).cloned() else {
            self.cache.insert(id.to_string(), StyleDef::default());
            return StyleDef::default();
        };

        self.cache.insert(id.to_string(), StyleDef::default());

        let mut resolved = if def.based_on.is_empty() {
            StyleDef::default()
        } else {
            self.resolve(&def.based_on)
        };
        resolved.overlay(&def);
        // kind is per-style metadata and does not inherit
        resolved.kind = def.kind;

        self.cache.insert(id.to_string(), resolved.clone());
        resolved
    }
}

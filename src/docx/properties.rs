//! Low-level readers for `w:pPr` and `w:rPr` property blocks.
//!
//! Both the style parser and the paragraph reader walk the same property
//! elements, so the walks live here once. A patch records which properties
//! were actually present; the style parser applies a patch onto a fresh
//! definition, the paragraph reader applies it on top of formatting seeded
//! from a resolved style (direct values override whenever present, and a
//! direct `w:tabs` replaces the inherited list).

use crate::error::Result;
use crate::model::{CharProps, Color, Justification, ParaProps, TabAlignment, TabStop};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Get an attribute value by literal name (`b"w:val"` etc.).
pub(crate) fn attr_value(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).into_owned())
}

/// Parse a numeric attribute; malformed values count as absent.
pub(crate) fn attr_f32(e: &BytesStart, key: &[u8]) -> Option<f32> {
    attr_value(e, key)?.parse().ok()
}

/// Properties read from one `w:pPr` block.
#[derive(Debug, Default)]
pub(crate) struct ParaPatch {
    pub style_id: Option<String>,
    pub level: Option<u32>,
    pub numbered: bool,
    pub number_format: Option<String>,
    pub number_style: Option<String>,
    pub line_spacing: Option<f32>,
    pub space_before: Option<f32>,
    pub space_after: Option<f32>,
    pub space_between_same_style: bool,
    pub justification: Option<Justification>,
    pub right_direction: bool,
    pub indent_left: Option<f32>,
    pub indent_right: Option<f32>,
    pub indent_first_line: Option<f32>,
    pub tabs: Option<Vec<TabStop>>,
}

impl ParaPatch {
    /// Read a patch from the events of one `w:pPr` subtree. The reader must
    /// be positioned just past the opening tag; the closing tag is consumed.
    pub(crate) fn read(reader: &mut Reader<&[u8]>) -> Result<Self> {
        let mut patch = Self::default();
        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = e.name();
                    match name.as_ref() {
                        b"w:numPr" => patch.read_num_pr(reader)?,
                        b"w:tabs" => {
                            if patch.tabs.is_none() {
                                patch.tabs = Some(read_tab_stops(reader)?);
                            } else {
                                reader.read_to_end(name)?;
                            }
                        }
                        _ => {
                            patch.apply_element(&e);
                            reader.read_to_end(name)?;
                        }
                    }
                }
                Event::Empty(e) => match e.name().as_ref() {
                    b"w:numPr" => patch.numbered = true,
                    b"w:tabs" => {
                        if patch.tabs.is_none() {
                            patch.tabs = Some(Vec::new());
                        }
                    }
                    _ => patch.apply_element(&e),
                },
                Event::End(e) if e.name().as_ref() == b"w:pPr" => break,
                Event::Eof => break,
                _ => {}
            }
        }
        Ok(patch)
    }

    fn apply_element(&mut self, e: &BytesStart) {
        match e.name().as_ref() {
            b"w:pStyle" => {
                if let Some(id) = attr_value(e, b"w:val") {
                    self.style_id = Some(id);
                }
            }
            b"w:outlineLvl" => {
                if let Some(level) = attr_value(e, b"w:val").and_then(|v| v.parse().ok()) {
                    self.level = Some(level);
                }
            }
            b"w:jc" => {
                self.justification = match attr_value(e, b"w:val").as_deref() {
                    Some("center") => Some(Justification::Center),
                    Some("right") => Some(Justification::Right),
                    Some("both") => Some(Justification::Justify),
                    // anything else leaves the alignment alone
                    _ => self.justification,
                };
            }
            b"w:bidi" => self.right_direction = true,
            b"w:spacing" => {
                // w:line counts twentieths of a point, 240 per single space
                if let Some(line) = attr_f32(e, b"w:line") {
                    self.line_spacing = Some(line / 240.0);
                }
                if let Some(before) = attr_f32(e, b"w:before") {
                    self.space_before = Some(before / 20.0);
                }
                if let Some(after) = attr_f32(e, b"w:after") {
                    self.space_after = Some(after / 20.0);
                }
                if attr_value(e, b"w:lineRule").as_deref() == Some("exact") {
                    self.space_between_same_style = true;
                }
            }
            b"w:ind" => {
                if let Some(left) = attr_f32(e, b"w:left") {
                    self.indent_left = Some(left / 20.0);
                }
                if let Some(right) = attr_f32(e, b"w:right") {
                    self.indent_right = Some(right / 20.0);
                }
                if let Some(first) = attr_f32(e, b"w:firstLine") {
                    self.indent_first_line = Some(first / 20.0);
                }
            }
            _ => {}
        }
    }

    fn read_num_pr(&mut self, reader: &mut Reader<&[u8]>) -> Result<()> {
        self.numbered = true;
        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = e.name();
                    self.apply_num_element(&e);
                    reader.read_to_end(name)?;
                }
                Event::Empty(e) => self.apply_num_element(&e),
                Event::End(e) if e.name().as_ref() == b"w:numPr" => break,
                Event::Eof => break,
                _ => {}
            }
        }
        Ok(())
    }

    fn apply_num_element(&mut self, e: &BytesStart) {
        match e.name().as_ref() {
            // a list is attached but the literal format lives in
            // numbering.xml, which is not resolved here
            b"w:numId" => {
                if attr_value(e, b"w:val").is_some() {
                    self.number_format = Some("decimal".to_string());
                }
            }
            b"w:ilvl" => {
                if let Some(level) = attr_value(e, b"w:val").and_then(|v| v.parse().ok()) {
                    self.level = Some(level);
                }
            }
            b"w:numStyle" => {
                if let Some(style) = attr_value(e, b"w:val") {
                    self.number_style = Some(style);
                }
            }
            _ => {}
        }
    }

    /// Apply every recorded property to `props`. Direct values win whenever
    /// present; a recorded tab list replaces the existing one.
    pub(crate) fn apply(&self, props: &mut ParaProps) {
        if let Some(level) = self.level {
            props.level = level;
        }
        if self.numbered {
            props.numbered = true;
        }
        if let Some(format) = &self.number_format {
            props.number_format = format.clone();
        }
        if let Some(style) = &self.number_style {
            props.number_style = style.clone();
        }
        if let Some(spacing) = self.line_spacing {
            props.line_spacing = spacing;
        }
        if let Some(before) = self.space_before {
            props.space_before = before;
        }
        if let Some(after) = self.space_after {
            props.space_after = after;
        }
        if self.space_between_same_style {
            props.space_between_same_style = true;
        }
        if let Some(justification) = self.justification {
            props.justification = justification;
        }
        if self.right_direction {
            props.right_direction = true;
        }
        if let Some(left) = self.indent_left {
            props.indent_left = left;
        }
        if let Some(right) = self.indent_right {
            props.indent_right = right;
        }
        if let Some(first) = self.indent_first_line {
            props.indent_first_line = first;
        }
        if let Some(tabs) = &self.tabs {
            props.tabs = tabs.clone();
        }
    }
}

fn read_tab_stops(reader: &mut Reader<&[u8]>) -> Result<Vec<TabStop>> {
    let mut stops = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Empty(e) if e.name().as_ref() == b"w:tab" => stops.push(tab_stop(&e)),
            Event::Start(e) => {
                let name = e.name();
                if name.as_ref() == b"w:tab" {
                    stops.push(tab_stop(&e));
                }
                reader.read_to_end(name)?;
            }
            Event::End(e) if e.name().as_ref() == b"w:tabs" => break,
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(stops)
}

fn tab_stop(e: &BytesStart) -> TabStop {
    TabStop {
        position: attr_f32(e, b"w:pos").map(|pos| pos / 20.0).unwrap_or(0.0),
        alignment: attr_value(e, b"w:val")
            .and_then(|v| v.chars().next())
            .map(TabAlignment::from_marker)
            .unwrap_or_default(),
        leader: attr_value(e, b"w:leader").unwrap_or_default(),
    }
}

/// Properties read from one `w:rPr` block.
#[derive(Debug, Default)]
pub(crate) struct RunPatch {
    pub style_id: Option<String>,
    pub lang: Option<String>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike: bool,
    pub subscript: bool,
    pub superscript: bool,
    pub color: Option<Color>,
    pub back_color: Option<Color>,
    pub font_family: Option<String>,
    pub font_size: Option<f32>,
}

impl RunPatch {
    /// Read a patch from the events of one `w:rPr` subtree.
    pub(crate) fn read(reader: &mut Reader<&[u8]>) -> Result<Self> {
        let mut patch = Self::default();
        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = e.name();
                    patch.apply_element(&e);
                    reader.read_to_end(name)?;
                }
                Event::Empty(e) => patch.apply_element(&e),
                Event::End(e) if e.name().as_ref() == b"w:rPr" => break,
                Event::Eof => break,
                _ => {}
            }
        }
        Ok(patch)
    }

    fn apply_element(&mut self, e: &BytesStart) {
        match e.name().as_ref() {
            b"w:rStyle" => {
                if let Some(id) = attr_value(e, b"w:val") {
                    self.style_id = Some(id);
                }
            }
            b"w:lang" => {
                if let Some(lang) = attr_value(e, b"w:val") {
                    self.lang = Some(lang);
                }
            }
            b"w:b" => self.bold = true,
            b"w:i" => self.italic = true,
            b"w:u" => self.underline = true,
            b"w:strike" => self.strike = true,
            b"w:subscript" => self.subscript = true,
            b"w:superscript" => self.superscript = true,
            b"w:color" => {
                if let Some(value) = attr_value(e, b"w:val") {
                    self.color = Some(Color::from_hex(&value));
                }
            }
            b"w:shd" => {
                if let Some(fill) = attr_value(e, b"w:fill") {
                    self.back_color = Some(Color::from_hex(&fill));
                }
            }
            b"w:rFonts" => {
                if let Some(family) = attr_value(e, b"w:ascii") {
                    self.font_family = Some(family);
                }
            }
            // w:sz counts half-points
            b"w:sz" => {
                if let Some(size) = attr_f32(e, b"w:val") {
                    self.font_size = Some(size / 2.0);
                }
            }
            _ => {}
        }
    }

    /// Apply every recorded property to `props`; flags are additive, values
    /// win whenever they were present.
    pub(crate) fn apply(&self, props: &mut CharProps) {
        if self.bold {
            props.bold = true;
        }
        if self.italic {
            props.italic = true;
        }
        if self.underline {
            props.underline = true;
        }
        if self.strike {
            props.strike = true;
        }
        if self.subscript {
            props.subscript = true;
        }
        if self.superscript {
            props.superscript = true;
        }
        if let Some(color) = self.color {
            props.color = color;
        }
        if let Some(back_color) = self.back_color {
            props.back_color = back_color;
        }
        if let Some(family) = &self.font_family {
            props.font_family = family.clone();
        }
        if let Some(size) = self.font_size {
            props.font_size = size;
        }
    }
}

//! Paragraph and run reading.
//!
//! Converts one `w:p` subtree into a [`Paragraph`]: paragraph formatting is
//! seeded from the resolved paragraph style and overlaid with direct
//! `w:pPr` properties, run formatting from the resolved run style overlaid
//! with direct `w:rPr` properties, and adjacent same-styled runs are merged
//! at the end.

use super::properties::{attr_value, ParaPatch, RunPatch};
use super::styles::StyleResolver;
use crate::error::Result;
use crate::model::{Paragraph, Run};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// The style every unstyled paragraph falls back to.
const DEFAULT_STYLE: &str = "Normal";

/// Read the paragraphs of a `document.xml` body.
///
/// Only direct `w:p` children of `w:body` count; paragraphs nested in
/// tables or other containers belong to features out of scope and are
/// skipped with their container.
pub(crate) fn read_body(xml: &str, resolver: &mut StyleResolver<'_>) -> Vec<Paragraph> {
    let mut paragraphs = Vec::new();
    if xml.trim().is_empty() {
        return paragraphs;
    }

    let mut reader = Reader::from_str(xml);
    let mut in_document = false;
    let mut in_body = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.name();
                match name.as_ref() {
                    b"w:document" if !in_document => in_document = true,
                    b"w:body" if in_document && !in_body => in_body = true,
                    b"w:p" if in_body => match read_paragraph(&mut reader, resolver) {
                        Ok(para) => paragraphs.push(para),
                        Err(_) => break,
                    },
                    _ => {
                        if reader.read_to_end(name).is_err() {
                            break;
                        }
                    }
                }
            }
            Ok(Event::Empty(e)) if e.name().as_ref() == b"w:p" && in_body => {
                paragraphs.push(empty_paragraph(resolver));
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"w:body" => break,
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
    }

    paragraphs
}

/// Read one `w:p` subtree. The reader must be positioned just past the
/// opening tag; the closing tag is consumed.
pub(crate) fn read_paragraph(
    reader: &mut Reader<&[u8]>,
    resolver: &mut StyleResolver<'_>,
) -> Result<Paragraph> {
    let mut para = Paragraph::default();
    let mut p_style_id = DEFAULT_STYLE.to_string();
    let mut seeded = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name();
                match name.as_ref() {
                    b"w:pPr" => {
                        let patch = ParaPatch::read(reader)?;
                        p_style_id = patch
                            .style_id
                            .clone()
                            .filter(|id| !id.is_empty())
                            .unwrap_or_else(|| DEFAULT_STYLE.to_string());
                        para.props = resolver.resolve(&p_style_id).para;
                        patch.apply(&mut para.props);
                        seeded = true;
                    }
                    b"w:r" => para.runs.push(read_run(reader, &p_style_id, resolver)?),
                    // runs wrapped in hyperlinks, fields etc. are not
                    // direct children and are skipped with their wrapper
                    _ => {
                        reader.read_to_end(name)?;
                    }
                }
            }
            Event::Empty(e) => match e.name().as_ref() {
                b"w:pPr" => {
                    para.props = resolver.resolve(&p_style_id).para;
                    seeded = true;
                }
                // a run with no content still contributes an empty run
                b"w:r" => para.runs.push(styled_empty_run(&p_style_id, resolver)),
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"w:p" => break,
            Event::Eof => break,
            _ => {}
        }
    }

    if !seeded {
        para.props = resolver.resolve(&p_style_id).para;
    }
    para.style_id = p_style_id;
    para.merge_adjacent_runs();
    Ok(para)
}

/// Build the paragraph emitted for a self-closing `w:p`.
pub(crate) fn empty_paragraph(resolver: &mut StyleResolver<'_>) -> Paragraph {
    Paragraph {
        style_id: DEFAULT_STYLE.to_string(),
        props: resolver.resolve(DEFAULT_STYLE).para,
        runs: Vec::new(),
    }
}

fn styled_empty_run(p_style_id: &str, resolver: &mut StyleResolver<'_>) -> Run {
    let mut run = Run {
        style_id: p_style_id.to_string(),
        ..Default::default()
    };
    run.props.overlay(&resolver.resolve(p_style_id).run);
    run
}

/// Read one `w:r` subtree into a run.
fn read_run(
    reader: &mut Reader<&[u8]>,
    p_style_id: &str,
    resolver: &mut StyleResolver<'_>,
) -> Result<Run> {
    let mut patch: Option<RunPatch> = None;
    let mut text: Option<String> = None;
    let mut note_id = 0i32;
    let mut note_text = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name();
                match name.as_ref() {
                    b"w:rPr" => {
                        let read = RunPatch::read(reader)?;
                        if patch.is_none() {
                            patch = Some(read);
                        }
                    }
                    b"w:t" => {
                        let preserve = attr_value(&e, b"xml:space").as_deref() == Some("preserve");
                        let raw = read_text(reader, b"w:t")?;
                        if text.is_none() {
                            text = Some(if preserve {
                                raw
                            } else {
                                raw.trim_matches(' ').to_string()
                            });
                        }
                    }
                    b"w:footnoteReference" | b"w:endnoteReference" => {
                        let inner = read_text(reader, name.as_ref())?;
                        if note_id == 0 {
                            if let Some(id) = note_reference_id(&e) {
                                note_id = id;
                                note_text = inner;
                            }
                        }
                    }
                    _ => {
                        reader.read_to_end(name)?;
                    }
                }
            }
            Event::Empty(e) => match e.name().as_ref() {
                b"w:t" => {
                    if text.is_none() {
                        text = Some(String::new());
                    }
                }
                b"w:footnoteReference" | b"w:endnoteReference" => {
                    if note_id == 0 {
                        if let Some(id) = note_reference_id(&e) {
                            note_id = id;
                        }
                    }
                }
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"w:r" => break,
            Event::Eof => break,
            _ => {}
        }
    }

    // a note reference becomes a bare marker run, nothing else applies
    if note_id != 0 {
        return Ok(Run {
            text: note_text,
            note_id,
            ..Default::default()
        });
    }

    let patch = patch.unwrap_or_default();
    let style_id = patch
        .style_id
        .clone()
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| p_style_id.to_string());

    let mut run = Run {
        text: text.unwrap_or_default(),
        style_id,
        ..Default::default()
    };
    run.props.overlay(&resolver.resolve(&run.style_id).run);
    patch.apply(&mut run.props);
    if let Some(lang) = patch.lang {
        run.lang = lang;
    }
    Ok(run)
}

fn note_reference_id(e: &BytesStart) -> Option<i32> {
    attr_value(e, b"w:id")
        .and_then(|id| id.parse::<i32>().ok())
        .filter(|id| *id > 0)
}

/// Collect the direct text of an element, consuming until its end tag.
fn read_text(reader: &mut Reader<&[u8]>, end: &[u8]) -> Result<String> {
    let mut out = String::new();
    loop {
        match reader.read_event()? {
            Event::Text(t) => out.push_str(&t.unescape().unwrap_or_default()),
            Event::CData(t) => out.push_str(&String::from_utf8_lossy(&t.into_inner())),
            Event::Start(e) => {
                reader.read_to_end(e.name())?;
            }
            Event::End(e) if e.name().as_ref() == end => break,
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::styles::{parse_styles, StyleMap};
    use crate::model::{Justification, TabAlignment};

    fn paragraph_with_styles(styles_xml: &str, para_xml: &str) -> Paragraph {
        let map = parse_styles(styles_xml);
        paragraph_from_map(&map, para_xml)
    }

    fn paragraph_from_map(map: &StyleMap, para_xml: &str) -> Paragraph {
        let mut resolver = StyleResolver::new(map);
        let mut reader = Reader::from_str(para_xml);
        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) if e.name().as_ref() == b"w:p" => break,
                Event::Eof => panic!("no w:p in input"),
                _ => {}
            }
        }
        read_paragraph(&mut reader, &mut resolver).unwrap()
    }

    fn paragraph(para_xml: &str) -> Paragraph {
        paragraph_from_map(&StyleMap::new(), para_xml)
    }

    #[test]
    fn test_plain_run() {
        let para = paragraph(r#"<w:p><w:r><w:t>hello</w:t></w:r></w:p>"#);
        assert_eq!(para.style_id, "Normal");
        assert_eq!(para.runs.len(), 1);
        assert_eq!(para.runs[0].text, "hello");
        assert_eq!(para.runs[0].style_id, "Normal");
        assert!(!para.runs[0].props.bold);
    }

    #[test]
    fn test_inherited_run_style() {
        let styles = r#"<w:styles>
            <w:style w:type="character" w:styleId="BoldChar"><w:rPr><w:b/></w:rPr></w:style>
        </w:styles>"#;
        let para = paragraph_with_styles(
            styles,
            r#"<w:p><w:r><w:rPr><w:rStyle w:val="BoldChar"/></w:rPr><w:t>hi</w:t></w:r></w:p>"#,
        );
        assert_eq!(para.runs.len(), 1);
        assert_eq!(para.runs[0].text, "hi");
        assert_eq!(para.runs[0].style_id, "BoldChar");
        assert!(para.runs[0].props.bold);
    }

    #[test]
    fn test_direct_flag_overrides_inherited_false() {
        let styles = r#"<w:styles>
            <w:style w:type="character" w:styleId="PlainChar"><w:rPr><w:i/></w:rPr></w:style>
        </w:styles>"#;
        let para = paragraph_with_styles(
            styles,
            r#"<w:p><w:r><w:rPr><w:rStyle w:val="PlainChar"/><w:b/></w:rPr><w:t>x</w:t></w:r></w:p>"#,
        );
        assert!(para.runs[0].props.bold);
        assert!(para.runs[0].props.italic);
    }

    #[test]
    fn test_adjacent_same_style_runs_coalesce() {
        let para = paragraph(
            r#"<w:p>
                <w:r><w:rPr><w:b/></w:rPr><w:t>foo</w:t></w:r>
                <w:r><w:rPr><w:b/></w:rPr><w:t>bar</w:t></w:r>
            </w:p>"#,
        );
        assert_eq!(para.runs.len(), 1);
        assert_eq!(para.runs[0].text, "foobar");
        assert!(para.runs[0].props.bold);
    }

    #[test]
    fn test_centered_bidi_paragraph() {
        let para =
            paragraph(r#"<w:p><w:pPr><w:jc w:val="center"/><w:bidi/></w:pPr><w:t/></w:p>"#);
        assert_eq!(para.props.justification, Justification::Center);
        assert!(para.props.right_direction);
    }

    #[test]
    fn test_space_preservation() {
        let para = paragraph(
            r#"<w:p><w:r><w:t xml:space="preserve">  hello  </w:t></w:r></w:p>"#,
        );
        assert_eq!(para.runs[0].text, "  hello  ");

        let trimmed = paragraph(r#"<w:p><w:r><w:t>  hello  </w:t></w:r></w:p>"#);
        assert_eq!(trimmed.runs[0].text, "hello");

        let blank = paragraph(r#"<w:p><w:r><w:t>   </w:t></w:r></w:p>"#);
        assert_eq!(blank.runs[0].text, "");
    }

    #[test]
    fn test_note_reference_run() {
        let para = paragraph(
            r#"<w:p>
                <w:r><w:t>see</w:t></w:r>
                <w:r><w:rPr><w:vertAlign w:val="superscript"/></w:rPr><w:footnoteReference w:id="3"/></w:r>
            </w:p>"#,
        );
        assert_eq!(para.runs.len(), 2);
        assert_eq!(para.runs[0].text, "see");
        assert_eq!(para.runs[0].note_id, 0);
        assert_eq!(para.runs[1].note_id, 3);
        assert_eq!(para.runs[1].text, "");
    }

    #[test]
    fn test_direct_tabs_replace_style_tabs() {
        let styles = r#"<w:styles>
            <w:style w:type="paragraph" w:styleId="Tabbed">
                <w:pPr><w:tabs><w:tab w:pos="720" w:val="left"/></w:tabs></w:pPr>
            </w:style>
        </w:styles>"#;
        let para = paragraph_with_styles(
            styles,
            r#"<w:p><w:pPr>
                <w:pStyle w:val="Tabbed"/>
                <w:tabs><w:tab w:pos="2880" w:val="right"/></w:tabs>
            </w:pPr></w:p>"#,
        );
        assert_eq!(para.props.tabs.len(), 1);
        assert_eq!(para.props.tabs[0].position, 144.0);
        assert_eq!(para.props.tabs[0].alignment, TabAlignment::Right);
    }

    #[test]
    fn test_paragraph_seeds_from_style() {
        let styles = r#"<w:styles>
            <w:style w:type="paragraph" w:styleId="Quote">
                <w:pPr><w:ind w:left="720"/><w:jc w:val="both"/></w:pPr>
            </w:style>
        </w:styles>"#;
        let para = paragraph_with_styles(
            styles,
            r#"<w:p><w:pPr><w:pStyle w:val="Quote"/></w:pPr><w:r><w:t>q</w:t></w:r></w:p>"#,
        );
        assert_eq!(para.style_id, "Quote");
        assert_eq!(para.props.indent_left, 36.0);
        assert_eq!(para.props.justification, Justification::Justify);
    }

    #[test]
    fn test_direct_numbering_overlay() {
        let para = paragraph(
            r#"<w:p><w:pPr>
                <w:numPr><w:ilvl w:val="1"/><w:numId w:val="4"/></w:numPr>
            </w:pPr><w:r><w:t>item</w:t></w:r></w:p>"#,
        );
        assert!(para.props.numbered);
        assert_eq!(para.props.level, 1);
        assert_eq!(para.props.number_format, "decimal");
    }

    #[test]
    fn test_hyperlink_runs_are_skipped() {
        let para = paragraph(
            r#"<w:p>
                <w:r><w:t>before</w:t></w:r>
                <w:hyperlink r:id="rId4"><w:r><w:t>link</w:t></w:r></w:hyperlink>
                <w:r><w:t>after</w:t></w:r>
            </w:p>"#,
        );
        assert_eq!(para.plain_text(), "beforeafter");
    }

    #[test]
    fn test_run_without_text() {
        let para = paragraph(r#"<w:p><w:r><w:rPr><w:b/></w:rPr></w:r></w:p>"#);
        assert_eq!(para.runs.len(), 1);
        assert_eq!(para.runs[0].text, "");
        assert!(para.runs[0].props.bold);
    }

    #[test]
    fn test_read_body_skips_tables_and_sectpr() {
        let xml = r#"<w:document><w:body>
            <w:p><w:r><w:t>one</w:t></w:r></w:p>
            <w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
            <w:p><w:r><w:t>two</w:t></w:r></w:p>
            <w:sectPr><w:pgSz w:w="11906" w:h="16838"/></w:sectPr>
        </w:body></w:document>"#;
        let map = StyleMap::new();
        let mut resolver = StyleResolver::new(&map);
        let paragraphs = read_body(xml, &mut resolver);
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].plain_text(), "one");
        assert_eq!(paragraphs[1].plain_text(), "two");
    }

    #[test]
    fn test_read_body_empty() {
        let map = StyleMap::new();
        let mut resolver = StyleResolver::new(&map);
        assert!(read_body("", &mut resolver).is_empty());
        assert!(read_body("<w:document><w:body/></w:document>", &mut resolver).is_empty());
        assert!(read_body("<other/>", &mut resolver).is_empty());
    }
}

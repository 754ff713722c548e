//! Style definitions and the inheritance merge rules.

use super::Color;
use serde::{Deserialize, Serialize};

/// What a style definition applies to.
///
/// `w:type="paragraph"` maps to [`StyleKind::Paragraph`]; every other value
/// (character, table, numbering, absent) is treated as a run style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleKind {
    Paragraph,
    #[default]
    Run,
}

/// Paragraph alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Justification {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// Tab stop alignment, decoded from the first character of `w:val`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabAlignment {
    #[default]
    Left,
    Center,
    Right,
    Decimal,
}

impl TabAlignment {
    /// Decode from the first character of a `w:val` attribute.
    pub fn from_marker(marker: char) -> Self {
        match marker.to_ascii_lowercase() {
            'c' => TabAlignment::Center,
            'r' => TabAlignment::Right,
            'd' => TabAlignment::Decimal,
            _ => TabAlignment::Left,
        }
    }
}

/// A single tab stop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabStop {
    /// Position in points.
    pub position: f32,
    pub alignment: TabAlignment,
    /// Leader string (e.g. "dot"), empty when none.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub leader: String,
}

/// Character-level formatting.
///
/// Every field has an "unset" default that the merge rules key on: `false`
/// for flags, the empty [`Color`], the empty string, and `0.0` for the font
/// size.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharProps {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub italic: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub underline: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub strike: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub subscript: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub superscript: bool,
    /// Text color; the empty color means unset.
    #[serde(skip_serializing_if = "Color::is_empty")]
    pub color: Color,
    /// Background (shading) color; the empty color means unset.
    #[serde(skip_serializing_if = "Color::is_empty")]
    pub back_color: Color,
    /// Font family name, empty when unset.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub font_family: String,
    /// Font size in points, 0 when unset.
    #[serde(skip_serializing_if = "is_zero")]
    pub font_size: f32,
}

impl CharProps {
    /// Overlay `other` on top of `self` following the inheritance rules:
    /// flags are sticky (true wins, false never clears), colors and strings
    /// override only when non-empty, the size only when positive.
    pub fn overlay(&mut self, other: &CharProps) {
        if other.bold {
            self.bold = true;
        }
        if other.italic {
            self.italic = true;
        }
        if other.underline {
            self.underline = true;
        }
        if other.strike {
            self.strike = true;
        }
        if other.subscript {
            self.subscript = true;
        }
        if other.superscript {
            self.superscript = true;
        }
        if !other.color.is_empty() {
            self.color = other.color;
        }
        if !other.back_color.is_empty() {
            self.back_color = other.back_color;
        }
        if !other.font_family.is_empty() {
            self.font_family = other.font_family.clone();
        }
        if other.font_size > 0.0 {
            self.font_size = other.font_size;
        }
    }
}

/// Paragraph-level formatting.
///
/// Sentinels as in [`CharProps`]; all point measurements are stored in
/// points (WordprocessingML twentieths divided by 20), `line_spacing` is a
/// multiplier (`w:line / 240`, 0 when unset).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParaProps {
    /// Outline or numbering level.
    #[serde(skip_serializing_if = "is_zero_u32")]
    pub level: u32,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub numbered: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub number_format: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub number_style: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub line_spacing: f32,
    #[serde(skip_serializing_if = "is_zero")]
    pub space_before: f32,
    #[serde(skip_serializing_if = "is_zero")]
    pub space_after: f32,
    /// Set when `w:spacing w:lineRule="exact"`; downstream renderers decide
    /// how to space runs of same-styled paragraphs.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub space_between_same_style: bool,
    #[serde(skip_serializing_if = "is_default_justification")]
    pub justification: Justification,
    /// Right-to-left paragraph direction (`w:bidi`).
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub right_direction: bool,
    #[serde(skip_serializing_if = "is_zero")]
    pub indent_left: f32,
    #[serde(skip_serializing_if = "is_zero")]
    pub indent_right: f32,
    #[serde(skip_serializing_if = "is_zero")]
    pub indent_first_line: f32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tabs: Vec<TabStop>,
}

impl ParaProps {
    /// Overlay `other` on top of `self` with the inheritance rules: flags
    /// sticky, strings when non-empty, numerics when strictly positive,
    /// justification when not `Left`, tab stops appended in order.
    pub fn overlay(&mut self, other: &ParaProps) {
        if other.level > 0 {
            self.level = other.level;
        }
        if other.numbered {
            self.numbered = true;
        }
        if !other.number_format.is_empty() {
            self.number_format = other.number_format.clone();
        }
        if !other.number_style.is_empty() {
            self.number_style = other.number_style.clone();
        }
        if other.line_spacing > 0.0 {
            self.line_spacing = other.line_spacing;
        }
        if other.space_before > 0.0 {
            self.space_before = other.space_before;
        }
        if other.space_after > 0.0 {
            self.space_after = other.space_after;
        }
        if other.space_between_same_style {
            self.space_between_same_style = true;
        }
        if other.justification != Justification::Left {
            self.justification = other.justification;
        }
        if other.right_direction {
            self.right_direction = true;
        }
        if other.indent_left > 0.0 {
            self.indent_left = other.indent_left;
        }
        if other.indent_right > 0.0 {
            self.indent_right = other.indent_right;
        }
        if other.indent_first_line > 0.0 {
            self.indent_first_line = other.indent_first_line;
        }
        self.tabs.extend(other.tabs.iter().cloned());
    }
}

/// A style definition from `styles.xml`.
///
/// The document keeps the raw, un-merged definitions; flattening the
/// `based_on` chain is the resolver's job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleDef {
    pub kind: StyleKind,
    /// Parent style id, empty when the style stands alone.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub based_on: String,
    /// Character properties from `w:rPr`.
    pub run: CharProps,
    /// Paragraph properties from `w:pPr`.
    pub para: ParaProps,
}

impl StyleDef {
    /// Overlay another definition on top of this one, field by field.
    ///
    /// `kind` is per-style metadata and is left untouched here; the
    /// resolver stamps the queried style's own kind on the result.
    pub fn overlay(&mut self, other: &StyleDef) {
        if !other.based_on.is_empty() {
            self.based_on = other.based_on.clone();
        }
        self.run.overlay(&other.run);
        self.para.overlay(&other.para);
    }
}

fn is_zero(value: &f32) -> bool {
    *value == 0.0
}

fn is_zero_u32(value: &u32) -> bool {
    *value == 0
}

fn is_default_justification(value: &Justification) -> bool {
    *value == Justification::Left
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sticky_flags() {
        let mut base = CharProps {
            bold: true,
            ..Default::default()
        };
        // an all-unset overlay must not clear the inherited flag
        base.overlay(&CharProps::default());
        assert!(base.bold);

        let mut plain = CharProps::default();
        plain.overlay(&CharProps {
            italic: true,
            ..Default::default()
        });
        assert!(plain.italic);
        assert!(!plain.bold);
    }

    #[test]
    fn test_numeric_overlay_requires_positive() {
        let mut base = CharProps {
            font_size: 12.0,
            ..Default::default()
        };
        base.overlay(&CharProps::default());
        assert_eq!(base.font_size, 12.0);

        base.overlay(&CharProps {
            font_size: 14.0,
            ..Default::default()
        });
        assert_eq!(base.font_size, 14.0);
    }

    #[test]
    fn test_color_overlay_requires_non_empty() {
        let mut base = CharProps {
            color: Color::new(255, 0, 0, 255),
            ..Default::default()
        };
        base.overlay(&CharProps::default());
        assert_eq!(base.color, Color::new(255, 0, 0, 255));

        base.overlay(&CharProps {
            color: Color::new(0, 0, 255, 255),
            ..Default::default()
        });
        assert_eq!(base.color, Color::new(0, 0, 255, 255));
    }

    #[test]
    fn test_justification_overlay() {
        let mut base = ParaProps {
            justification: Justification::Center,
            ..Default::default()
        };
        // Left is the unset value and must not override Center
        base.overlay(&ParaProps::default());
        assert_eq!(base.justification, Justification::Center);

        base.overlay(&ParaProps {
            justification: Justification::Right,
            ..Default::default()
        });
        assert_eq!(base.justification, Justification::Right);
    }

    #[test]
    fn test_tabs_append_in_order() {
        let mut base = ParaProps {
            tabs: vec![TabStop {
                position: 36.0,
                ..Default::default()
            }],
            ..Default::default()
        };
        base.overlay(&ParaProps {
            tabs: vec![TabStop {
                position: 72.0,
                alignment: TabAlignment::Right,
                leader: String::new(),
            }],
            ..Default::default()
        });
        assert_eq!(base.tabs.len(), 2);
        assert_eq!(base.tabs[0].position, 36.0);
        assert_eq!(base.tabs[1].position, 72.0);
    }

    #[test]
    fn test_tab_alignment_marker() {
        assert_eq!(TabAlignment::from_marker('c'), TabAlignment::Center);
        assert_eq!(TabAlignment::from_marker('R'), TabAlignment::Right);
        assert_eq!(TabAlignment::from_marker('d'), TabAlignment::Decimal);
        assert_eq!(TabAlignment::from_marker('l'), TabAlignment::Left);
        assert_eq!(TabAlignment::from_marker('x'), TabAlignment::Left);
    }
}

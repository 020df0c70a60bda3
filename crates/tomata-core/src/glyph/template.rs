use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TemplateError;

/// Glyph definitions shipped with the crate.
pub const DEFAULT_THEMES: &str = include_str!("../../assets/themes.txt");

/// Symbols every style must define, in header order.
const CHARSET: [char; 11] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':'];

/// The built-in glyph styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Electronic,
    Colossal,
    Shadow,
}

impl Style {
    pub const ALL: [Style; 3] = [Style::Electronic, Style::Colossal, Style::Shadow];

    pub fn name(self) -> &'static str {
        match self {
            Style::Electronic => "Electronic",
            Style::Colossal => "Colossal",
            Style::Shadow => "Shadow",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Style {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Style::ALL
            .into_iter()
            .find(|style| style.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TemplateError::NotFound(wanted.to_string()))
    }
}

/// A parsed glyph theme. Immutable once loaded.
///
/// Rows may contain multi-byte block-drawing characters, so per-glyph
/// fragments are addressed through byte bounds precomputed at parse time
/// rather than sliced by byte arithmetic on column counts.
#[derive(Debug, Clone)]
pub struct GlyphTemplate {
    style: Style,
    height: usize,
    widths: [usize; 11],
    rows: Vec<String>,
    bounds: Vec<[(usize, usize); 11]>,
}

impl GlyphTemplate {
    pub fn style(&self) -> Style {
        self.style
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn widths(&self) -> &[usize; 11] {
        &self.widths
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Column position of `ch` in the fixed charset, if renderable.
    pub(crate) fn glyph_index(ch: char) -> Option<usize> {
        CHARSET.iter().position(|&c| c == ch)
    }

    /// The pixel-row fragment of one glyph.
    pub(crate) fn fragment(&self, row: usize, glyph: usize) -> &str {
        let (start, end) = self.bounds[row][glyph];
        &self.rows[row][start..end]
    }
}

/// Loads glyph themes from a definition source, caching by style.
pub struct TemplateStore {
    source: String,
    cache: HashMap<Style, GlyphTemplate>,
}

impl TemplateStore {
    /// Store over the embedded theme definitions.
    pub fn new() -> Self {
        Self::from_source(DEFAULT_THEMES)
    }

    /// Store over a caller-provided definition source.
    pub fn from_source(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            cache: HashMap::new(),
        }
    }

    /// Load the template for `style`, parsing it on first request.
    pub fn load(&mut self, style: Style) -> Result<&GlyphTemplate, TemplateError> {
        if !self.cache.contains_key(&style) {
            let parsed = parse_block(&self.source, style)?;
            self.cache.insert(style, parsed);
        }
        Ok(&self.cache[&style])
    }
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_block(source: &str, style: Style) -> Result<GlyphTemplate, TemplateError> {
    let mut lines = source.lines();
    while let Some(line) = lines.next() {
        let Some((name, height, widths)) = parse_header(line) else {
            continue;
        };
        if !name.eq_ignore_ascii_case(style.name()) {
            continue;
        }
        let mut rows = Vec::with_capacity(height);
        for consumed in 0..height {
            match lines.next() {
                Some(row) => rows.push(row.to_string()),
                None => {
                    return Err(TemplateError::Malformed {
                        style: style.name().to_string(),
                        reason: format!(
                            "declares {height} rows but the source ends after {consumed}"
                        ),
                    })
                }
            }
        }
        return build(style, height, widths, rows);
    }
    Err(TemplateError::NotFound(style.name().to_string()))
}

/// A header is `name:height:w0:...:w10` -- 13 non-empty fields with numeric
/// height and widths. Anything else (comments, glyph rows, blank lines) is
/// skipped by the scanner.
fn parse_header(line: &str) -> Option<(&str, usize, [usize; 11])> {
    let mut fields = line.split(':').map(str::trim);
    let name = fields.next()?;
    if name.is_empty() || name.starts_with('#') {
        return None;
    }
    let rest: Vec<&str> = fields.collect();
    if rest.len() != 12 {
        return None;
    }
    let height = rest[0].parse::<usize>().ok().filter(|h| *h > 0)?;
    let mut widths = [0usize; 11];
    for (slot, field) in widths.iter_mut().zip(&rest[1..]) {
        *slot = field.parse::<usize>().ok().filter(|w| *w > 0)?;
    }
    Some((name, height, widths))
}

fn build(
    style: Style,
    height: usize,
    widths: [usize; 11],
    rows: Vec<String>,
) -> Result<GlyphTemplate, TemplateError> {
    let expected: usize = widths.iter().sum();
    let mut bounds = Vec::with_capacity(height);
    for (row_index, row) in rows.iter().enumerate() {
        let byte_offsets: Vec<usize> = row
            .char_indices()
            .map(|(byte, _)| byte)
            .chain(std::iter::once(row.len()))
            .collect();
        let columns = byte_offsets.len() - 1;
        if columns != expected {
            return Err(TemplateError::Malformed {
                style: style.name().to_string(),
                reason: format!(
                    "row {} is {columns} columns wide, expected {expected}",
                    row_index + 1
                ),
            });
        }
        let mut row_bounds = [(0usize, 0usize); 11];
        let mut start = 0usize;
        for (glyph, &width) in widths.iter().enumerate() {
            row_bounds[glyph] = (byte_offsets[start], byte_offsets[start + width]);
            start += width;
        }
        bounds.push(row_bounds);
    }
    Ok(GlyphTemplate {
        style,
        height,
        widths,
        rows,
        bounds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn embedded_styles_all_parse() {
        let mut store = TemplateStore::new();
        for style in Style::ALL {
            let template = store.load(style).unwrap();
            assert_eq!(template.style(), style);
            assert_eq!(template.rows().len(), template.height());
            let expected: usize = template.widths().iter().sum();
            for row in template.rows() {
                assert_eq!(row.chars().count(), expected);
            }
        }
    }

    #[test]
    fn unknown_style_name_is_not_found() {
        let err = "neon".parse::<Style>().unwrap_err();
        assert!(matches!(err, TemplateError::NotFound(name) if name == "neon"));
    }

    #[test]
    fn style_names_parse_case_insensitively() {
        assert_eq!("electronic".parse::<Style>().unwrap(), Style::Electronic);
        assert_eq!("COLOSSAL".parse::<Style>().unwrap(), Style::Colossal);
        assert_eq!(" Shadow ".parse::<Style>().unwrap(), Style::Shadow);
    }

    #[test]
    fn missing_block_is_not_found() {
        let mut store = TemplateStore::from_source("# nothing here\n");
        let err = store.load(Style::Colossal).unwrap_err();
        assert!(matches!(err, TemplateError::NotFound(_)));
    }

    #[test]
    fn width_mismatch_is_malformed() {
        // Declares 2-wide digits and a 2-wide colon, but rows are 3 short.
        let source = indoc! {"
            Electronic:1:2:2:2:2:2:2:2:2:2:2:2
            0011223344556677889
        "};
        let mut store = TemplateStore::from_source(source);
        let err = store.load(Style::Electronic).unwrap_err();
        match err {
            TemplateError::Malformed { style, reason } => {
                assert_eq!(style, "Electronic");
                assert!(reason.contains("expected 22"), "{reason}");
            }
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn truncated_block_is_malformed() {
        let source = "Shadow:3:1:1:1:1:1:1:1:1:1:1:1\n0123456789:\n0123456789:\n";
        let mut store = TemplateStore::from_source(source);
        let err = store.load(Style::Shadow).unwrap_err();
        assert!(matches!(err, TemplateError::Malformed { .. }));
    }

    #[test]
    fn scanner_skips_other_blocks() {
        let source = indoc! {"
            # two tiny themes
            Electronic:1:1:1:1:1:1:1:1:1:1:1:1
            0123456789:
            Shadow:1:2:2:2:2:2:2:2:2:2:2:2
            00112233445566778899::
        "};
        let mut store = TemplateStore::from_source(source);
        let template = store.load(Style::Shadow).unwrap();
        assert_eq!(template.height(), 1);
        assert_eq!(template.widths()[0], 2);
    }

    #[test]
    fn fragments_follow_declared_widths() {
        let source = "Electronic:2:1:1:1:1:1:1:1:1:1:1:3\n0123456789:::\nabcdefghijklm\n";
        let mut store = TemplateStore::from_source(source);
        let template = store.load(Style::Electronic).unwrap();
        assert_eq!(template.fragment(0, 0), "0");
        assert_eq!(template.fragment(0, 10), ":::");
        assert_eq!(template.fragment(1, 10), "klm");
    }
}

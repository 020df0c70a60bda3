use crate::error::RenderError;

use super::template::GlyphTemplate;

/// Render `text` as large block characters using `template`.
///
/// Only digits and `:` are renderable. Each glyph's per-row fragment is
/// appended to the matching output line, followed by one separating space.
/// The result always has exactly `template.height()` lines and is a pure
/// function of its inputs.
pub fn render(text: &str, template: &GlyphTemplate) -> Result<Vec<String>, RenderError> {
    let mut lines = vec![String::new(); template.height()];
    for ch in text.chars() {
        let glyph = GlyphTemplate::glyph_index(ch).ok_or(RenderError::UnsupportedGlyph(ch))?;
        for (row, line) in lines.iter_mut().enumerate() {
            line.push_str(template.fragment(row, glyph));
            line.push(' ');
        }
    }
    Ok(lines)
}

/// Format whole seconds as `MM:SS`, the only text the cycle path renders.
/// Minutes widen past two digits rather than wrap.
pub fn format_mmss(total_secs: u64) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::{Style, TemplateStore};
    use proptest::prelude::*;

    fn template(style: Style) -> crate::glyph::GlyphTemplate {
        TemplateStore::new().load(style).unwrap().clone()
    }

    #[test]
    fn output_height_matches_template() {
        for style in Style::ALL {
            let template = template(style);
            let lines = render("00:00", &template).unwrap();
            assert_eq!(lines.len(), template.height());
        }
    }

    #[test]
    fn render_is_deterministic() {
        let template = template(Style::Electronic);
        let first = render("12:34", &template).unwrap();
        let second = render("12:34", &template).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn every_line_has_equal_width() {
        let template = template(Style::Colossal);
        let lines = render("59:59", &template).unwrap();
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|line| line.chars().count() == width));
    }

    #[test]
    fn unsupported_character_is_rejected() {
        let template = template(Style::Electronic);
        let err = render("12:a4", &template).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedGlyph('a')));
    }

    #[test]
    fn empty_text_yields_empty_lines() {
        let template = template(Style::Shadow);
        let lines = render("", &template).unwrap();
        assert_eq!(lines.len(), template.height());
        assert!(lines.iter().all(String::is_empty));
    }

    #[test]
    fn format_mmss_pads_and_widens() {
        assert_eq!(format_mmss(0), "00:00");
        assert_eq!(format_mmss(59), "00:59");
        assert_eq!(format_mmss(60), "01:00");
        assert_eq!(format_mmss(1499), "24:59");
        assert_eq!(format_mmss(6000), "100:00");
    }

    proptest! {
        #[test]
        fn renders_any_clock_text(text in "[0-9:]{1,8}") {
            for style in Style::ALL {
                let template = template(style);
                let lines = render(&text, &template).unwrap();
                prop_assert_eq!(lines.len(), template.height());
                prop_assert_eq!(&lines, &render(&text, &template).unwrap());
            }
        }
    }
}

//! Big-digit glyph themes and the countdown renderer.
//!
//! Themes live in a line-oriented definition source (see
//! `assets/themes.txt`): each block starts with a header
//! `name:height:w0:...:w10` declaring the glyph height and the column width
//! of every symbol (digits `0`-`9`, then `:`), followed by exactly `height`
//! rows holding all eleven glyphs side by side. Adding a theme is an edit to
//! the source, not to the code.

mod renderer;
mod template;

pub use renderer::{format_mmss, render};
pub use template::{GlyphTemplate, Style, TemplateStore, DEFAULT_THEMES};

//! Syntax highlighting for annotated code blocks.
//!
//! Both renderers return `None` for languages the bundled grammars don't
//! know; callers then fall back to the plain code text.

use std::sync::LazyLock;

use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{styled_line_to_highlighted_html, IncludeBackground};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};

/// Dark theme to sit on the dark code block background.
pub const THEME: &str = "base16-ocean.dark";

static SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEMES: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

fn theme() -> Option<&'static Theme> {
    THEMES.themes.get(THEME)
}

/// Grammar for a fence annotation such as `python`, `rs` or `SQL`.
pub fn syntax_for(language: &str) -> Option<&'static SyntaxReference> {
    SYNTAXES
        .find_syntax_by_token(language)
        .or_else(|| SYNTAXES.find_syntax_by_token(&language.to_ascii_lowercase()))
}

/// `<span style=...>` markup for `code`, HTML-escaped.
pub fn to_html(code: &str, language: &str) -> Option<String> {
    let mut highlighter = HighlightLines::new(syntax_for(language)?, theme()?);
    let mut out = String::with_capacity(code.len() * 2);
    for line in LinesWithEndings::from(code) {
        let regions = highlighter.highlight_line(line, &SYNTAXES).ok()?;
        out.push_str(&styled_line_to_highlighted_html(&regions, IncludeBackground::No).ok()?);
    }
    Some(out)
}

/// 24-bit ANSI colored `code`, terminated with a reset sequence.
pub fn to_ansi(code: &str, language: &str) -> Option<String> {
    let mut highlighter = HighlightLines::new(syntax_for(language)?, theme()?);
    let mut out = String::with_capacity(code.len() * 2);
    for line in LinesWithEndings::from(code) {
        let regions = highlighter.highlight_line(line, &SYNTAXES).ok()?;
        out.push_str(&as_24_bit_terminal_escaped(&regions, false));
    }
    out.push_str("\x1b[0m");
    Some(out)
}

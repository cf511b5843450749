//! HTML for the web chat, styled with utility classes.

use pulldown_cmark_escape::{escape_href, escape_html};

use super::{highlight, Align, Block, CodeKind, Inline};

pub const TABLE_CLASS: &str =
    "table-auto w-full text-left border-collapse border border-gray-600 my-4";
pub const HEADER_CELL_CLASS: &str =
    "p-2 border border-gray-600 bg-gray-600 text-white font-semibold";
pub const BODY_CELL_CLASS: &str = "p-2 border border-gray-600";
pub const PRE_CLASS: &str = "p-4 rounded-lg overflow-x-auto";
pub const CODE_BACKGROUND: &str = "bg-gray-800";
pub const OUTPUT_BACKGROUND: &str = "bg-gray-600/50";
pub const INLINE_CODE_CLASS: &str =
    "px-1 py-0.5 rounded text-pink-300 bg-gray-800 font-mono text-sm";

/// Link schemes allowed through; everything else becomes an empty href.
const SAFE_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Parses and renders `markdown` in one go.
pub fn to_html(markdown: &str) -> String {
    render(&super::parse(markdown))
}

pub fn render(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        render_block(&mut out, block);
    }
    out
}

fn render_block(out: &mut String, block: &Block) {
    match block {
        Block::Paragraph(content) => {
            out.push_str("<p>");
            render_inlines(out, content);
            out.push_str("</p>\n");
        }
        Block::Heading { level, content } => render_heading(out, *level, content),
        Block::CodeBlock { language, code } => {
            render_code_block(out, block.code_kind(), language.as_deref(), code);
        }
        Block::BlockQuote(inner) => {
            out.push_str("<blockquote>\n");
            out.push_str(&render(inner));
            out.push_str("</blockquote>\n");
        }
        Block::List { start, items } => render_list(out, *start, items),
        Block::Table { alignments, header, rows } => render_table(out, alignments, header, rows),
        Block::Rule => out.push_str("<hr />\n"),
    }
}

fn render_heading(out: &mut String, level: u8, content: &[Inline]) {
    let level = level.clamp(1, 6);
    out.push_str(&format!("<h{level}>"));
    render_inlines(out, content);
    out.push_str(&format!("</h{level}>\n"));
}

fn render_code_block(
    out: &mut String,
    kind: Option<CodeKind>,
    language: Option<&str>,
    code: &str,
) {
    let background = match kind {
        Some(CodeKind::Code) => CODE_BACKGROUND,
        _ => OUTPUT_BACKGROUND,
    };
    out.push_str("<div class=\"my-4\"><pre class=\"");
    out.push_str(PRE_CLASS);
    out.push(' ');
    out.push_str(background);
    let Some(lang) = language else {
        out.push_str("\"><code>");
        push_escaped(out, code);
        out.push_str("</code></pre></div>\n");
        return;
    };

    out.push_str(" language-");
    push_escaped(out, lang);
    out.push_str("\"><code class=\"language-");
    push_escaped(out, lang);
    out.push_str("\">");
    match highlight::to_html(code, lang) {
        Some(highlighted) => out.push_str(&highlighted),
        None => push_escaped(out, code),
    }
    out.push_str("</code></pre></div>\n");
}

fn render_list(out: &mut String, start: Option<u64>, items: &[Vec<Block>]) {
    match start {
        Some(1) => out.push_str("<ol>\n"),
        Some(n) => out.push_str(&format!("<ol start=\"{n}\">\n")),
        None => out.push_str("<ul>\n"),
    }
    for item in items {
        out.push_str("<li>");
        // Single-paragraph items render without the <p> wrapper.
        match item.as_slice() {
            [Block::Paragraph(content)] => render_inlines(out, content),
            blocks => out.push_str(&render(blocks)),
        }
        out.push_str("</li>\n");
    }
    out.push_str(if start.is_some() { "</ol>\n" } else { "</ul>\n" });
}

fn render_table(
    out: &mut String,
    alignments: &[Align],
    header: &[Vec<Inline>],
    rows: &[Vec<Vec<Inline>>],
) {
    out.push_str(&format!("<table class=\"{TABLE_CLASS}\">\n"));
    out.push_str("<thead><tr>");
    for (i, cell) in header.iter().enumerate() {
        render_cell(out, "th", HEADER_CELL_CLASS, alignments.get(i), cell);
    }
    out.push_str("</tr></thead>\n");
    if !rows.is_empty() {
        out.push_str("<tbody>\n");
        for row in rows {
            out.push_str("<tr>");
            for (i, cell) in row.iter().enumerate() {
                render_cell(out, "td", BODY_CELL_CLASS, alignments.get(i), cell);
            }
            out.push_str("</tr>\n");
        }
        out.push_str("</tbody>\n");
    }
    out.push_str("</table>\n");
}

fn render_cell(
    out: &mut String,
    tag: &str,
    class: &str,
    align: Option<&Align>,
    content: &[Inline],
) {
    let style = match align {
        Some(Align::Left) => " style=\"text-align: left\"",
        Some(Align::Center) => " style=\"text-align: center\"",
        Some(Align::Right) => " style=\"text-align: right\"",
        Some(Align::None) | None => "",
    };
    out.push_str(&format!("<{tag} class=\"{class}\"{style}>"));
    render_inlines(out, content);
    out.push_str(&format!("</{tag}>"));
}

fn render_inlines(out: &mut String, inlines: &[Inline]) {
    for inline in inlines {
        render_inline(out, inline);
    }
}

fn render_inline(out: &mut String, inline: &Inline) {
    match inline {
        Inline::Text(text) => push_escaped(out, text),
        Inline::Code(code) => {
            out.push_str(&format!("<code class=\"{INLINE_CODE_CLASS}\">"));
            push_escaped(out, code);
            out.push_str("</code>");
        }
        Inline::Emphasis(inner) => wrap(out, "em", inner),
        Inline::Strong(inner) => wrap(out, "strong", inner),
        Inline::Strikethrough(inner) => wrap(out, "del", inner),
        Inline::Link { url, content } => {
            out.push_str("<a href=\"");
            push_href(out, safe_url(url));
            out.push_str("\" target=\"_blank\" rel=\"noopener noreferrer\">");
            render_inlines(out, content);
            out.push_str("</a>");
        }
        Inline::Image { url, alt } => {
            out.push_str("<img src=\"");
            push_href(out, safe_url(url));
            out.push_str("\" alt=\"");
            push_escaped(out, alt);
            out.push_str("\" />");
        }
        Inline::TaskMarker(checked) => {
            out.push_str(if *checked {
                "<input type=\"checkbox\" checked disabled /> "
            } else {
                "<input type=\"checkbox\" disabled /> "
            });
        }
        Inline::SoftBreak => out.push('\n'),
        Inline::HardBreak => out.push_str("<br />\n"),
    }
}

fn wrap(out: &mut String, tag: &str, inner: &[Inline]) {
    out.push_str(&format!("<{tag}>"));
    render_inlines(out, inner);
    out.push_str(&format!("</{tag}>"));
}

/// Keeps relative URLs and those with an allowed scheme. The scheme is
/// read with ASCII control characters and whitespace removed, the way
/// browsers read it.
fn safe_url(url: &str) -> &str {
    let cleaned: String =
        url.chars().filter(|c| !c.is_ascii_control() && !c.is_ascii_whitespace()).collect();
    let Some(colon) = cleaned.find(':') else {
        return url;
    };
    if cleaned.find(['/', '?', '#']).is_some_and(|delimiter| delimiter < colon) {
        return url;
    }
    let scheme = cleaned[..colon].to_ascii_lowercase();
    if SAFE_SCHEMES.contains(&scheme.as_str()) {
        url
    } else {
        ""
    }
}

fn push_escaped(out: &mut String, text: &str) {
    escape_html(out, text).expect("writing to a String cannot fail");
}

/// Percent-encodes anything unsafe in an attribute URL.
fn push_href(out: &mut String, url: &str) {
    escape_href(out, url).expect("writing to a String cannot fail");
}

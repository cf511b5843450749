//! Plain-text rendering for the terminal front end.

use super::{highlight, plain_text, Align, Block, CodeKind, Inline};

/// Whether annotated code blocks get ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlighting {
    Off,
    Ansi,
}

pub fn to_text(markdown: &str) -> String {
    render(&super::parse(markdown))
}

/// Blocks separated by blank lines, without a trailing newline.
pub fn render(blocks: &[Block]) -> String {
    render_with(blocks, Highlighting::Off)
}

pub fn render_with(blocks: &[Block], highlighting: Highlighting) -> String {
    blocks
        .iter()
        .map(|block| render_block(block, highlighting))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_block(block: &Block, highlighting: Highlighting) -> String {
    match block {
        Block::Paragraph(content) => render_inlines(content),
        Block::Heading { level, content } => {
            let marks = "#".repeat(usize::from((*level).clamp(1, 6)));
            format!("{marks} {}", render_inlines(content))
        }
        Block::CodeBlock { language, code } => {
            render_code_block(block.code_kind(), language.as_deref(), code, highlighting)
        }
        Block::BlockQuote(inner) => prefix_lines(&render_with(inner, highlighting), "> ", "> "),
        Block::List { start, items } => render_list(*start, items, highlighting),
        Block::Table { alignments, header, rows } => render_table(alignments, header, rows),
        Block::Rule => "-".repeat(40),
    }
}

fn render_code_block(
    kind: Option<CodeKind>,
    language: Option<&str>,
    code: &str,
    highlighting: Highlighting,
) -> String {
    let code = code.trim_end_matches('\n');
    match (kind, language) {
        (Some(CodeKind::Code), Some(lang)) => {
            let colored = match highlighting {
                Highlighting::Ansi => highlight::to_ansi(code, lang),
                Highlighting::Off => None,
            };
            format!("```{lang}\n{}\n```", colored.as_deref().unwrap_or(code))
        }
        _ => prefix_lines(code, "    ", "    "),
    }
}

fn render_list(start: Option<u64>, items: &[Vec<Block>], highlighting: Highlighting) -> String {
    let mut lines = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let marker = match start {
            Some(n) => format!("{}. ", n + i as u64),
            None => "- ".to_string(),
        };
        let indent = " ".repeat(marker.chars().count());
        lines.push(prefix_lines(&render_with(item, highlighting), &marker, &indent));
    }
    lines.join("\n")
}

fn render_table(
    alignments: &[Align],
    header: &[Vec<Inline>],
    rows: &[Vec<Vec<Inline>>],
) -> String {
    let header: Vec<String> = header.iter().map(|cell| plain_text(cell)).collect();
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|cell| plain_text(cell)).collect())
        .collect();

    let columns = rows.iter().map(Vec::len).chain([header.len()]).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in std::iter::once(&header).chain(&rows) {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let border = |fill: char| -> String {
        let mut line = String::from("+");
        for width in &widths {
            line.push_str(&fill.to_string().repeat(width + 2));
            line.push('+');
        }
        line
    };
    let row_line = |cells: &[String]| -> String {
        let mut line = String::from("|");
        for (i, width) in widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or_default();
            let align = alignments.get(i).copied().unwrap_or(Align::None);
            line.push(' ');
            line.push_str(&pad(cell, *width, align));
            line.push_str(" |");
        }
        line
    };

    let mut lines = vec![border('-'), row_line(&header), border('=')];
    for row in &rows {
        lines.push(row_line(row));
    }
    lines.push(border('-'));
    lines.join("\n")
}

fn pad(cell: &str, width: usize, align: Align) -> String {
    let gap = width.saturating_sub(cell.chars().count());
    let (left, right) = match align {
        Align::Right => (gap, 0),
        Align::Center => (gap / 2, gap - gap / 2),
        Align::Left | Align::None => (0, gap),
    };
    format!("{}{cell}{}", " ".repeat(left), " ".repeat(right))
}

fn render_inlines(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        match inline {
            Inline::Text(text) => out.push_str(text),
            Inline::Code(code) => {
                out.push('`');
                out.push_str(code);
                out.push('`');
            }
            Inline::Emphasis(inner) => out.push_str(&format!("_{}_", render_inlines(inner))),
            Inline::Strong(inner) => out.push_str(&format!("*{}*", render_inlines(inner))),
            Inline::Strikethrough(inner) => out.push_str(&format!("~{}~", render_inlines(inner))),
            Inline::Link { url, content } => {
                let label = render_inlines(content);
                if label == *url {
                    out.push_str(url);
                } else {
                    out.push_str(&format!("{label} <{url}>"));
                }
            }
            Inline::Image { url, alt } => out.push_str(&format!("[image: {alt}] <{url}>")),
            Inline::TaskMarker(checked) => out.push_str(if *checked { "[x] " } else { "[ ] " }),
            Inline::SoftBreak | Inline::HardBreak => out.push('\n'),
        }
    }
    out
}

/// Prefixes the first line with `first` and the rest with `rest`.
fn prefix_lines(text: &str, first: &str, rest: &str) -> String {
    text.lines()
        .enumerate()
        .map(|(i, line)| {
            let prefix = if i == 0 { first } else { rest };
            if line.is_empty() {
                prefix.trim_end().to_string()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_ansi_text(markdown: &str) -> String {
        render_with(&crate::markdown::parse(markdown), Highlighting::Ansi)
    }

    #[test]
    fn table_is_drawn_with_borders() {
        let text = to_text("| name | n |\n|------|--:|\n| a | 10 |\n| bb | 2 |\n");
        assert_eq!(
            text,
            "+------+----+\n\
             | name |  n |\n\
             +======+====+\n\
             | a    | 10 |\n\
             | bb   |  2 |\n\
             +------+----+"
        );
    }

    #[test]
    fn code_and_output_blocks_differ() {
        assert_eq!(to_text("```python\nprint(1)\n```\n"), "```python\nprint(1)\n```");
        assert_eq!(to_text("```\n(3, 4)\n```\n"), "    (3, 4)");
    }

    #[test]
    fn ansi_colors_only_known_code_blocks() {
        let colored = to_ansi_text("```python\nprint(1)\n```\n");
        assert!(colored.starts_with("```python\n\x1b[38;2;"));
        assert!(colored.ends_with("\x1b[0m\n```"));

        assert_eq!(to_ansi_text("```klingon\nqapla\n```\n"), "```klingon\nqapla\n```");
        assert_eq!(to_ansi_text("```\n(3, 4)\n```\n"), "    (3, 4)");
        assert_eq!(to_ansi_text("plain **text**"), to_text("plain **text**"));
    }

    #[test]
    fn inline_markup_is_kept_readable() {
        assert_eq!(
            to_text("Vybrali jste dokumentaci: **guide-A**. Use `df.head()`."),
            "Vybrali jste dokumentaci: *guide-A*. Use `df.head()`."
        );
    }

    #[test]
    fn nested_blocks_are_indented() {
        let text = to_text("1. first\n2. second\n\n> quoted\n> more\n");
        assert_eq!(text, "1. first\n2. second\n\n> quoted\n> more");
    }

    #[test]
    fn rendering_twice_is_identical() {
        let source = "# A\n\n- [x] done\n- [ ] todo\n\n| k | v |\n|---|---|\n| 1 | 2 |\n";
        assert_eq!(to_text(source), to_text(source));
    }
}

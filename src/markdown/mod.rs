//! Markdown answers as a typed block tree.
//!
//! [`parse`] turns GitHub-flavored markdown into [`Block`]s; [`html`] and
//! [`terminal`] each render that tree with one function per node kind.
//! Annotated code blocks go through [`highlight`] when the language is known.
//! Raw HTML in the source is dropped. Parsing never fails: malformed input
//! degrades to whatever the CommonMark grammar makes of it.

pub mod highlight;
pub mod html;
pub mod terminal;

use pulldown_cmark::{Alignment, CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Vec<Inline>),
    Heading { level: u8, content: Vec<Inline> },
    CodeBlock { language: Option<String>, code: String },
    BlockQuote(Vec<Block>),
    List { start: Option<u64>, items: Vec<Vec<Block>> },
    Table { alignments: Vec<Align>, header: Vec<Cell>, rows: Vec<Vec<Cell>> },
    Rule,
}

pub type Cell = Vec<Inline>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Code(String),
    Emphasis(Vec<Inline>),
    Strong(Vec<Inline>),
    Strikethrough(Vec<Inline>),
    Link { url: String, content: Vec<Inline> },
    Image { url: String, alt: String },
    TaskMarker(bool),
    SoftBreak,
    HardBreak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    None,
    Left,
    Center,
    Right,
}

/// Whether a fenced/indented block is source code or program output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeKind {
    /// Carries a language annotation.
    Code,
    /// No annotation: rendered as a plain output block.
    Output,
}

impl Block {
    /// `None` for anything that is not a code block.
    pub fn code_kind(&self) -> Option<CodeKind> {
        match self {
            Block::CodeBlock { language: Some(_), .. } => Some(CodeKind::Code),
            Block::CodeBlock { language: None, .. } => Some(CodeKind::Output),
            _ => None,
        }
    }
}

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

pub fn parse(markdown: &str) -> Vec<Block> {
    let events = Parser::new_ext(markdown, options()).filter(|event| {
        !matches!(
            event,
            Event::Html(_)
                | Event::InlineHtml(_)
                | Event::Start(Tag::HtmlBlock)
                | Event::End(TagEnd::HtmlBlock)
        )
    });
    Reader { events }.blocks()
}

/// Flattens inline content to its visible text.
pub fn plain_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        match inline {
            Inline::Text(text) | Inline::Code(text) => out.push_str(text),
            Inline::Emphasis(inner) | Inline::Strong(inner) | Inline::Strikethrough(inner) => {
                out.push_str(&plain_text(inner));
            }
            Inline::Link { content, .. } => out.push_str(&plain_text(content)),
            Inline::Image { alt, .. } => out.push_str(alt),
            Inline::TaskMarker(_) => {}
            Inline::SoftBreak | Inline::HardBreak => out.push(' '),
        }
    }
    out
}

struct Reader<I> {
    events: I,
}

impl<'a, I: Iterator<Item = Event<'a>>> Reader<I> {
    /// Block content up to the end of the enclosing container. Inline events
    /// that arrive outside a paragraph (tight list items) are wrapped in one.
    fn blocks(&mut self) -> Vec<Block> {
        let mut blocks = Vec::new();
        let mut loose = Vec::new();
        while let Some(event) = self.events.next() {
            match event {
                Event::End(_) => break,
                Event::Start(tag) if is_inline(&tag) => {
                    let inline = self.inline_tag(tag);
                    push_inline(&mut loose, inline);
                }
                Event::Start(tag) => {
                    flush_loose(&mut loose, &mut blocks);
                    if let Some(block) = self.block(tag) {
                        blocks.push(block);
                    }
                }
                Event::Rule => {
                    flush_loose(&mut loose, &mut blocks);
                    blocks.push(Block::Rule);
                }
                other => {
                    if let Some(inline) = leaf_inline(other) {
                        push_inline(&mut loose, inline);
                    }
                }
            }
        }
        flush_loose(&mut loose, &mut blocks);
        blocks
    }

    fn block(&mut self, tag: Tag<'a>) -> Option<Block> {
        let block = match tag {
            Tag::Paragraph => Block::Paragraph(self.inlines()),
            Tag::Heading { level, .. } => {
                Block::Heading { level: heading_level(level), content: self.inlines() }
            }
            Tag::BlockQuote(_) => Block::BlockQuote(self.blocks()),
            Tag::CodeBlock(kind) => {
                let language = match kind {
                    CodeBlockKind::Fenced(info) => {
                        info.split_whitespace().next().map(str::to_string)
                    }
                    CodeBlockKind::Indented => None,
                };
                Block::CodeBlock { language, code: self.text() }
            }
            Tag::List(start) => Block::List { start, items: self.list_items() },
            Tag::Table(alignments) => self.table(alignments),
            _ => {
                self.skip();
                return None;
            }
        };
        Some(block)
    }

    fn inlines(&mut self) -> Vec<Inline> {
        let mut out = Vec::new();
        while let Some(event) = self.events.next() {
            match event {
                Event::End(_) => break,
                Event::Start(tag) => {
                    let inline = self.inline_tag(tag);
                    push_inline(&mut out, inline);
                }
                other => {
                    if let Some(inline) = leaf_inline(other) {
                        push_inline(&mut out, inline);
                    }
                }
            }
        }
        out
    }

    fn inline_tag(&mut self, tag: Tag<'a>) -> Inline {
        match tag {
            Tag::Emphasis => Inline::Emphasis(self.inlines()),
            Tag::Strong => Inline::Strong(self.inlines()),
            Tag::Strikethrough => Inline::Strikethrough(self.inlines()),
            Tag::Link { dest_url, .. } => {
                Inline::Link { url: dest_url.into_string(), content: self.inlines() }
            }
            Tag::Image { dest_url, .. } => {
                Inline::Image { url: dest_url.into_string(), alt: plain_text(&self.inlines()) }
            }
            _ => Inline::Text(plain_text(&self.inlines())),
        }
    }

    /// Raw text up to the end of the current tag (code block bodies).
    fn text(&mut self) -> String {
        let mut out = String::new();
        for event in self.events.by_ref() {
            match event {
                Event::End(_) => break,
                Event::Text(text) => out.push_str(&text),
                _ => {}
            }
        }
        out
    }

    fn list_items(&mut self) -> Vec<Vec<Block>> {
        let mut items = Vec::new();
        while let Some(event) = self.events.next() {
            match event {
                Event::Start(Tag::Item) => items.push(self.blocks()),
                Event::End(_) => break,
                _ => {}
            }
        }
        items
    }

    fn table(&mut self, alignments: Vec<Alignment>) -> Block {
        let mut header = Vec::new();
        let mut rows = Vec::new();
        while let Some(event) = self.events.next() {
            match event {
                Event::Start(Tag::TableHead) => header = self.cells(),
                Event::Start(Tag::TableRow) => rows.push(self.cells()),
                Event::End(_) => break,
                _ => {}
            }
        }
        Block::Table {
            alignments: alignments.into_iter().map(Align::from).collect(),
            header,
            rows,
        }
    }

    fn cells(&mut self) -> Vec<Cell> {
        let mut cells = Vec::new();
        while let Some(event) = self.events.next() {
            match event {
                Event::Start(Tag::TableCell) => cells.push(self.inlines()),
                Event::End(_) => break,
                _ => {}
            }
        }
        cells
    }

    fn skip(&mut self) {
        let mut depth = 1usize;
        for event in self.events.by_ref() {
            match event {
                Event::Start(_) => depth += 1,
                Event::End(_) => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
        }
    }
}

fn is_inline(tag: &Tag<'_>) -> bool {
    matches!(
        tag,
        Tag::Emphasis | Tag::Strong | Tag::Strikethrough | Tag::Link { .. } | Tag::Image { .. }
    )
}

fn leaf_inline(event: Event<'_>) -> Option<Inline> {
    match event {
        Event::Text(text) => Some(Inline::Text(text.into_string())),
        Event::Code(code) => Some(Inline::Code(code.into_string())),
        Event::SoftBreak => Some(Inline::SoftBreak),
        Event::HardBreak => Some(Inline::HardBreak),
        Event::TaskListMarker(checked) => Some(Inline::TaskMarker(checked)),
        _ => None,
    }
}

/// Pushes `inline`, merging consecutive text runs the parser split apart.
fn push_inline(out: &mut Vec<Inline>, inline: Inline) {
    if let (Some(Inline::Text(prev)), Inline::Text(next)) = (out.last_mut(), &inline) {
        prev.push_str(next);
        return;
    }
    out.push(inline);
}

fn flush_loose(loose: &mut Vec<Inline>, blocks: &mut Vec<Block>) {
    if !loose.is_empty() {
        blocks.push(Block::Paragraph(std::mem::take(loose)));
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

impl From<Alignment> for Align {
    fn from(alignment: Alignment) -> Self {
        match alignment {
            Alignment::None => Align::None,
            Alignment::Left => Align::Left,
            Alignment::Center => Align::Center,
            Alignment::Right => Align::Right,
        }
    }
}

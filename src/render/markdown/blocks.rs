use std::borrow::Cow;

use super::inline::{parse_inlines, Inline};

const FENCE: &str = "```";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Code {
        lang: String,
        code: String,
    },
    Heading {
        level: u8,
        content: Vec<Inline>,
    },
    /// One quoted line. Consecutive `> ` lines stay separate blocks.
    Quote(Vec<Inline>),
    List {
        kind: ListKind,
        items: Vec<Vec<Inline>>,
    },
    /// Lines of one blank-line-delimited run of plain text.
    Paragraph(Vec<Vec<Inline>>),
}

/// Output of the fence pass: code is final, text still needs parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Code { lang: &'a str, code: &'a str },
}

pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Cut fenced code out of `text`.
///
/// A fence may open anywhere. Its language tag is the first word of the
/// rest of the opening line; the body runs to the next fence, or to the
/// end of input while a reply is still streaming. A fence that closes on
/// its own opening line takes a leading word as its language only when
/// more code follows it.
pub fn split_fences(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find(FENCE) {
        if open > 0 {
            segments.push(Segment::Text(&rest[..open]));
        }
        let after_open = &rest[open + FENCE.len()..];
        let line_end = after_open.find('\n').unwrap_or(after_open.len());

        if let Some(close) = after_open[..line_end].find(FENCE) {
            let (lang, code) = split_inline_lang(&after_open[..close]);
            segments.push(Segment::Code {
                lang,
                code: code.trim(),
            });
            rest = &after_open[close + FENCE.len()..];
            continue;
        }

        let info = &after_open[..line_end];
        let body = after_open.get(line_end + 1..).unwrap_or("");
        let lang = info.split_whitespace().next().unwrap_or("");
        match body.find(FENCE) {
            Some(close) => {
                segments.push(Segment::Code {
                    lang,
                    code: body[..close].trim(),
                });
                rest = &body[close + FENCE.len()..];
            }
            None => {
                segments.push(Segment::Code {
                    lang,
                    code: body.trim(),
                });
                rest = "";
            }
        }
    }

    if !rest.is_empty() {
        segments.push(Segment::Text(rest));
    }
    segments
}

/// `python print(1)` -> (`python`, ` print(1)`); a lone word is code.
fn split_inline_lang(inner: &str) -> (&str, &str) {
    let word_len = inner
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count();
    let code = &inner[word_len..];
    if word_len > 0 && code.starts_with(char::is_whitespace) && !code.trim().is_empty() {
        (&inner[..word_len], code)
    } else {
        ("", inner)
    }
}

/// Parse a whole reply into blocks.
pub fn parse_markdown(text: &str) -> Vec<Block> {
    let text = normalize_line_endings(text);
    let mut blocks = Vec::new();
    for segment in split_fences(&text) {
        match segment {
            Segment::Code { lang, code } => blocks.push(Block::Code {
                lang: lang.to_string(),
                code: code.to_string(),
            }),
            Segment::Text(text) => parse_blocks(text, &mut blocks),
        }
    }
    blocks
}

/// Classify the lines of a fence-free text segment.
pub fn parse_blocks(text: &str, blocks: &mut Vec<Block>) {
    let mut builder = BlockBuilder {
        blocks,
        paragraph: Vec::new(),
        list: None,
    };

    for line in text.split('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            builder.flush_paragraph();
            builder.close_list();
        } else if let Some((level, content)) = heading(line) {
            builder.flush_paragraph();
            builder.close_list();
            builder.blocks.push(Block::Heading {
                level,
                content: parse_inlines(content),
            });
        } else if let Some(content) = line.strip_prefix("> ") {
            builder.flush_paragraph();
            builder.close_list();
            builder.blocks.push(Block::Quote(parse_inlines(content)));
        } else if let Some((kind, content)) = list_item(trimmed) {
            builder.flush_paragraph();
            builder.push_item(kind, parse_inlines(content));
        } else {
            builder.close_list();
            builder.paragraph.push(trimmed);
        }
    }

    builder.flush_paragraph();
    builder.close_list();
}

struct BlockBuilder<'b, 't> {
    blocks: &'b mut Vec<Block>,
    paragraph: Vec<&'t str>,
    list: Option<(ListKind, Vec<Vec<Inline>>)>,
}

impl BlockBuilder<'_, '_> {
    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let lines = self.paragraph.drain(..).map(parse_inlines).collect();
        self.blocks.push(Block::Paragraph(lines));
    }

    fn close_list(&mut self) {
        if let Some((kind, items)) = self.list.take() {
            self.blocks.push(Block::List { kind, items });
        }
    }

    fn push_item(&mut self, kind: ListKind, item: Vec<Inline>) {
        if matches!(&self.list, Some((open, _)) if *open != kind) {
            self.close_list();
        }
        self.list
            .get_or_insert_with(|| (kind, Vec::new()))
            .1
            .push(item);
    }
}

/// `# `, `## ` or `### ` at the very start of the line.
fn heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    if !(1..=3).contains(&hashes) {
        return None;
    }
    let content = line[hashes..].strip_prefix(' ')?;
    Some((hashes as u8, content.trim_end()))
}

/// `<digits>. ` or `- ` / `* ` on an already trimmed line. Only the single
/// whitespace character after the marker is consumed.
fn list_item(trimmed: &str) -> Option<(ListKind, &str)> {
    let digits = trimmed.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 {
        let after = trimmed[digits..].strip_prefix('.')?;
        return strip_one_whitespace(after).map(|rest| (ListKind::Ordered, rest));
    }

    let after = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('*'))?;
    strip_one_whitespace(after).map(|rest| (ListKind::Unordered, rest))
}

fn strip_one_whitespace(text: &str) -> Option<&str> {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_whitespace() => Some(chars.as_str()),
        _ => None,
    }
}

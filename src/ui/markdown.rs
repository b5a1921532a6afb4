//! Terminal rendering of chat messages.
//!
//! Assistant replies are parsed into the same block tree the HTML renderer
//! uses and turned into styled `ratatui` lines.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::message::Message;
use crate::render::markdown::highlight::highlight_code;
use crate::render::markdown::{parse_markdown, Block, Inline, ListKind};
use crate::ui::theme::Theme;

const USER_PREFIX: &str = "You: ";
const QUOTE_PREFIX: &str = "│ ";
const BULLET: &str = "• ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRenderConfig {
    pub markdown: bool,
    pub syntax: bool,
}

impl MessageRenderConfig {
    pub fn markdown(markdown: bool, syntax: bool) -> Self {
        Self { markdown, syntax }
    }
}

/// Lines for one message, followed by a blank separator line.
pub fn render_message(
    message: &Message,
    theme: &Theme,
    config: MessageRenderConfig,
) -> Vec<Line<'static>> {
    let mut lines = if message.is_user() {
        user_lines(&message.content, theme)
    } else if config.markdown {
        markdown_lines(&message.content, theme, config.syntax)
    } else {
        plain_lines(&message.content, theme.assistant_text_style)
    };
    lines.push(Line::default());
    lines
}

fn user_lines(content: &str, theme: &Theme) -> Vec<Line<'static>> {
    let indent = " ".repeat(USER_PREFIX.len());
    content
        .split('\n')
        .enumerate()
        .map(|(index, line)| {
            let prefix = if index == 0 {
                Span::styled(USER_PREFIX, theme.user_prefix_style)
            } else {
                Span::raw(indent.clone())
            };
            Line::from(vec![
                prefix,
                Span::styled(line.to_string(), theme.user_text_style),
            ])
        })
        .collect()
}

fn plain_lines(content: &str, style: Style) -> Vec<Line<'static>> {
    if content.is_empty() {
        return Vec::new();
    }
    content
        .split('\n')
        .map(|line| Line::from(Span::styled(line.to_string(), style)))
        .collect()
}

pub fn markdown_lines(content: &str, theme: &Theme, syntax: bool) -> Vec<Line<'static>> {
    let blocks = parse_markdown(content);
    let mut lines = Vec::new();
    for (index, block) in blocks.iter().enumerate() {
        if index > 0 {
            lines.push(Line::default());
        }
        block_lines(block, theme, syntax, &mut lines);
    }
    lines
}

fn block_lines(block: &Block, theme: &Theme, syntax: bool, lines: &mut Vec<Line<'static>>) {
    let base = theme.assistant_text_style;
    match block {
        Block::Heading { content, .. } => {
            lines.push(Line::from(inline_spans(content, theme, theme.heading_style)));
        }
        Block::Quote(content) => {
            let mut spans = vec![Span::styled(QUOTE_PREFIX, theme.quote_style)];
            spans.extend(inline_spans(content, theme, theme.quote_style));
            lines.push(Line::from(spans));
        }
        Block::List { kind, items } => {
            for (index, item) in items.iter().enumerate() {
                let marker = match kind {
                    ListKind::Ordered => format!("{}. ", index + 1),
                    ListKind::Unordered => BULLET.to_string(),
                };
                let mut spans = vec![Span::styled(marker, theme.list_marker_style)];
                spans.extend(inline_spans(item, theme, base));
                lines.push(Line::from(spans));
            }
        }
        Block::Paragraph(paragraph) => {
            for line in paragraph {
                lines.push(Line::from(inline_spans(line, theme, base)));
            }
        }
        Block::Code { lang, code } => code_lines(lang, code, theme, syntax, lines),
    }
}

fn code_lines(lang: &str, code: &str, theme: &Theme, syntax: bool, lines: &mut Vec<Line<'static>>) {
    let tokens = if syntax {
        highlight_code(lang, code)
    } else {
        None
    };
    let Some(tokens) = tokens else {
        lines.extend(plain_lines(code, theme.code_block_style));
        return;
    };

    let mut current: Vec<Span<'static>> = Vec::new();
    for token in tokens {
        let style = token
            .class
            .map_or(theme.code_block_style, |class| theme.syntax_style(class));
        // Multi-line strings and comments continue on the next line.
        for (index, piece) in token.text.split('\n').enumerate() {
            if index > 0 {
                lines.push(Line::from(std::mem::take(&mut current)));
            }
            if !piece.is_empty() {
                current.push(Span::styled(piece.to_string(), style));
            }
        }
    }
    lines.push(Line::from(current));
}

fn inline_spans(inlines: &[Inline], theme: &Theme, style: Style) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    collect_spans(inlines, theme, style, &mut spans);
    spans
}

fn collect_spans(inlines: &[Inline], theme: &Theme, style: Style, spans: &mut Vec<Span<'static>>) {
    for inline in inlines {
        match inline {
            Inline::Text(text) => spans.push(Span::styled(text.clone(), style)),
            Inline::Code(code) => spans.push(Span::styled(code.clone(), theme.inline_code_style)),
            Inline::Strong(children) => {
                collect_spans(children, theme, style.add_modifier(Modifier::BOLD), spans)
            }
            Inline::Emphasis(children) => {
                collect_spans(children, theme, style.add_modifier(Modifier::ITALIC), spans)
            }
        }
    }
}

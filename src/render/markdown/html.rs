//! HTML serialization of the block tree.

use super::blocks::{Block, ListKind};
use super::highlight::highlight_code;
use super::inline::Inline;
use super::RenderOptions;

/// Escape the characters that would otherwise open markup.
pub fn escape_html(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn escape_attribute(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => escape_html(c.encode_utf8(&mut [0; 4]), out),
        }
    }
}

pub fn write_blocks(blocks: &[Block], options: &RenderOptions) -> String {
    let mut writer = HtmlWriter {
        out: String::new(),
        raw_html: options.raw_html,
    };
    for (index, block) in blocks.iter().enumerate() {
        if index > 0 {
            writer.out.push('\n');
        }
        writer.block(block, options.highlight);
    }
    writer.out
}

struct HtmlWriter {
    out: String,
    raw_html: bool,
}

impl HtmlWriter {
    fn text(&mut self, text: &str) {
        if self.raw_html {
            self.out.push_str(text);
        } else {
            escape_html(text, &mut self.out);
        }
    }

    fn block(&mut self, block: &Block, highlight: bool) {
        match block {
            Block::Code { lang, code } => self.code_block(lang, code, highlight),
            Block::Heading { level, content } => {
                self.out.push_str(&format!("<h{level}>"));
                self.inlines(content);
                self.out.push_str(&format!("</h{level}>"));
            }
            Block::Quote(content) => {
                self.out.push_str("<blockquote>");
                self.inlines(content);
                self.out.push_str("</blockquote>");
            }
            Block::List { kind, items } => {
                let tag = match kind {
                    ListKind::Ordered => "ol",
                    ListKind::Unordered => "ul",
                };
                self.out.push_str(&format!("<{tag}>\n"));
                for item in items {
                    self.out.push_str("<li>");
                    self.inlines(item);
                    self.out.push_str("</li>\n");
                }
                self.out.push_str(&format!("</{tag}>"));
            }
            Block::Paragraph(lines) => {
                self.out.push_str("<p>");
                for (index, line) in lines.iter().enumerate() {
                    if index > 0 {
                        self.out.push_str("<br>");
                    }
                    self.inlines(line);
                }
                self.out.push_str("</p>");
            }
        }
    }

    fn code_block(&mut self, lang: &str, code: &str, highlight: bool) {
        self.out.push_str("<pre><code");
        // Untagged fences get no class at all, not an empty `language-`.
        if !lang.is_empty() {
            self.out.push_str(" class=\"language-");
            escape_attribute(lang, &mut self.out);
            self.out.push('"');
        }
        self.out.push('>');

        let tokens = if highlight {
            highlight_code(lang, code)
        } else {
            None
        };
        match tokens {
            Some(tokens) => {
                for token in tokens {
                    match token.class {
                        Some(class) => {
                            self.out.push_str(&format!("<span class=\"{class}\">"));
                            escape_html(&token.text, &mut self.out);
                            self.out.push_str("</span>");
                        }
                        None => escape_html(&token.text, &mut self.out),
                    }
                }
            }
            None => escape_html(code, &mut self.out),
        }

        self.out.push_str("</code></pre>");
    }

    fn inlines(&mut self, inlines: &[Inline]) {
        for inline in inlines {
            match inline {
                Inline::Text(text) => self.text(text),
                Inline::Code(code) => {
                    self.out.push_str("<code>");
                    escape_html(code, &mut self.out);
                    self.out.push_str("</code>");
                }
                Inline::Strong(children) => {
                    self.out.push_str("<strong>");
                    self.inlines(children);
                    self.out.push_str("</strong>");
                }
                Inline::Emphasis(children) => {
                    self.out.push_str("<em>");
                    self.inlines(children);
                    self.out.push_str("</em>");
                }
            }
        }
    }
}

//! Markdown to HTML for assistant replies.
//!
//! Rendering is an ordered pipeline over a small token tree:
//!
//! 1. [`blocks::normalize_line_endings`]
//! 2. [`blocks::split_fences`] pulls fenced code out of the text first, so
//!    nothing inside a fence is ever read as markdown.
//! 3. [`blocks::parse_blocks`] classifies the remaining lines into headings,
//!    blockquotes, grouped lists and paragraphs; each line's inline text goes
//!    through [`inline::parse_inlines`] (code spans, then `**`/`__` strong,
//!    then `*` emphasis).
//! 4. [`html::write_blocks`] serializes the tree, highlighting code blocks
//!    via [`highlight`].
//!
//! Every stage consumes the previous stage's structure, never re-scanned
//! text, so later rules cannot corrupt what earlier ones produced.

pub mod blocks;
pub mod highlight;
pub mod html;
pub mod inline;

#[cfg(test)]
mod tests;

pub use blocks::{parse_markdown, Block, ListKind};
pub use highlight::{highlight_code, CodeToken, HighlightClass, LanguageFamily};
pub use inline::Inline;

/// Knobs for [`render_markdown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit text verbatim instead of escaping `&`, `<` and `>`. Only for
    /// content from a trusted source.
    pub raw_html: bool,
    /// Mark up tokens inside fenced code of recognized languages.
    pub highlight: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            raw_html: false,
            highlight: true,
        }
    }
}

impl RenderOptions {
    pub fn with_raw_html(mut self, raw_html: bool) -> Self {
        self.raw_html = raw_html;
        self
    }

    pub fn with_highlight(mut self, highlight: bool) -> Self {
        self.highlight = highlight;
        self
    }
}

/// Render a reply to HTML. Safe to call on every streamed snapshot.
pub fn render_markdown(text: &str, options: &RenderOptions) -> String {
    let blocks = parse_markdown(text);
    html::write_blocks(&blocks, options)
}

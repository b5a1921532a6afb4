//! Standalone HTML page for a conversation transcript.

use std::path::Path;

use crate::core::config::Appearance;
use crate::core::message::Message;
use crate::render::markdown::html::escape_html;
use crate::render::markdown::{render_markdown, RenderOptions};
use crate::utils::fs::write_atomic;

const STYLESHEET: &str = "\
body { font-family: sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }
html.dark body { background: #1e1e1e; color: #ddd; }
.message { margin: 1rem 0; padding: 0.5rem 1rem; border-radius: 0.5rem; }
.message.user { background: #e8f0fe; white-space: pre-wrap; }
html.dark .message.user { background: #2b3a55; }
pre { background: #f4f4f4; padding: 0.75rem; overflow-x: auto; }
html.dark pre { background: #111; }
blockquote { border-left: 3px solid #999; margin-left: 0; padding-left: 0.75rem; }
.keyword { color: #c678dd; }
.function { color: #61afef; }
.class { color: #e5c07b; }
.builtin { color: #56b6c2; }
.number { color: #d19a66; }
.decorator { color: #e06c75; }
.string { color: #98c379; }
.comment { color: #7f848e; font-style: italic; }
";

/// Render every message into one page. User text is shown as typed;
/// assistant replies go through the markdown renderer.
pub fn render_transcript(
    messages: &[Message],
    appearance: Appearance,
    options: &RenderOptions,
) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n");
    match appearance {
        Appearance::Dark => out.push_str("<html class=\"dark\">\n"),
        Appearance::Light => out.push_str("<html>\n"),
    }
    out.push_str("<head>\n<meta charset=\"utf-8\">\n<title>Chat transcript</title>\n<style>\n");
    out.push_str(STYLESHEET);
    out.push_str("</style>\n</head>\n<body>\n");

    for message in messages {
        out.push_str(&format!(
            "<div class=\"message {}\" id=\"{}\">\n",
            message.role.as_str(),
            message.id
        ));
        if message.is_user() {
            escape_html(&message.content, &mut out);
        } else {
            out.push_str(&render_markdown(&message.content, options));
        }
        out.push_str("\n</div>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}

pub fn export_transcript(
    path: &Path,
    messages: &[Message],
    appearance: Appearance,
    options: &RenderOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let page = render_transcript(messages, appearance, options);
    write_atomic(path, page.as_bytes())
}

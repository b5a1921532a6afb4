use crate::render::markdown::{render_markdown, Inline, RenderOptions};

pub fn render(text: &str) -> String {
    render_markdown(text, &RenderOptions::default())
}

pub fn render_with(text: &str, options: RenderOptions) -> String {
    render_markdown(text, &options)
}

pub fn text(s: &str) -> Inline {
    Inline::Text(s.to_string())
}

pub fn strong(children: Vec<Inline>) -> Inline {
    Inline::Strong(children)
}

pub fn em(children: Vec<Inline>) -> Inline {
    Inline::Emphasis(children)
}

pub fn code(s: &str) -> Inline {
    Inline::Code(s.to_string())
}

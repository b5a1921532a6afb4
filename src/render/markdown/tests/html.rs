use super::helpers::{render, render_with};
use crate::render::markdown::RenderOptions;

#[test]
fn inline_markup_renders() {
    assert_eq!(
        render("**bold** and *italic* and snake_case_word"),
        "<p><strong>bold</strong> and <em>italic</em> and snake_case_word</p>"
    );
}

#[test]
fn python_fence_is_tagged_and_highlighted() {
    let html = render("```python\nprint(\"hi\")\n```");
    assert!(html.starts_with("<pre><code class=\"language-python\">"));
    assert!(html.contains("<span class=\"builtin\">print</span>"));
    assert!(html.contains("<span class=\"string\">\"hi\"</span>"));
    assert!(html.ends_with("</code></pre>"));
}

#[test]
fn one_line_fence_keeps_its_language() {
    assert_eq!(
        render("```python print(\"x\")```"),
        "<pre><code class=\"language-python\"><span class=\"builtin\">print</span>(<span class=\"string\">\"x\"</span>)</code></pre>"
    );
}

#[test]
fn highlighted_code_keeps_its_text() {
    let source = "def area(r):\n    return 3.14 * r ** 2  # circle";
    let html = render(&format!("```py\n{source}\n```"));
    let mut stripped = String::new();
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => stripped.push(c),
            _ => {}
        }
    }
    assert_eq!(stripped, source);
}

#[test]
fn lists_of_different_kinds_are_separate() {
    assert_eq!(
        render("1. a\n2. b\n- c"),
        "<ol>\n<li>a</li>\n<li>b</li>\n</ol>\n<ul>\n<li>c</li>\n</ul>"
    );
}

#[test]
fn blank_line_separates_paragraphs() {
    assert_eq!(
        render("first line\n\nsecond line"),
        "<p>first line</p>\n<p>second line</p>"
    );
}

#[test]
fn single_newline_is_a_break() {
    assert_eq!(render("a\r\nb"), "<p>a<br>b</p>");
}

#[test]
fn paragraphs_never_nest() {
    let html = render("one\n\n## Two\n\n> three\n\n- four\n\nfive\nsix\n```\ncode\n```\nseven");
    assert!(!html.contains("<p><p>"));
    assert!(!html.contains("</p></p>"));
    assert!(!html.contains("<p><h"));
    assert!(!html.contains("<p><ul>"));
    assert!(!html.contains("<p><pre>"));
}

#[test]
fn fence_without_language_has_no_class() {
    assert_eq!(
        render("Here:\n```\nx < 1\n```\nDone"),
        "<p>Here:</p>\n<pre><code>x &lt; 1</code></pre>\n<p>Done</p>"
    );
}

#[test]
fn unclosed_fence_still_renders_as_code() {
    assert_eq!(
        render("```js\nconst x"),
        "<pre><code class=\"language-js\"><span class=\"keyword\">const</span> x</code></pre>"
    );
}

#[test]
fn headings_and_quotes() {
    assert_eq!(
        render("# Title\n> quoted *word*"),
        "<h1>Title</h1>\n<blockquote>quoted <em>word</em></blockquote>"
    );
}

#[test]
fn text_is_escaped_by_default() {
    assert_eq!(
        render("<script>alert(1)</script> & `<b>`"),
        "<p>&lt;script&gt;alert(1)&lt;/script&gt; &amp; <code>&lt;b&gt;</code></p>"
    );
}

#[test]
fn raw_html_passes_text_through_but_not_code() {
    let options = RenderOptions::default().with_raw_html(true);
    assert_eq!(
        render_with("<u>under</u> `<b>`", options),
        "<p><u>under</u> <code>&lt;b&gt;</code></p>"
    );
    assert_eq!(
        render_with("```\n<b>\n```", options),
        "<pre><code>&lt;b&gt;</code></pre>"
    );
}

#[test]
fn highlighting_can_be_disabled() {
    let options = RenderOptions::default().with_highlight(false);
    assert_eq!(
        render_with("```python\nprint(1)\n```", options),
        "<pre><code class=\"language-python\">print(1)</code></pre>"
    );
}

#[test]
fn unknown_language_is_tagged_but_plain() {
    assert_eq!(
        render("```rust\nfn main() {}\n```"),
        "<pre><code class=\"language-rust\">fn main() {}</code></pre>"
    );
}

#[test]
fn language_attribute_is_escaped() {
    assert_eq!(
        render("```a\"b\nx\n```"),
        "<pre><code class=\"language-a&quot;b\">x</code></pre>"
    );
}

#[test]
fn every_streamed_prefix_renders() {
    let reply = "# Plan\n\n1. **Read** the `input`\n2. Write:\n```python\ndef f(x):\n    return x * 2\n```\n> done";
    for end in 0..=reply.len() {
        if reply.is_char_boundary(end) {
            let html = render(&reply[..end]);
            assert!(!html.contains("<p><p>"));
        }
    }
}

#[test]
fn empty_reply_renders_nothing() {
    assert_eq!(render(""), "");
    assert_eq!(render("\n\n"), "");
}

use super::helpers::text;
use crate::render::markdown::blocks::{normalize_line_endings, split_fences, Segment};
use crate::render::markdown::{parse_markdown, Block, ListKind};

#[test]
fn fences_are_cut_out_before_anything_else() {
    let segments = split_fences("Intro\n```python\n# not a heading\n```\nOutro");
    assert_eq!(
        segments,
        vec![
            Segment::Text("Intro\n"),
            Segment::Code {
                lang: "python",
                code: "# not a heading",
            },
            Segment::Text("\nOutro"),
        ]
    );
}

#[test]
fn unclosed_fence_runs_to_end() {
    let segments = split_fences("```js\nconst x = 1;\n");
    assert_eq!(
        segments,
        vec![Segment::Code {
            lang: "js",
            code: "const x = 1;",
        }]
    );
}

#[test]
fn same_line_fence_with_one_word_has_no_language() {
    let segments = split_fences("use ```x``` here");
    assert_eq!(
        segments,
        vec![
            Segment::Text("use "),
            Segment::Code { lang: "", code: "x" },
            Segment::Text(" here"),
        ]
    );
}

#[test]
fn same_line_fence_takes_a_leading_language_word() {
    assert_eq!(
        split_fences("```python print(\"x\")```"),
        vec![Segment::Code {
            lang: "python",
            code: "print(\"x\")",
        }]
    );
    assert_eq!(
        split_fences("```a+b```"),
        vec![Segment::Code {
            lang: "",
            code: "a+b",
        }]
    );
}

#[test]
fn carriage_returns_become_newlines() {
    assert_eq!(normalize_line_endings("a\r\nb\rc"), "a\nb\nc");
    assert!(matches!(
        normalize_line_endings("a\nb"),
        std::borrow::Cow::Borrowed(_)
    ));
}

#[test]
fn headings_need_a_space_and_at_most_three_hashes() {
    assert_eq!(
        parse_markdown("### Three\n#### Four\n#NoSpace"),
        vec![
            Block::Heading {
                level: 3,
                content: vec![text("Three")],
            },
            Block::Paragraph(vec![vec![text("#### Four")], vec![text("#NoSpace")]]),
        ]
    );
}

#[test]
fn each_quote_line_is_its_own_block() {
    assert_eq!(
        parse_markdown("> one\n> two"),
        vec![
            Block::Quote(vec![text("one")]),
            Block::Quote(vec![text("two")]),
        ]
    );
}

#[test]
fn list_kind_switch_starts_a_new_list() {
    assert_eq!(
        parse_markdown("1. a\n2. b\n- c"),
        vec![
            Block::List {
                kind: ListKind::Ordered,
                items: vec![vec![text("a")], vec![text("b")]],
            },
            Block::List {
                kind: ListKind::Unordered,
                items: vec![vec![text("c")]],
            },
        ]
    );
}

#[test]
fn list_markers_need_following_whitespace() {
    assert_eq!(
        parse_markdown("-dash\n3.5 apples"),
        vec![Block::Paragraph(vec![
            vec![text("-dash")],
            vec![text("3.5 apples")],
        ])]
    );
}

#[test]
fn indented_items_join_the_list() {
    assert_eq!(
        parse_markdown("- a\n   * b"),
        vec![Block::List {
            kind: ListKind::Unordered,
            items: vec![vec![text("a")], vec![text("b")]],
        }]
    );
}

#[test]
fn text_after_list_closes_it() {
    assert_eq!(
        parse_markdown("- a\nafter"),
        vec![
            Block::List {
                kind: ListKind::Unordered,
                items: vec![vec![text("a")]],
            },
            Block::Paragraph(vec![vec![text("after")]]),
        ]
    );
}

#[test]
fn blank_lines_split_paragraphs_and_lines_are_trimmed() {
    assert_eq!(
        parse_markdown("  first  \nsecond\n\n\nthird"),
        vec![
            Block::Paragraph(vec![vec![text("first")], vec![text("second")]]),
            Block::Paragraph(vec![vec![text("third")]]),
        ]
    );
}

#[test]
fn blank_input_has_no_blocks() {
    assert!(parse_markdown("").is_empty());
    assert!(parse_markdown(" \n\n\t").is_empty());
}

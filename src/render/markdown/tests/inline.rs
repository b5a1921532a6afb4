use super::helpers::{code, em, strong, text};
use crate::render::markdown::inline::parse_inlines;
use crate::render::markdown::Inline;

#[test]
fn strong_emphasis_and_snake_case() {
    assert_eq!(
        parse_inlines("**bold** and *italic* and snake_case_word"),
        vec![
            strong(vec![text("bold")]),
            text(" and "),
            em(vec![text("italic")]),
            text(" and snake_case_word"),
        ]
    );
}

#[test]
fn double_underscore_is_strong_single_is_not_emphasis() {
    assert_eq!(
        parse_inlines("__loud__ _quiet_"),
        vec![strong(vec![text("loud")]), text(" _quiet_")]
    );
}

#[test]
fn emphasis_nests_inside_strong() {
    assert_eq!(
        parse_inlines("**bold *and* italic**"),
        vec![strong(vec![
            text("bold "),
            em(vec![text("and")]),
            text(" italic"),
        ])]
    );
}

#[test]
fn code_spans_hide_delimiters() {
    assert_eq!(
        parse_inlines("`**not bold**` and **bold**"),
        vec![
            code("**not bold**"),
            text(" and "),
            strong(vec![text("bold")]),
        ]
    );
}

#[test]
fn empty_backticks_are_literal() {
    assert_eq!(parse_inlines("a `` b"), vec![text("a `` b")]);
}

#[test]
fn unmatched_delimiters_stay_as_text() {
    assert_eq!(parse_inlines("**bol"), vec![text("**bol")]);
    assert_eq!(parse_inlines("2 * 3 = 6"), vec![text("2 * 3 = 6")]);
    assert_eq!(parse_inlines("*"), vec![text("*")]);
}

#[test]
fn plain_text_strips_markup() {
    let inlines = parse_inlines("**a** `b` *c*");
    assert_eq!(Inline::plain_text(&inlines), "a b c");
}

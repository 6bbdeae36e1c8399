//! Highlighter tests over whole stylesheets
//!
//! Feeds complete documents one character at a time and checks the markup
//! that comes out the other end.

mod common;

use common::{highlight_all, CSS, OVERLAY};
use livetype::highlight::{apply, strip_markup, LexState, SpanClass};

fn count_spans(markup: &str, class: SpanClass) -> usize {
    markup
        .matches(&format!("<span class=\"{}\">", class.name()))
        .count()
}

// ========================================================================
// Whole Documents
// ========================================================================

#[test]
fn test_sample_stylesheet_markup() {
    let (markup, state) = highlight_all(CSS);
    assert!(!state.inside_comment);

    assert_eq!(count_spans(&markup, SpanClass::Comment), 1);
    assert_eq!(count_spans(&markup, SpanClass::Selector), 2);
    assert_eq!(count_spans(&markup, SpanClass::Key), 3);
    assert_eq!(count_spans(&markup, SpanClass::Value), 3);
    assert_eq!(count_spans(&markup, SpanClass::Unit), 2);

    assert!(markup.starts_with("<span class=\"comment\">/* page */</span>\n"));
    assert!(markup.contains("<span class=\"selector\">h1,\nh2 </span>{"));
    assert!(markup.contains("2<span class=\"unit\">em</span>"));
    assert!(markup.contains("1.5<span class=\"unit\">rem</span>"));
}

#[test]
fn test_markup_strips_back_to_source() {
    for source in [CSS, OVERLAY] {
        let (markup, _) = highlight_all(source);
        assert_eq!(strip_markup(&markup), source);
    }
}

#[test]
fn test_state_carries_across_documents() {
    // the overlay is typed into the same buffer after the first stylesheet
    let (markup, _) = highlight_all(&format!("{CSS}{OVERLAY}"));
    assert!(markup.ends_with(
        "<span class=\"selector\">p </span>{<span class=\"key\">\n  color</span>:<span class=\"value\"> red</span>;\n}\n"
    ));
}

// ========================================================================
// Comments
// ========================================================================

#[test]
fn test_declarations_inside_comment_are_not_marked() {
    let (markup, _) = highlight_all("/*\n  a { color: 1px; }\n*/\nb {");
    assert_eq!(count_spans(&markup, SpanClass::Key), 0);
    assert_eq!(count_spans(&markup, SpanClass::Unit), 0);
    assert_eq!(count_spans(&markup, SpanClass::Comment), 1);
    assert!(markup.ends_with("\n<span class=\"selector\">b </span>{"));
}

#[test]
fn test_unterminated_comment_stays_open() {
    let (markup, state) = highlight_all("/* still typing; {");
    assert!(state.inside_comment);
    assert_eq!(markup, "/* still typing; {");
}

#[test]
fn test_lone_slash_enters_comment_mode() {
    let (_, state) = apply("a", LexState::default(), '/');
    assert!(state.inside_comment);

    let (markup, state) = apply("a/", state, ';');
    assert_eq!(markup, "a/;");
    assert!(state.inside_comment);
}

// ========================================================================
// Declarations
// ========================================================================

#[test]
fn test_units_are_wrapped_once_per_number() {
    let (markup, _) = highlight_all("margin: 0 10px 2em 5;");
    assert_eq!(count_spans(&markup, SpanClass::Unit), 2);
    assert!(markup.contains(" 0 10<span class=\"unit\">px</span>"));
    assert!(markup.contains(" 5</span>;"));
}

#[test]
fn test_value_spans_back_to_last_colon() {
    let (markup, _) = highlight_all("a:hover { color: red;");
    assert!(markup.ends_with(
        "a:hover </span>{<span class=\"key\"> color</span>:<span class=\"value\"> red</span>;"
    ));
}

//! Character-at-a-time CSS highlighter
//!
//! The highlighter keeps no state of its own: callers own the marked-up
//! buffer and the [`LexState`] and hand both in with every character.

use super::markup::{push_span, SpanClass};

/// Unit suffixes recognised after a number, tried in this order
pub const UNITS: &[&str] = &["px", "vh", "vw", "em", "rem", "s"];

/// Lexical state carried between characters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexState {
    /// True while inside an unterminated `/* ... */` span.
    ///
    /// Every `/` outside a comment sets this, whether or not a `*` follows.
    pub inside_comment: bool,
}

/// Feed one character, returning the new buffer and state
pub fn apply(buffer: &str, state: LexState, ch: char) -> (String, LexState) {
    let mut buffer = buffer.to_string();
    let mut state = state;
    feed(&mut buffer, &mut state, ch);
    (buffer, state)
}

/// Feed one character into `buffer` in place
pub fn feed(buffer: &mut String, state: &mut LexState, ch: char) {
    if state.inside_comment && ch != '/' {
        buffer.push(ch);
        return;
    }

    match ch {
        '/' if !state.inside_comment => {
            state.inside_comment = true;
            buffer.push('/');
        }
        '/' if buffer.ends_with('*') => {
            state.inside_comment = false;
            close_comment(buffer);
        }
        ';' => close_declaration(buffer),
        '{' => open_block(buffer),
        _ => buffer.push(ch),
    }
}

/// Wrap the trailing `/* ... *` run plus the closing `/` in a comment span.
///
/// If no open run is found the `/` is dropped.
fn close_comment(buffer: &mut String) {
    let Some(start) = open_comment_start(buffer) else {
        tracing::trace!("no open comment run before '*/', dropping '/'");
        return;
    };

    let mut comment = buffer.split_off(start);
    comment.push('/');
    push_span(buffer, SpanClass::Comment, &comment);
}

/// Byte offset of the comment opener the trailing `*` closes.
///
/// That is the last `/*` in the buffer, or the `/*` directly in front of it
/// when two openers touch (`/*/*`). The trailing `*` has to be a different
/// character from the opener's own `*`.
fn open_comment_start(buffer: &str) -> Option<usize> {
    let opener = buffer.rfind("/*")?;
    let start = if buffer[..opener].ends_with("/*") {
        opener - 2
    } else {
        opener
    };
    (buffer.len() >= start + 3).then_some(start)
}

/// Wrap `key:value` at the tail in key/value spans and append `;`.
///
/// The value runs from the last `:` in the buffer to the end; the key is the
/// run of name characters directly before that colon. Without a colon the `;`
/// goes in unmarked.
fn close_declaration(buffer: &mut String) {
    let Some(colon) = buffer.rfind(':') else {
        buffer.push(';');
        return;
    };

    let key_start = buffer[..colon]
        .char_indices()
        .rev()
        .take_while(|&(_, c)| is_key_char(c))
        .last()
        .map_or(colon, |(i, _)| i);

    let value = buffer.split_off(colon + 1);
    buffer.truncate(colon);
    let key = buffer.split_off(key_start);

    let mut marked_value = String::with_capacity(value.len());
    mark_units(&value, &mut marked_value);

    push_span(buffer, SpanClass::Key, &key);
    buffer.push(':');
    push_span(buffer, SpanClass::Value, &marked_value);
    buffer.push(';');
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '-' | ' ' | '^' | '\n')
}

/// Copy `value` into `out`, wrapping the unit after each number in a unit span
fn mark_units(value: &str, out: &mut String) {
    let mut rest = value;

    while let Some(digit) = rest.find(|c: char| c.is_ascii_digit()) {
        let digits_end = rest[digit..]
            .find(|c: char| !c.is_ascii_digit())
            .map_or(rest.len(), |n| digit + n);
        out.push_str(&rest[..digits_end]);
        rest = &rest[digits_end..];

        if let Some(unit) = UNITS.iter().find(|unit| rest.starts_with(**unit)) {
            push_span(out, SpanClass::Unit, unit);
            rest = &rest[unit.len()..];
        }
    }

    out.push_str(rest);
}

/// Wrap the selector at the tail in a selector span and append `{`
fn open_block(buffer: &mut String) {
    let start = selector_start(buffer);
    let selector = buffer.split_off(start);
    push_span(buffer, SpanClass::Selector, &selector);
    buffer.push('{');
}

/// Start of the trailing selector text.
///
/// Scans back to the most recent line break, stepping over breaks that
/// directly follow a comma (`,\n`, `,\r`, `,\r\n`) so that selector lists
/// split across lines stay together.
fn selector_start(buffer: &str) -> usize {
    let bytes = buffer.as_bytes();
    let mut start = bytes.len();

    while start > 0 {
        match bytes[start - 1] {
            b'\n' if start >= 2 && bytes[start - 2] == b',' => start -= 2,
            b'\n' if start >= 3 && bytes[start - 2] == b'\r' && bytes[start - 3] == b',' => {
                start -= 3
            }
            b'\r' if start >= 2 && bytes[start - 2] == b',' => start -= 2,
            b'\n' | b'\r' => break,
            _ => start -= 1,
        }
    }

    start
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::strip_markup;

    fn highlight(text: &str) -> (String, LexState) {
        let mut buffer = String::new();
        let mut state = LexState::default();
        for ch in text.chars() {
            feed(&mut buffer, &mut state, ch);
        }
        (buffer, state)
    }

    #[test]
    fn test_plain_chars_append() {
        let (buffer, state) = highlight("body ");
        assert_eq!(buffer, "body ");
        assert!(!state.inside_comment);
    }

    #[test]
    fn test_apply_is_pure() {
        let (buffer, state) = apply("a", LexState::default(), '/');
        assert_eq!(buffer, "a/");
        assert!(state.inside_comment);

        let (buffer, state) = apply("x", LexState::default(), 'y');
        assert_eq!(buffer, "xy");
        assert_eq!(state, LexState::default());
    }

    #[test]
    fn test_comment_is_wrapped_whole() {
        let (buffer, state) = highlight("/* color */");
        assert_eq!(buffer, "<span class=\"comment\">/* color */</span>");
        assert!(!state.inside_comment);
    }

    #[test]
    fn test_comment_suppresses_declarations() {
        let (buffer, _) = highlight("/* color: red; a { */");
        assert_eq!(
            buffer,
            "<span class=\"comment\">/* color: red; a { */</span>"
        );
        assert!(!buffer.contains("class=\"key\""));
        assert!(!buffer.contains("class=\"selector\""));
    }

    #[test]
    fn test_slash_inside_comment_without_star_is_plain() {
        let (buffer, state) = highlight("/* a/b");
        assert_eq!(buffer, "/* a/b");
        assert!(state.inside_comment);
    }

    #[test]
    fn test_unopened_comment_close_drops_slash() {
        // "/" enters comment mode but no "/*" exists to close
        let (buffer, state) = highlight("a/b*/");
        assert_eq!(buffer, "a/b*");
        assert!(!state.inside_comment);
    }

    #[test]
    fn test_comment_close_needs_distinct_star() {
        let (buffer, state) = highlight("/*/");
        assert_eq!(buffer, "/*");
        assert!(!state.inside_comment);
    }

    #[test]
    fn test_touching_openers_close_from_first() {
        let state = LexState {
            inside_comment: true,
        };
        let (buffer, state) = apply("/*/* x *", state, '/');
        assert_eq!(buffer, "<span class=\"comment\">/*/* x */</span>");
        assert!(!state.inside_comment);
    }

    #[test]
    fn test_comment_closes_from_last_opener() {
        let (buffer, _) = highlight("/*a/* x */");
        assert_eq!(buffer, "/*a<span class=\"comment\">/* x */</span>");
    }

    #[test]
    fn test_declaration_with_unit() {
        let (buffer, _) = highlight("width:10px;");
        assert_eq!(
            buffer,
            "<span class=\"key\">width</span>:<span class=\"value\">10<span class=\"unit\">px</span></span>;"
        );
    }

    #[test]
    fn test_unitless_number_gets_no_unit_span() {
        let (buffer, _) = highlight("z-index: 10;");
        assert_eq!(
            buffer,
            "<span class=\"key\">z-index</span>:<span class=\"value\"> 10</span>;"
        );
    }

    #[test]
    fn test_unit_alternatives() {
        let (buffer, _) = highlight("margin: 1rem 2em 3vh 4vw;");
        assert!(buffer.contains("1<span class=\"unit\">rem</span>"));
        assert!(buffer.contains("2<span class=\"unit\">em</span>"));
        assert!(buffer.contains("3<span class=\"unit\">vh</span>"));
        assert!(buffer.contains("4<span class=\"unit\">vw</span>"));

        let (buffer, _) = highlight("transition: all .5s;");
        assert!(buffer.contains(".5<span class=\"unit\">s</span>"));
    }

    #[test]
    fn test_semicolon_without_colon_is_verbatim() {
        let (buffer, _) = highlight("foo;");
        assert_eq!(buffer, "foo;");
    }

    #[test]
    fn test_key_includes_leading_whitespace() {
        let (buffer, _) = highlight("body {\n  color: red;\n}\n");
        assert_eq!(
            buffer,
            "<span class=\"selector\">body </span>{<span class=\"key\">\n  color</span>:<span class=\"value\"> red</span>;\n}\n"
        );
    }

    #[test]
    fn test_selector_stops_at_line_break() {
        let (buffer, _) = highlight("}\n\nhtml {");
        assert_eq!(buffer, "}\n\n<span class=\"selector\">html </span>{");
    }

    #[test]
    fn test_selector_list_spans_comma_breaks() {
        let (buffer, _) = highlight("}\nhtml,\nbody {");
        assert_eq!(buffer, "}\n<span class=\"selector\">html,\nbody </span>{");

        let (buffer, _) = highlight("}\r\nhtml,\r\nbody {");
        assert_eq!(
            buffer,
            "}\r\n<span class=\"selector\">html,\r\nbody </span>{"
        );
    }

    #[test]
    fn test_selector_at_buffer_start() {
        let (buffer, _) = highlight("{");
        assert_eq!(buffer, "<span class=\"selector\"></span>{");
    }

    #[test]
    fn test_markup_strips_back_to_source() {
        let source = "/* Hello */\n\nhtml,\nbody {\n  margin: 0;\n  font-size: 14px;\n}\n\n.pre {\n  transition: all 1s;\n}\n";
        let (buffer, state) = highlight(source);
        assert!(!state.inside_comment);
        assert_eq!(strip_markup(&buffer), source);
    }

    #[test]
    fn test_non_ascii_text() {
        let source = "/* héllo ✓ */\n.é {\n  content: \"ü\";\n}\n";
        let (buffer, _) = highlight(source);
        assert_eq!(strip_markup(&buffer), source);
    }
}

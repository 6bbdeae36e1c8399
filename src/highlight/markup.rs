//! Span markup used by the highlighter

/// Class attached to a highlighted span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanClass {
    /// Property name of a declaration (`color` in `color: red;`)
    Key,
    /// Everything between a declaration's colon and its semicolon
    Value,
    /// Unit suffix of a number inside a value (`px` in `10px`)
    Unit,
    /// Selector text preceding a `{`
    Selector,
    /// A complete `/* ... */` comment
    Comment,
}

const SPAN_CLOSE: &str = "</span>";
const SPAN_OPEN_PREFIX: &str = "<span class=\"";

impl SpanClass {
    pub const ALL: [SpanClass; 5] = [
        SpanClass::Key,
        SpanClass::Value,
        SpanClass::Unit,
        SpanClass::Selector,
        SpanClass::Comment,
    ];

    /// CSS class name written into the markup
    pub fn name(&self) -> &'static str {
        match self {
            SpanClass::Key => "key",
            SpanClass::Value => "value",
            SpanClass::Unit => "unit",
            SpanClass::Selector => "selector",
            SpanClass::Comment => "comment",
        }
    }

    /// Parse a class name back into a span class
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.name() == name)
    }
}

/// Append `<span class="..">inner</span>` to `out`
pub(crate) fn push_span(out: &mut String, class: SpanClass, inner: &str) {
    out.push_str(SPAN_OPEN_PREFIX);
    out.push_str(class.name());
    out.push_str("\">");
    out.push_str(inner);
    out.push_str(SPAN_CLOSE);
}

/// Remove every highlighter span tag, leaving the plain source text.
///
/// Only tags of the form `<span class="...">` and `</span>` are removed; any
/// other `<` in the text is kept as-is.
pub fn strip_markup(text: &str) -> String {
    let mut plain = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(lt) = rest.find('<') {
        plain.push_str(&rest[..lt]);
        let tail = &rest[lt..];

        if let Some(after) = tail.strip_prefix(SPAN_CLOSE) {
            rest = after;
        } else if let Some(gt) = tail
            .strip_prefix(SPAN_OPEN_PREFIX)
            .and_then(|attrs| attrs.find("\">"))
        {
            rest = &tail[SPAN_OPEN_PREFIX.len() + gt + 2..];
        } else {
            plain.push('<');
            rest = &tail[1..];
        }
    }

    plain.push_str(rest);
    plain
}

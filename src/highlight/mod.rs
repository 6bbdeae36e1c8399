//! Incremental CSS highlighting
//!
//! Consumes a stylesheet one character at a time and grows an HTML-marked-up
//! copy of it. Markup is only ever rewritten at the tail of the buffer:
//!
//! ```text
//! char → LexState check → delimiter? ─ no ─→ append
//!                                    └ yes → backward scan of the open tail → wrap in <span>
//! ```
//!
//! Delimiters are `;` (declaration), `{` (selector) and the closing `/` of a
//! `*/` (comment). Everything typed inside a comment is appended untouched.

mod highlighter;
mod markup;

pub use highlighter::{apply, feed, LexState, UNITS};
pub use markup::{strip_markup, SpanClass};

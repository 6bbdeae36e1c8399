//! Markdown rendering for the work stream
//!
//! The work stream is shown as plain text while it is being typed and only
//! converted to HTML once the whole document has arrived.

mod renderer;

pub use renderer::{markdown_to_html, CmarkConverter, MarkdownConverter};

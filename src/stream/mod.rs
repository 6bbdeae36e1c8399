//! Output streams fed by the playback engine
//!
//! Three independent targets are built up character by character:
//!
//! - [`Target::Stylesheet`]: raw CSS actually applied to the page
//! - [`Target::Editor`]: the same CSS with highlight markup
//! - [`Target::Work`]: the Markdown document (plain while partial, HTML once complete)

mod coordinator;
mod renderer;

pub use coordinator::Coordinator;
pub use renderer::{RecordingRenderer, Renderer, WatchRenderer};

use crate::highlight::LexState;

/// One of the three output streams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Stylesheet,
    Editor,
    Work,
}

impl Target {
    pub const ALL: [Target; 3] = [Target::Stylesheet, Target::Editor, Target::Work];

    /// Position in [`Target::ALL`]
    pub fn index(self) -> usize {
        match self {
            Target::Stylesheet => 0,
            Target::Editor => 1,
            Target::Work => 2,
        }
    }
}

/// Accumulated text for one target
#[derive(Debug, Clone, Default)]
pub struct StreamBuffer {
    /// Buffer contents (highlighted markup for the editor target)
    pub text: String,
    /// Lexical state, only meaningful for the editor target
    pub lex: LexState,
    /// Number of source characters consumed so far
    pub consumed: usize,
}

impl StreamBuffer {
    pub fn clear(&mut self) {
        self.text.clear();
        self.lex = LexState::default();
        self.consumed = 0;
    }
}

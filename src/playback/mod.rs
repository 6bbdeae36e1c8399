//! Playback scheduling
//!
//! A session types three documents in a fixed order:
//!
//! ```text
//! Idle → CssSource → Markdown → CssOverlay → Idle
//! ```
//!
//! Each phase writes its source one character at a time through the
//! [`Coordinator`](crate::stream::Coordinator) and waits between characters.
//! The wait is the only place a session can be paused or cancelled.

mod pacing;
mod player;

pub use pacing::{window_at, Pacing};
pub use player::Player;

use tokio_util::sync::CancellationToken;

use crate::stream::Target;

/// Stage of a playback session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Base stylesheet typed into the editor
    CssSource,
    /// Markdown typed into the work pane
    Markdown,
    /// Second stylesheet appended to the editor, at double speed
    CssOverlay,
}

impl Phase {
    /// Phases a session runs through, in order
    pub const SEQUENCE: [Phase; 3] = [Phase::CssSource, Phase::Markdown, Phase::CssOverlay];

    /// Target written during this phase
    pub fn target(self) -> Option<Target> {
        match self {
            Phase::Idle => None,
            Phase::CssSource | Phase::CssOverlay => Some(Target::Editor),
            Phase::Markdown => Some(Target::Work),
        }
    }

    /// Phase that follows this one
    pub fn next(self) -> Phase {
        match self {
            Phase::Idle => Phase::CssSource,
            Phase::CssSource => Phase::Markdown,
            Phase::Markdown => Phase::CssOverlay,
            Phase::CssOverlay => Phase::Idle,
        }
    }
}

/// State of one run from `start` to completion or skip
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    pub phase: Phase,
    /// Characters of the current phase's source already written
    pub cursor: usize,
    cancel: CancellationToken,
}

impl PlaybackSession {
    pub fn new() -> Self {
        Self {
            phase: Phase::CssSource,
            cursor: 0,
            cancel: CancellationToken::new(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Stop the drive loop; it exits at its next check
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub(crate) fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self::new()
    }
}

//! livetype - live-typed, live-applied CSS
//!
//! Reveals a stylesheet and a Markdown page one character at a time. The CSS
//! is highlighted incrementally as it is typed and mirrored into a stylesheet
//! that is applied to the page; the Markdown is shown as plain text until it
//! is complete, then rendered to HTML.
//!
//! ```text
//! Player (drive loop, pause/skip) → Coordinator (buffers) → highlight (markup)
//!                                              └──────────→ Renderer (observers)
//! ```

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod export;
pub mod highlight;
pub mod markdown;
pub mod playback;
pub mod sources;
pub mod stream;
pub mod terminal;
pub mod tracing;

// Re-export commonly used types
pub use config::PlaybackConfig;
pub use playback::{Phase, Player};
pub use sources::Sources;
pub use stream::{Coordinator, Renderer, Target, WatchRenderer};

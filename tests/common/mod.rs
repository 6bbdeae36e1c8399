//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::sync::Arc;

use livetype::highlight::{feed, LexState};
use livetype::markdown::MarkdownConverter;
use livetype::stream::RecordingRenderer;
use livetype::{PlaybackConfig, Player, Sources};

pub const CSS: &str = "/* page */\nbody {\n  margin: 0 auto;\n  padding: 2em;\n}\n\nh1,\nh2 {\n  font-size: 1.5rem;\n}\n";
pub const MARKDOWN: &str = "# Title\n\nHello, world. Again!\n";
pub const OVERLAY: &str = "p {\n  color: red;\n}\n";

/// Converter that makes converted output easy to recognise
pub fn wrapping_converter() -> Arc<dyn MarkdownConverter> {
    Arc::new(|md: &str| format!("<main>{md}</main>"))
}

/// A player over the sample sources, publishing into a recorder
pub fn test_player() -> (Player, Arc<RecordingRenderer>) {
    test_player_with(Sources::new(CSS, MARKDOWN, OVERLAY))
}

pub fn test_player_with(sources: Sources) -> (Player, Arc<RecordingRenderer>) {
    let renderer = Arc::new(RecordingRenderer::default());
    let player = Player::with_converter(
        sources,
        &PlaybackConfig::default(),
        renderer.clone(),
        wrapping_converter(),
    );
    (player, renderer)
}

/// Feed a whole text through the highlighter from a fresh state
pub fn highlight_all(text: &str) -> (String, LexState) {
    let mut buffer = String::new();
    let mut state = LexState::default();
    for ch in text.chars() {
        feed(&mut buffer, &mut state, ch);
    }
    (buffer, state)
}

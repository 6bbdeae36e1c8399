//! Inter-character delays
//!
//! The delay after a character depends on the punctuation around it: a
//! comma, a blank line or the end of a sentence each hold the cursor for a
//! multiple of the base delay.

use std::time::Duration;

use crate::config::PlaybackConfig;

/// Delay base and multipliers for one phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub base: Duration,
    pub comma_factor: u32,
    pub block_factor: u32,
    pub sentence_factor: u32,
}

impl Default for Pacing {
    fn default() -> Self {
        Self::from_config(&PlaybackConfig::default())
    }
}

impl Pacing {
    pub fn from_config(config: &PlaybackConfig) -> Self {
        Self {
            base: Duration::from_millis(config.delay_ms),
            comma_factor: config.comma_factor,
            block_factor: config.block_factor,
            sentence_factor: config.sentence_factor,
        }
    }

    /// Same multipliers, base delay divided by `divisor`
    pub fn faster(&self, divisor: u32) -> Self {
        Self {
            base: self.base / divisor.max(1),
            ..*self
        }
    }

    /// Delay to wait after the character in the middle of `window`.
    ///
    /// Checks run in the order comma, block, sentence and each match replaces
    /// the previous result, so the last matching check wins.
    pub fn interval(&self, window: &[char]) -> Duration {
        let mut interval = self.base;
        if is_comma_pause(window) {
            interval = self.base * self.comma_factor;
        }
        if is_block_pause(window) {
            interval = self.base * self.block_factor;
        }
        if is_sentence_end(window) {
            interval = self.base * self.sentence_factor;
        }
        interval
    }
}

/// The characters used to pace the write at `cursor` (the index just past the
/// written character): the one before it, the written one, and the next one.
///
/// Shorter at the edges of the text.
pub fn window_at(chars: &[char], cursor: usize) -> &[char] {
    let end = (cursor + 1).min(chars.len());
    let start = cursor.saturating_sub(2).min(end);
    &chars[start..end]
}

/// `<non-digit>,<whitespace>` at the end
fn is_comma_pause(window: &[char]) -> bool {
    matches!(window, [.., a, ',', c] if !a.is_ascii_digit() && c.is_whitespace())
}

/// `<not '/'>\n\n` at the end
fn is_block_pause(window: &[char]) -> bool {
    matches!(window, [.., a, '\n', '\n'] if *a != '/')
}

/// `<.?!><whitespace>` at the end
fn is_sentence_end(window: &[char]) -> bool {
    matches!(window, [.., '.' | '?' | '!', c] if c.is_whitespace())
}

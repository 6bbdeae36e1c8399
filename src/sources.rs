//! The three documents played back in a session
//!
//! Built-in documents are compiled into the binary; any of them can be
//! replaced by a file on disk.

use std::path::Path;

use anyhow::{Context, Result};

// Embed the default documents at compile time
pub const DEFAULT_CSS: &str = include_str!("../resources/editor.css");
pub const DEFAULT_MARKDOWN: &str = include_str!("../resources/work.md");
pub const DEFAULT_OVERLAY: &str = include_str!("../resources/work.css");

/// Immutable source texts for one engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sources {
    /// Stylesheet typed first, into the editor
    pub css: String,
    /// Markdown typed into the work pane
    pub markdown: String,
    /// Second stylesheet appended to the editor at the end
    pub overlay: String,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            css: DEFAULT_CSS.to_string(),
            markdown: DEFAULT_MARKDOWN.to_string(),
            overlay: DEFAULT_OVERLAY.to_string(),
        }
    }
}

impl Sources {
    pub fn new(
        css: impl Into<String>,
        markdown: impl Into<String>,
        overlay: impl Into<String>,
    ) -> Self {
        Self {
            css: css.into(),
            markdown: markdown.into(),
            overlay: overlay.into(),
        }
    }

    /// Load documents from disk, falling back to the built-in one for any
    /// path that is `None`
    pub fn from_paths(
        css: Option<&Path>,
        markdown: Option<&Path>,
        overlay: Option<&Path>,
    ) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            css: read_or(css, defaults.css)?,
            markdown: read_or(markdown, defaults.markdown)?,
            overlay: read_or(overlay, defaults.overlay)?,
        })
    }

    /// Both stylesheets in playback order
    pub fn full_css(&self) -> String {
        format!("{}{}", self.css, self.overlay)
    }
}

fn read_or(path: Option<&Path>, fallback: String) -> Result<String> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            tracing::debug!("Loaded {} ({} bytes)", path.display(), text.len());
            Ok(text)
        }
        None => Ok(fallback),
    }
}

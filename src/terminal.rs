//! Terminal front end: a plain-text view of the streams and a line-based
//! control surface
//!
//! The editor stream is shown with its markup stripped, the work stream as
//! typed. Only newly revealed text is printed; a value that does not extend
//! what is already on screen (a reset) is absorbed silently. Converted HTML
//! on the work stream is never printed: it stands for the whole Markdown
//! source, and only the part of that not yet on screen is shown.

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::watch;

use crate::highlight::strip_markup;
use crate::playback::Player;
use crate::stream::{Target, WatchRenderer};

/// Text already printed, per target
#[derive(Debug)]
pub struct Transcript {
    shown: [String; 3],
    /// Complete Markdown document being typed into the work stream
    work_source: String,
}

impl Transcript {
    pub fn new(work_source: impl Into<String>) -> Self {
        Self {
            shown: Default::default(),
            work_source: work_source.into(),
        }
    }

    /// Record the new value of `target`, returning the text to print
    pub fn update(&mut self, target: Target, value: &str) -> Option<String> {
        let plain = match target {
            Target::Editor => strip_markup(value),
            Target::Stylesheet => value.to_string(),
            // partial text is always a prefix of the source; anything else
            // is the converted document
            Target::Work if self.work_source.starts_with(value) => value.to_string(),
            Target::Work => self.work_source.clone(),
        };

        let shown = &mut self.shown[target.index()];
        let delta = plain
            .strip_prefix(shown.as_str())
            .filter(|delta| !delta.is_empty())
            .map(str::to_string);
        *shown = plain;
        delta
    }
}

/// Prints the editor and work streams as they grow.
///
/// Subscribes on construction, so nothing published after `new` is missed.
pub struct Mirror {
    editor: watch::Receiver<String>,
    work: watch::Receiver<String>,
    stylesheet: watch::Receiver<String>,
    transcript: Transcript,
}

impl Mirror {
    pub fn new(renderer: &WatchRenderer, work_source: impl Into<String>) -> Self {
        Self {
            editor: renderer.subscribe(Target::Editor),
            work: renderer.subscribe(Target::Work),
            stylesheet: renderer.subscribe(Target::Stylesheet),
            transcript: Transcript::new(work_source),
        }
    }

    /// Write newly revealed text to `out` until the renderer is dropped or
    /// writing fails
    pub async fn run<W>(mut self, mut out: W) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        loop {
            let (target, value) = tokio::select! {
                changed = self.editor.changed() => {
                    if changed.is_err() {
                        return Ok(());
                    }
                    let value = self.editor.borrow_and_update().clone();
                    (Target::Editor, value)
                }
                changed = self.work.changed() => {
                    if changed.is_err() {
                        return Ok(());
                    }
                    let value = self.work.borrow_and_update().clone();
                    (Target::Work, value)
                }
                changed = self.stylesheet.changed() => {
                    if changed.is_err() {
                        return Ok(());
                    }
                    let bytes = self.stylesheet.borrow_and_update().len();
                    tracing::trace!(bytes, "Stylesheet updated");
                    continue;
                }
            };

            if let Some(delta) = self.transcript.update(target, &value) {
                out.write_all(delta.as_bytes()).await?;
                out.flush().await?;
            }
        }
    }
}

/// A line typed on stdin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `p`: pause, or start/resume when paused
    TogglePause,
    /// `s`: jump to the finished result
    Skip,
    /// `r`: start over from an empty page
    Restart,
    /// `q`: stop and exit
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "p" | "pause" | "play" => Some(Command::TogglePause),
            "s" | "skip" => Some(Command::Skip),
            "r" | "restart" => Some(Command::Restart),
            "q" | "quit" | "exit" => Some(Command::Quit),
            _ => None,
        }
    }

    /// Forward the command to the player. Quit is left to the caller.
    pub fn apply(self, player: &Player) {
        match self {
            Command::TogglePause => player.toggle_pause(),
            Command::Skip => player.skip(),
            Command::Restart => {
                player.skip();
                player.start();
            }
            Command::Quit => {}
        }
    }
}

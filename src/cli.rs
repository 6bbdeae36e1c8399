//! Command-line argument parsing
//!
//! Supports:
//! - Replacing any of the three documents with a file
//! - Overriding the typing speed
//! - Rendering the finished result instantly
//! - Writing the final outputs to a directory

use clap::Parser;
use std::path::PathBuf;

use crate::config::PlaybackConfig;

/// Types a stylesheet and a Markdown page out character by character
#[derive(Parser, Debug)]
#[command(name = "livetype", version, about = "Live-typed, live-applied CSS")]
pub struct CliArgs {
    /// Stylesheet typed first (defaults to the built-in one)
    #[arg(long, value_name = "FILE")]
    pub css: Option<PathBuf>,

    /// Markdown document typed second
    #[arg(long, value_name = "FILE")]
    pub markdown: Option<PathBuf>,

    /// Stylesheet appended at the end
    #[arg(long, value_name = "FILE")]
    pub overlay: Option<PathBuf>,

    /// Base delay between characters in milliseconds
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Render the finished result immediately and exit
    #[arg(short = 's', long, conflicts_with = "play")]
    pub skip: bool,

    /// Start typing right away instead of showing the finished page first
    #[arg(short = 'p', long)]
    pub play: bool,

    /// Write style.css, editor.html and work.html here when done
    #[arg(short = 'o', long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Config file to use instead of ~/.config/livetype/config.yaml
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// What the binary does once the player is built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupMode {
    /// Start typing immediately
    Play,
    /// Show the finished page, paused, and wait for a command
    ShowFinished,
    /// Show the finished page and exit
    RenderOnly,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub mode: StartupMode,
    pub playback: PlaybackConfig,
    pub css: Option<PathBuf>,
    pub markdown: Option<PathBuf>,
    pub overlay: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        let playback = match &self.config {
            Some(path) if !path.exists() => {
                return Err(format!("Config file not found: {}", path.display()));
            }
            Some(path) => PlaybackConfig::load_from(path),
            None => PlaybackConfig::load(),
        };
        Ok(self.with_playback(playback))
    }

    /// Apply the arguments on top of an already loaded config
    pub fn with_playback(self, mut playback: PlaybackConfig) -> StartupConfig {
        if let Some(delay_ms) = self.delay_ms {
            playback.delay_ms = delay_ms;
        }

        let mode = if self.skip {
            StartupMode::RenderOnly
        } else if self.play || !playback.skip_on_launch {
            StartupMode::Play
        } else {
            StartupMode::ShowFinished
        };

        StartupConfig {
            mode,
            playback,
            css: self.css,
            markdown: self.markdown,
            overlay: self.overlay,
            out_dir: self.out,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> CliArgs {
        CliArgs {
            css: None,
            markdown: None,
            overlay: None,
            delay_ms: None,
            skip: false,
            play: false,
            out: None,
            config: None,
        }
    }

    #[test]
    fn test_default_shows_finished_page() {
        let config = args().with_playback(PlaybackConfig::default());
        assert_eq!(config.mode, StartupMode::ShowFinished);
    }

    #[test]
    fn test_play_flag() {
        let config = CliArgs {
            play: true,
            ..args()
        }
        .with_playback(PlaybackConfig::default());
        assert_eq!(config.mode, StartupMode::Play);
    }

    #[test]
    fn test_config_can_disable_skip_on_launch() {
        let playback = PlaybackConfig {
            skip_on_launch: false,
            ..PlaybackConfig::default()
        };
        let config = args().with_playback(playback);
        assert_eq!(config.mode, StartupMode::Play);
    }

    #[test]
    fn test_skip_flag() {
        let config = CliArgs {
            skip: true,
            ..args()
        }
        .with_playback(PlaybackConfig::default());
        assert_eq!(config.mode, StartupMode::RenderOnly);
    }

    #[test]
    fn test_delay_override() {
        let config = CliArgs {
            delay_ms: Some(1),
            ..args()
        }
        .with_playback(PlaybackConfig::default());
        assert_eq!(config.playback.delay_ms, 1);
        assert_eq!(config.playback.sentence_factor, 70);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let result = CliArgs {
            config: Some(PathBuf::from("/nonexistent/livetype.yaml")),
            ..args()
        }
        .into_config();
        assert!(result.is_err());
    }

    #[test]
    fn test_skip_conflicts_with_play() {
        let result = CliArgs::try_parse_from(["livetype", "--skip", "--play"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_paths() {
        let args = CliArgs::try_parse_from(["livetype", "--css", "a.css", "-o", "out"]).unwrap();
        assert_eq!(args.css, Some(PathBuf::from("a.css")));
        assert_eq!(args.out, Some(PathBuf::from("out")));
    }
}

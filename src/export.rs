//! Writing a session's final buffers to disk

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::playback::Player;
use crate::stream::Target;

pub const STYLESHEET_FILE: &str = "style.css";
pub const EDITOR_FILE: &str = "editor.html";
pub const WORK_FILE: &str = "work.html";

/// Write the stylesheet, the highlighted editor markup and the work page into
/// `dir`, creating it if needed. Returns the written paths.
///
/// The work page is HTML only if the whole document was typed; a session
/// stopped halfway leaves the partial Markdown as plain text.
pub fn write_outputs(dir: &Path, player: &Player) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let files = [
        (STYLESHEET_FILE, player.resolved(Target::Stylesheet)),
        (EDITOR_FILE, player.resolved(Target::Editor)),
        (WORK_FILE, player.resolved(Target::Work)),
    ];

    let mut written = Vec::with_capacity(files.len());
    for (name, content) in files {
        let path = dir.join(name);
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

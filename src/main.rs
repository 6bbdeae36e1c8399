use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use livetype::cli::{CliArgs, StartupMode};
use livetype::terminal::{Command, Mirror};
use livetype::{export, Player, Sources, WatchRenderer};

#[tokio::main]
async fn main() -> Result<()> {
    livetype::tracing::init();

    let args = CliArgs::parse();
    let startup = args.into_config().map_err(|e| anyhow!(e))?;
    tracing::debug!(?startup, "Starting");

    let sources = Sources::from_paths(
        startup.css.as_deref(),
        startup.markdown.as_deref(),
        startup.overlay.as_deref(),
    )?;

    let renderer = Arc::new(WatchRenderer::new());
    let mirror = Mirror::new(&renderer, sources.markdown.as_str());
    let player = Player::new(sources, &startup.playback, renderer.clone());
    let mirror = tokio::spawn(mirror.run(tokio::io::stdout()));

    match startup.mode {
        StartupMode::Play => {
            player.start();
        }
        StartupMode::ShowFinished => {
            player.skip();
            eprintln!("\n[p] play/pause  [s] skip  [r] restart  [q] quit");
        }
        StartupMode::RenderOnly => player.skip(),
    }

    if startup.mode != StartupMode::RenderOnly {
        run_controls(&player).await;
    }

    if let Some(dir) = &startup.out_dir {
        let written = export::write_outputs(dir, &player)?;
        eprintln!("Wrote {} files to {}", written.len(), dir.display());
    }

    if player.is_running() {
        // quit mid-playback: nothing left worth printing
        mirror.abort();
    } else {
        // dropping the last renderer handles closes the channels once the
        // mirror has printed what was published
        drop(player);
        drop(renderer);
        if let Ok(Err(e)) = mirror.await {
            tracing::warn!("Failed to write to stdout: {}", e);
        }
    }
    println!();

    Ok(())
}

/// Forward stdin commands to the player until playback finishes, `q` is
/// typed, or stdin closes.
async fn run_controls(player: &Player) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let running = player.is_running();
        tokio::select! {
            _ = player.wait_idle(), if running => {
                tracing::info!("Playback complete");
                break;
            }
            line = lines.next_line() => match line {
                Ok(Some(line)) => match Command::parse(&line) {
                    Some(Command::Quit) => break,
                    Some(command) => command.apply(player),
                    None => eprintln!("Unknown command {:?} (p, s, r, q)", line.trim()),
                },
                Ok(None) => {
                    if player.is_running() {
                        player.wait_idle().await;
                    }
                    break;
                }
                Err(e) => {
                    tracing::warn!("Failed to read stdin: {}", e);
                    player.wait_idle().await;
                    break;
                }
            }
        }
    }
}

//! The drive loop and its control surface

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::pacing::{window_at, Pacing};
use super::{Phase, PlaybackSession};
use crate::config::PlaybackConfig;
use crate::markdown::{CmarkConverter, MarkdownConverter};
use crate::sources::Sources;
use crate::stream::{Coordinator, Renderer, Target};

/// Plays the sources back through a [`Coordinator`].
///
/// Cloning gives another handle to the same engine. `start` spawns the drive
/// loop on the current tokio runtime; all other controls are synchronous and
/// safe to call in any state.
#[derive(Clone)]
pub struct Player {
    shared: Arc<Shared>,
}

struct Shared {
    engine: Mutex<Engine>,
    sources: Sources,
    pacing: Pacing,
    overlay_divisor: u32,
    paused: watch::Sender<bool>,
    phase: watch::Sender<Phase>,
}

/// State guarded by one lock so a skip can never interleave with a write
struct Engine {
    coordinator: Coordinator,
    /// `None` while idle
    session: Option<PlaybackSession>,
}

impl Player {
    /// Player that converts the finished Markdown with pulldown-cmark
    pub fn new(sources: Sources, config: &PlaybackConfig, renderer: Arc<dyn Renderer>) -> Self {
        Self::with_converter(sources, config, renderer, Arc::new(CmarkConverter))
    }

    pub fn with_converter(
        sources: Sources,
        config: &PlaybackConfig,
        renderer: Arc<dyn Renderer>,
        converter: Arc<dyn MarkdownConverter>,
    ) -> Self {
        let coordinator = Coordinator::new(sources.markdown.chars().count(), converter, renderer);
        Self {
            shared: Arc::new(Shared {
                engine: Mutex::new(Engine {
                    coordinator,
                    session: None,
                }),
                sources,
                pacing: Pacing::from_config(config),
                overlay_divisor: config.overlay_divisor,
                paused: watch::Sender::new(true),
                phase: watch::Sender::new(Phase::Idle),
            }),
        }
    }

    /// Start a new session, or resume the running one.
    ///
    /// Returns `true` if a new drive loop was spawned. Outside a tokio
    /// runtime nothing happens and `false` is returned.
    pub fn start(&self) -> bool {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("No tokio runtime, playback not started");
            return false;
        };
        self.shared.paused.send_replace(false);

        let cancel = {
            let mut engine = self.shared.lock_engine();
            if engine.session.is_some() {
                debug!("Playback already running, resuming instead of restarting");
                return false;
            }

            engine.coordinator.reset();
            let session = PlaybackSession::new();
            let cancel = session.cancel_token();
            engine.session = Some(session);
            self.shared.set_phase(Phase::CssSource);
            cancel
        };

        info!("Playback started");
        runtime.spawn(drive(self.shared.clone(), cancel));
        true
    }

    /// Hold the drive loop at its next wait
    pub fn pause(&self) {
        debug!("Playback paused");
        self.shared.paused.send_replace(true);
    }

    /// Release a paused drive loop
    pub fn resume(&self) {
        debug!("Playback resumed");
        self.shared.paused.send_replace(false);
    }

    /// Pause if playing; otherwise start or resume
    pub fn toggle_pause(&self) {
        if self.is_running() && !self.is_paused() {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Abandon any running session and show the finished result at once.
    ///
    /// All three documents are replayed into fresh buffers without
    /// publishing, then each target is published once. Leaves the player
    /// idle and paused.
    pub fn skip(&self) {
        let mut engine = self.shared.lock_engine();
        if let Some(session) = engine.session.take() {
            debug!(phase = ?session.phase, cursor = session.cursor, "Cancelling running session");
            session.cancel();
        }

        let sources = &self.shared.sources;
        let coordinator = &mut engine.coordinator;
        coordinator.clear();
        coordinator.replay(Target::Editor, &sources.css);
        coordinator.replay(Target::Work, &sources.markdown);
        coordinator.replay(Target::Editor, &sources.overlay);
        coordinator.publish_all();

        self.shared.paused.send_replace(true);
        self.shared.set_phase(Phase::Idle);
        info!("Playback skipped to end");
    }

    pub fn phase(&self) -> Phase {
        *self.shared.phase.borrow()
    }

    /// Position in the current phase's source; 0 when idle
    pub fn cursor(&self) -> usize {
        self.shared
            .lock_engine()
            .session
            .as_ref()
            .map_or(0, |session| session.cursor)
    }

    pub fn is_paused(&self) -> bool {
        *self.shared.paused.borrow()
    }

    pub fn is_running(&self) -> bool {
        self.shared.lock_engine().session.is_some()
    }

    /// Current (possibly unpublished) buffer of a target
    pub fn buffer(&self, target: Target) -> String {
        self.shared.lock_engine().coordinator.buffer(target).to_string()
    }

    /// Value of `target` as observers see it: the work target is converted
    /// with the player's converter once the whole document is in, and left
    /// as plain text before that
    pub fn resolved(&self, target: Target) -> String {
        self.shared
            .lock_engine()
            .coordinator
            .resolved(target)
            .into_owned()
    }

    pub fn subscribe_phase(&self) -> watch::Receiver<Phase> {
        self.shared.phase.subscribe()
    }

    /// Wait until no session is running
    pub async fn wait_idle(&self) {
        let mut phase = self.shared.phase.subscribe();
        // the sender lives in `shared`, so this cannot fail while `self` exists
        let _ = phase.wait_for(|phase| *phase == Phase::Idle).await;
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("phase", &self.phase())
            .field("paused", &self.is_paused())
            .finish_non_exhaustive()
    }
}

impl Shared {
    fn lock_engine(&self) -> MutexGuard<'_, Engine> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Publish `phase` to observers if it differs from the current one
    fn set_phase(&self, phase: Phase) {
        self.phase.send_if_modified(|current| {
            let changed = *current != phase;
            *current = phase;
            changed
        });
    }

    fn source_for(&self, phase: Phase) -> &str {
        match phase {
            Phase::CssSource => &self.sources.css,
            Phase::Markdown => &self.sources.markdown,
            Phase::CssOverlay => &self.sources.overlay,
            Phase::Idle => "",
        }
    }

    fn pacing_for(&self, phase: Phase) -> Pacing {
        match phase {
            Phase::CssOverlay => self.pacing.faster(self.overlay_divisor),
            _ => self.pacing,
        }
    }

    /// Move the session into `phase`. False if the session was cancelled.
    fn enter_phase(&self, phase: Phase, cancel: &CancellationToken) -> bool {
        let mut engine = self.lock_engine();
        let Some(session) = engine.session.as_mut().filter(|_| !cancel.is_cancelled()) else {
            return false;
        };
        session.phase = phase;
        session.cursor = 0;
        self.set_phase(phase);
        true
    }

    /// Write one character and advance the cursor. False if cancelled.
    fn emit(&self, target: Target, chars: &str, cursor: usize, cancel: &CancellationToken) -> bool {
        let mut engine = self.lock_engine();
        if cancel.is_cancelled() {
            return false;
        }
        engine.coordinator.write(target, chars, true);
        if let Some(session) = engine.session.as_mut() {
            session.cursor = cursor;
        }
        true
    }

    /// Publish the resolved value of `target`. False if cancelled.
    fn publish(&self, target: Target, cancel: &CancellationToken) -> bool {
        let engine = self.lock_engine();
        if cancel.is_cancelled() {
            return false;
        }
        engine.coordinator.publish(target);
        true
    }

    /// Sleep for `interval`, then stay put while paused.
    ///
    /// Returns false as soon as the session is cancelled.
    async fn wait(&self, interval: Duration, cancel: &CancellationToken) -> bool {
        let mut paused = self.paused.subscribe();

        tokio::select! {
            _ = cancel.cancelled() => return false,
            _ = tokio::time::sleep(interval) => {}
        }

        let is_paused = *paused.borrow_and_update();
        if is_paused {
            tokio::select! {
                _ = cancel.cancelled() => return false,
                resumed = paused.wait_for(|is_paused| !*is_paused) => {
                    if resumed.is_err() {
                        return false;
                    }
                }
            }
        }

        !cancel.is_cancelled()
    }

    /// Mark a naturally completed session as finished
    fn finish(&self, cancel: &CancellationToken) {
        let mut engine = self.lock_engine();
        if cancel.is_cancelled() {
            return;
        }
        engine.session = None;
        self.paused.send_replace(true);
        self.set_phase(Phase::Idle);
        info!("Playback finished");
    }
}

/// Type every phase's source in order, one character per step
async fn drive(shared: Arc<Shared>, cancel: CancellationToken) {
    for phase in Phase::SEQUENCE {
        let Some(target) = phase.target() else {
            continue;
        };
        let source: Vec<char> = shared.source_for(phase).chars().collect();
        let pacing = shared.pacing_for(phase);

        if !shared.enter_phase(phase, &cancel) {
            return;
        }
        info!(?phase, chars = source.len(), "Phase started");

        // an empty document is complete without a single write
        if source.is_empty() && target == Target::Work && !shared.publish(target, &cancel) {
            return;
        }

        let mut utf8 = [0u8; 4];
        for cursor in 1..=source.len() {
            let chars = source[cursor - 1].encode_utf8(&mut utf8);
            if !shared.emit(target, chars, cursor, &cancel) {
                debug!(?phase, cursor, "Drive loop cancelled");
                return;
            }

            let interval = pacing.interval(window_at(&source, cursor));
            if !shared.wait(interval, &cancel).await {
                debug!(?phase, cursor, "Drive loop cancelled while waiting");
                return;
            }
        }
    }

    shared.finish(&cancel);
}

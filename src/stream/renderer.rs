//! Observers of published stream values

use std::sync::{Mutex, PoisonError};

use tokio::sync::watch;

use super::Target;

/// Receives every published value, in publication order.
///
/// Called synchronously from the engine; implementations must not block.
pub trait Renderer: Send + Sync {
    fn render(&self, target: Target, value: &str);
}

/// Exposes the latest value of each target through a watch channel.
///
/// Observers that fall behind see only the newest value.
#[derive(Debug)]
pub struct WatchRenderer {
    senders: [watch::Sender<String>; 3],
}

impl Default for WatchRenderer {
    fn default() -> Self {
        Self {
            senders: std::array::from_fn(|_| watch::Sender::new(String::new())),
        }
    }
}

impl WatchRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to changes of one target
    pub fn subscribe(&self, target: Target) -> watch::Receiver<String> {
        self.senders[target.index()].subscribe()
    }

    /// Latest published value of a target
    pub fn current(&self, target: Target) -> String {
        self.senders[target.index()].borrow().clone()
    }
}

impl Renderer for WatchRenderer {
    fn render(&self, target: Target, value: &str) {
        self.senders[target.index()].send_replace(value.to_string());
    }
}

/// Keeps every publication; useful for inspecting exactly what was shown
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    log: Mutex<Vec<(Target, String)>>,
}

impl RecordingRenderer {
    /// All values published to `target`, oldest first
    pub fn publications(&self, target: Target) -> Vec<String> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(t, _)| *t == target)
            .map(|(_, value)| value.clone())
            .collect()
    }

    /// Most recent value published to `target`
    pub fn last(&self, target: Target) -> Option<String> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .rev()
            .find(|(t, _)| *t == target)
            .map(|(_, value)| value.clone())
    }

    /// Total number of publications across all targets
    pub fn len(&self) -> usize {
        self.log.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Renderer for RecordingRenderer {
    fn render(&self, target: Target, value: &str) {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((target, value.to_string()));
    }
}

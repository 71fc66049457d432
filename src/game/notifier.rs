//! State-change notification for the presentation layer.
//!
//! Mutations bump a version counter; the renderer compares versions to
//! decide whether a new frame is needed. Any number of notifications
//! between two frames collapse into a single render.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Cloneable handle that marks session state as changed.
///
/// Cheap to clone into sensor callbacks; safe to call from any thread.
#[derive(Debug, Clone, Default)]
pub struct StateNotifier {
    version: Arc<AtomicU64>,
}

impl StateNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that observable state changed.
    pub fn notify(&self) {
        self.version.fetch_add(1, Ordering::SeqCst);
    }

    pub fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }
}

/// Tracks which state version was last rendered.
#[derive(Debug, Default)]
pub struct RenderScheduler {
    rendered: Option<u64>,
}

impl RenderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true (and marks the version rendered) if state changed
    /// since the last render. The first call always renders.
    pub fn should_render(&mut self, notifier: &StateNotifier) -> bool {
        let version = notifier.version();
        if self.rendered == Some(version) {
            return false;
        }
        self.rendered = Some(version);
        true
    }
}

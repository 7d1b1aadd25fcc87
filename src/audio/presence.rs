//! Sound on/off flag shared between the UI and the playback policy

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

struct PresenceInner {
    enabled: AtomicBool,
    watchers: Mutex<Vec<Sender<bool>>>,
}

/// Whether ambient sound should be audible
///
/// Cheap to clone; every clone refers to the same flag. The session timer
/// never reads this.
#[derive(Clone)]
pub struct AudioPresence {
    inner: Arc<PresenceInner>,
}

impl Default for AudioPresence {
    fn default() -> Self {
        Self::new(true)
    }
}

impl std::fmt::Debug for AudioPresence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioPresence")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl AudioPresence {
    /// Create a flag with an initial value
    pub fn new(enabled: bool) -> Self {
        Self {
            inner: Arc::new(PresenceInner {
                enabled: AtomicBool::new(enabled),
                watchers: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Check if sound is enabled
    pub fn is_enabled(&self) -> bool {
        self.inner.enabled.load(Ordering::SeqCst)
    }

    /// Flip the flag and return the new value
    pub fn toggle(&self) -> bool {
        let enabled = !self.inner.enabled.fetch_xor(true, Ordering::SeqCst);
        self.notify(enabled);
        enabled
    }

    /// Set the flag; watchers hear about it only if it changed
    pub fn set_enabled(&self, enabled: bool) {
        let previous = self.inner.enabled.swap(enabled, Ordering::SeqCst);
        if previous != enabled {
            self.notify(enabled);
        }
    }

    /// Receive every future change of the flag
    pub fn watch(&self) -> Receiver<bool> {
        let (tx, rx) = unbounded();
        self.inner.watchers.lock().push(tx);
        rx
    }

    fn notify(&self, enabled: bool) {
        debug!("Sound {}", if enabled { "enabled" } else { "muted" });
        self.inner
            .watchers
            .lock()
            .retain(|tx| tx.send(enabled).is_ok());
    }
}

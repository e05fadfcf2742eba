// Relay module — the wrist/handheld alert state machines
//
// Each endpoint owns one `RelayState` for its process lifetime: the last
// stored value, the one-shot `warned` flag, and the optional display
// observer. No ambient globals; whoever hosts the relay injects the
// collaborators and owns the state through it.

pub mod handheld;
pub mod wrist;

pub use handheld::{HandheldRelay, HEART_RATE_THRESHOLD};
pub use wrist::WristRelay;

use parking_lot::RwLock;
use std::sync::Arc;

/// Display seam. The owning UI registers at most one observer and may
/// detach it at any time; a missing observer is a no-op, never an error.
pub trait ValueObserver: Send + Sync {
    /// Called from whichever task received the update. The observer is
    /// responsible for marshaling to its own rendering context.
    fn on_value_changed(&self, value: u32);
}

/// Notification seam. `raise_alert` fires at most once per process
/// lifetime under the one-shot rules of the two relays.
pub trait AlertSink: Send + Sync {
    fn raise_alert(&self);
}

/// Mutable relay state: last value, one-shot warned flag, observer slot.
///
/// `warned` starts false and never resets within a process lifetime;
/// mutation happens only through the relay handlers holding the lock.
struct RelayState {
    current_value: u32,
    warned: bool,
    observer: Option<Arc<dyn ValueObserver>>,
}

impl RelayState {
    fn new() -> Self {
        Self {
            current_value: 0,
            warned: false,
            observer: None,
        }
    }
}

/// Shared handle to one endpoint's `RelayState`, with accessors that
/// keep lock scopes small and never hold the lock across observer calls.
#[derive(Clone)]
pub(crate) struct StateHandle {
    inner: Arc<RwLock<RelayState>>,
}

impl StateHandle {
    pub(crate) fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(RelayState::new())),
        }
    }

    /// Store `value` if it differs from the stored one. Returns whether
    /// anything changed (duplicate suppression).
    pub(crate) fn update_if_changed(&self, value: u32) -> bool {
        let mut state = self.inner.write();
        if state.current_value == value {
            return false;
        }
        state.current_value = value;
        true
    }

    /// Store `value` unconditionally.
    pub(crate) fn store(&self, value: u32) {
        self.inner.write().current_value = value;
    }

    /// Trip the one-shot warned flag. Returns true only on the first call.
    pub(crate) fn mark_warned(&self) -> bool {
        let mut state = self.inner.write();
        if state.warned {
            return false;
        }
        state.warned = true;
        true
    }

    /// Attach the observer and immediately push the stored value to it.
    pub(crate) fn attach_observer(&self, observer: Arc<dyn ValueObserver>) {
        let current = {
            let mut state = self.inner.write();
            state.observer = Some(observer.clone());
            state.current_value
        };
        observer.on_value_changed(current);
    }

    pub(crate) fn detach_observer(&self) {
        self.inner.write().observer = None;
    }

    /// Notify the observer, if one is attached, outside the lock.
    pub(crate) fn notify(&self, value: u32) {
        let observer = self.inner.read().observer.clone();
        if let Some(observer) = observer {
            observer.on_value_changed(value);
        }
    }

    pub(crate) fn current_value(&self) -> u32 {
        self.inner.read().current_value
    }

    pub(crate) fn warned(&self) -> bool {
        self.inner.read().warned
    }
}

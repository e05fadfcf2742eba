// Handheld-side relay — display received values, warn the wrist once
//
// States: Unwarned (warned = false) and AlertSent. Once the threshold has
// been crossed and the warning sent, the relay never re-arms within the
// same process lifetime, no matter how the value moves afterwards.

use crate::channel::MessageChannel;
use crate::message::{decode_heart_rate, InboundMessage, MessageTag};
use crate::relay::{StateHandle, ValueObserver};
use std::sync::Arc;

/// Heart rates above this trip the one-shot warning back to the wrist.
pub const HEART_RATE_THRESHOLD: u32 = 100;

/// Relay instance running on the companion handheld.
pub struct HandheldRelay {
    state: StateHandle,
    channel: MessageChannel,
}

impl HandheldRelay {
    /// Build the relay and bind it as the channel's inbound handler.
    pub fn new(channel: MessageChannel) -> Arc<Self> {
        let relay = Arc::new(Self {
            state: StateHandle::new(),
            channel,
        });
        let handler = relay.clone();
        relay
            .channel
            .bind_inbound(Arc::new(move |msg| handler.handle_message(msg)));
        relay
    }

    /// Inbound dispatch. Heart-rate readings update the display and may
    /// trip the one-shot warning; malformed payloads and unknown paths
    /// are logged and dropped with the state untouched.
    pub fn handle_message(&self, msg: InboundMessage) {
        match MessageTag::from_path(&msg.path) {
            Some(MessageTag::HeartRate) => self.handle_heart_rate(&msg),
            Some(MessageTag::Warning) => {
                tracing::warn!(source = %msg.source, "ignoring warning message sent to the handheld");
            }
            None => {
                tracing::warn!(source = %msg.source, path = %msg.path, "ignoring message with unknown path");
            }
        }
    }

    fn handle_heart_rate(&self, msg: &InboundMessage) {
        let value = match decode_heart_rate(&msg.payload) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(source = %msg.source, error = %e, "dropping malformed heart-rate payload");
                return;
            }
        };

        self.state.store(value);
        self.state.notify(value);

        // mark_warned only trips when the threshold check passes, so the
        // short-circuit keeps sub-threshold values from consuming the shot.
        if value > HEART_RATE_THRESHOLD && self.state.mark_warned() {
            tracing::info!(source = %msg.source, value, "heart rate above threshold, sending warning");
            self.channel
                .send_to(&msg.source, MessageTag::Warning, Vec::new());
        }
    }

    /// Attach the display observer; it immediately receives the stored value.
    pub fn set_observer(&self, observer: Arc<dyn ValueObserver>) {
        self.state.attach_observer(observer);
    }

    /// Detach the display observer; further updates become no-ops.
    pub fn clear_observer(&self) {
        self.state.detach_observer();
    }

    /// Last received value (0 until the first reading arrives).
    pub fn current_value(&self) -> u32 {
        self.state.current_value()
    }

    /// Whether the one-shot warning has been sent this process lifetime.
    pub fn warned(&self) -> bool {
        self.state.warned()
    }
}

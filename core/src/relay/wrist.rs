// Wrist-side relay — broadcast sampled values, surface one alert
//
// States: Normal (warned = false) and Warned. The wrist never re-arms on
// its own; the warning is purely reactive to whatever the handheld sends.

use crate::channel::MessageChannel;
use crate::message::{encode_heart_rate, InboundMessage, MessageTag};
use crate::relay::{AlertSink, StateHandle, ValueObserver};
use std::sync::Arc;

/// Relay instance running on the wrist device.
pub struct WristRelay {
    state: StateHandle,
    channel: MessageChannel,
    alerts: Arc<dyn AlertSink>,
}

impl WristRelay {
    /// Build the relay and bind it as the channel's inbound handler.
    pub fn new(channel: MessageChannel, alerts: Arc<dyn AlertSink>) -> Arc<Self> {
        let relay = Arc::new(Self {
            state: StateHandle::new(),
            channel,
            alerts,
        });
        let handler = relay.clone();
        relay
            .channel
            .bind_inbound(Arc::new(move |msg| handler.handle_message(msg)));
        relay
    }

    /// Called by the value producer at its own cadence.
    ///
    /// A value equal to the stored one is a complete no-op. A changed
    /// value is stored, shown on the local display, and broadcast to all
    /// nearby nodes — independent of the warning state.
    pub fn on_new_value(&self, value: u32) {
        if !self.state.update_if_changed(value) {
            return;
        }
        tracing::debug!(value, "heart rate changed, broadcasting");
        self.state.notify(value);
        self.channel
            .broadcast(MessageTag::HeartRate, encode_heart_rate(value));
    }

    /// Inbound dispatch. Warnings raise the local alert once; everything
    /// else is logged and dropped without disturbing the relay.
    pub fn handle_message(&self, msg: InboundMessage) {
        match MessageTag::from_path(&msg.path) {
            Some(MessageTag::Warning) => {
                if self.state.mark_warned() {
                    tracing::info!(source = %msg.source, "heart rate warning received, raising alert");
                    self.alerts.raise_alert();
                } else {
                    tracing::debug!(source = %msg.source, "repeated warning, alert already raised");
                }
            }
            Some(MessageTag::HeartRate) => {
                tracing::warn!(source = %msg.source, "ignoring heart-rate message sent to the wrist");
            }
            None => {
                tracing::warn!(source = %msg.source, path = %msg.path, "ignoring message with unknown path");
            }
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

    /// Last sampled value (0 until the first sample arrives).
    pub fn current_value(&self) -> u32 {
        self.state.current_value()
    }

    /// Whether the one-shot alert has fired this process lifetime.
    pub fn warned(&self) -> bool {
        self.state.warned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::abstraction::MockNodeTransport;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Recorder {
        values: Mutex<Vec<u32>>,
    }

    impl Recorder {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                values: Mutex::new(Vec::new()),
            })
        }
    }

    impl ValueObserver for Recorder {
        fn on_value_changed(&self, value: u32) {
            self.values.lock().push(value);
        }
    }

    struct CountingAlert {
        raised: AtomicUsize,
    }

    impl CountingAlert {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                raised: AtomicUsize::new(0),
            })
        }

        fn count(&self) -> usize {
            self.raised.load(Ordering::SeqCst)
        }
    }

    impl AlertSink for CountingAlert {
        fn raise_alert(&self) {
            self.raised.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn quiet_channel() -> MessageChannel {
        let mut mock = MockNodeTransport::new();
        mock.expect_set_inbound_handler().returning(|_| ());
        mock.expect_connected_nodes().returning(|| Ok(Vec::new()));
        MessageChannel::new(Arc::new(mock))
    }

    fn warning(source: &str) -> InboundMessage {
        InboundMessage {
            source: source.to_string(),
            path: "/heart_rate_warning".to_string(),
            payload: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_values_are_suppressed() {
        let relay = WristRelay::new(quiet_channel(), CountingAlert::new());
        let observer = Recorder::new();
        relay.set_observer(observer.clone());
        observer.values.lock().clear(); // drop the attach-time push

        relay.on_new_value(95);
        relay.on_new_value(95);
        relay.on_new_value(101);
        relay.on_new_value(101);
        relay.on_new_value(130);

        assert_eq!(*observer.values.lock(), vec![95, 101, 130]);
        assert_eq!(relay.current_value(), 130);
    }

    #[tokio::test]
    async fn test_same_value_twice_is_tolerated() {
        let relay = WristRelay::new(quiet_channel(), CountingAlert::new());
        relay.on_new_value(90);
        relay.on_new_value(90);
        assert_eq!(relay.current_value(), 90);
    }

    #[tokio::test]
    async fn test_warning_raises_alert_exactly_once() {
        let alerts = CountingAlert::new();
        let relay = WristRelay::new(quiet_channel(), alerts.clone());

        relay.handle_message(warning("phone"));
        relay.handle_message(warning("phone"));
        relay.handle_message(warning("phone"));

        assert_eq!(alerts.count(), 1);
        assert!(relay.warned());
    }

    #[tokio::test]
    async fn test_unknown_path_is_ignored() {
        let alerts = CountingAlert::new();
        let relay = WristRelay::new(quiet_channel(), alerts.clone());

        relay.handle_message(InboundMessage {
            source: "phone".to_string(),
            path: "/bogus".to_string(),
            payload: b"whatever".to_vec(),
        });

        assert_eq!(alerts.count(), 0);
        assert!(!relay.warned());
        // And the handler keeps serving afterwards
        relay.handle_message(warning("phone"));
        assert_eq!(alerts.count(), 1);
    }

    #[tokio::test]
    async fn test_heart_rate_sent_to_wrist_is_ignored() {
        let alerts = CountingAlert::new();
        let relay = WristRelay::new(quiet_channel(), alerts.clone());

        relay.handle_message(InboundMessage {
            source: "phone".to_string(),
            path: "/heart_rate".to_string(),
            payload: b"140".to_vec(),
        });

        assert_eq!(relay.current_value(), 0);
        assert_eq!(alerts.count(), 0);
    }

    #[tokio::test]
    async fn test_broadcast_happens_regardless_of_warned_state() {
        let mut mock = MockNodeTransport::new();
        mock.expect_set_inbound_handler().returning(|_| ());
        mock.expect_connected_nodes().returning(|| {
            Ok(vec![crate::transport::PeerNode {
                id: "phone".to_string(),
                display_name: "Phone".to_string(),
                nearby: true,
            }])
        });
        let sends = Arc::new(AtomicUsize::new(0));
        let counter = sends.clone();
        mock.expect_send().returning(move |_, _, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        let relay = WristRelay::new(MessageChannel::new(Arc::new(mock)), CountingAlert::new());
        relay.handle_message(warning("phone"));
        assert!(relay.warned());

        relay.on_new_value(115);
        // The broadcast task runs in the background; give it a moment.
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert_eq!(sends.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_observer_detach_is_a_noop() {
        let relay = WristRelay::new(quiet_channel(), CountingAlert::new());
        let observer = Recorder::new();
        relay.set_observer(observer.clone());
        relay.clear_observer();

        relay.on_new_value(99);
        assert_eq!(*observer.values.lock(), vec![0]); // only the attach push
    }
}

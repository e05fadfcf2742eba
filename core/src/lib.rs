// PulseLink Core — Wrist/Handheld Relay Spine
//
// "Does this help a sampled heart rate cross from the wrist to the
//  handheld, and the alert cross back?"
//
// If the answer is no, it doesn't belong in this crate.

pub mod channel;
pub mod message;
pub mod relay;
pub mod sensor;
pub mod service;
pub mod transport;

pub use channel::MessageChannel;
pub use message::{decode_heart_rate, encode_heart_rate, CodecError, InboundMessage, MessageTag};
pub use relay::{AlertSink, HandheldRelay, ValueObserver, WristRelay, HEART_RATE_THRESHOLD};
pub use sensor::{MockHeartRateSensor, SensorConfig, SensorError, SensorHandle};
pub use service::{DeviceRole, RelayService, ServiceError, ServiceState};
pub use transport::{
    LoopbackEndpoint, LoopbackNetwork, NodeDiscovery, NodeTransport, PeerNode, TransportError,
};

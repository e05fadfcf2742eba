// Transport module — the seam between the relay and the peer substrate
//
// The actual transport (the vendor data layer on real devices) lives
// outside this crate; everything here talks to it through `NodeTransport`.

pub mod abstraction;
pub mod discovery;
pub mod loopback;

pub use abstraction::{InboundHandler, InboundMessage, NodeTransport, PeerNode, TransportError};
pub use discovery::NodeDiscovery;
pub use loopback::{LoopbackEndpoint, LoopbackNetwork};

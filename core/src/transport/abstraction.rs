//! Transport abstraction layer for PulseLink
//!
//! Defines the trait and types the relay uses to reach its peer, without
//! committing to any particular peer substrate. Delivery is best-effort,
//! at-most-once per message; inbound receipt is push-driven.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

pub use crate::message::InboundMessage;

/// A reachable peer device, enumerated fresh on every discovery call.
///
/// Never cached across calls — this is a read-only snapshot of what the
/// transport reported at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerNode {
    /// Opaque identifier, unique per reachable device
    pub id: String,
    /// Human-readable name, not unique
    pub display_name: String,
    /// Transport-reported proximity: directly reachable, not relayed
    pub nearby: bool,
}

/// The single push-driven dispatch function a transport invokes whenever
/// a tagged payload arrives from any peer.
pub type InboundHandler = Arc<dyn Fn(InboundMessage) + Send + Sync>;

/// Errors that can occur at the transport seam
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("node discovery failed: {0}")]
    DiscoveryFailed(String),

    #[error("send failed: {0}")]
    SendFailed(String),

    #[error("transport timeout: {0}")]
    Timeout(String),
}

/// The peer transport as the relay sees it.
///
/// Implementations must not block indefinitely: discovery and send each
/// resolve (success, failure, or empty result) within the transport's own
/// bounded time. No retries, no ordering guarantees.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NodeTransport: Send + Sync {
    /// Enumerate currently reachable peer nodes.
    async fn connected_nodes(&self) -> Result<Vec<PeerNode>, TransportError>;

    /// Send one tagged payload to one node, at most once.
    async fn send(&self, target: &str, path: &str, payload: &[u8]) -> Result<(), TransportError>;

    /// Register the single inbound dispatch handler. The transport invokes
    /// it from its own dispatch context whenever it has data; the handler
    /// must be safe to call concurrently with ongoing sends.
    fn set_inbound_handler(&self, handler: InboundHandler);
}

// Message channel — fire-and-forget delivery to peers
//
// Sends are dispatched on background tasks so callers never block on
// network I/O. Outcomes are reported only to the log: the alert protocol
// stays correct even when a send silently fails.

use crate::message::MessageTag;
use crate::transport::{InboundHandler, NodeDiscovery, NodeTransport};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Sends tagged payloads to specific nodes or to every nearby node, and
/// wires the transport's push-driven inbound dispatch to a handler.
#[derive(Clone)]
pub struct MessageChannel {
    transport: Arc<dyn NodeTransport>,
    discovery: NodeDiscovery,
}

impl MessageChannel {
    pub fn new(transport: Arc<dyn NodeTransport>) -> Self {
        let discovery = NodeDiscovery::new(transport.clone());
        Self {
            transport,
            discovery,
        }
    }

    /// Channel with an explicitly configured discovery leaf.
    pub fn with_discovery(transport: Arc<dyn NodeTransport>, discovery: NodeDiscovery) -> Self {
        Self {
            transport,
            discovery,
        }
    }

    /// Send one message to one node, without waiting for the outcome.
    ///
    /// The returned handle resolves when the send has been reported; the
    /// caller is free to drop it. No retry on failure.
    pub fn send_to(&self, target: &str, tag: MessageTag, payload: Vec<u8>) -> JoinHandle<()> {
        let transport = self.transport.clone();
        let target = target.to_string();
        tokio::spawn(async move {
            deliver(transport.as_ref(), &target, tag, &payload).await;
        })
    }

    /// Send one message to every nearby node, each send independent.
    ///
    /// Zero discovered peers is a logged no-op. A failure toward one peer
    /// neither aborts nor delays the sends to its siblings.
    pub fn broadcast(&self, tag: MessageTag, payload: Vec<u8>) -> JoinHandle<()> {
        let transport = self.transport.clone();
        let discovery = self.discovery.clone();
        tokio::spawn(async move {
            let peers = discovery.nearby_peer_ids().await;
            if peers.is_empty() {
                tracing::debug!(path = %tag, "no nearby nodes, nothing to broadcast");
                return;
            }

            let sends = peers.iter().map(|peer| {
                let payload = &payload;
                let transport = &transport;
                async move {
                    deliver(transport.as_ref(), peer, tag, payload).await;
                }
            });
            futures::future::join_all(sends).await;
        })
    }

    /// Install the single inbound dispatch handler on the transport.
    pub fn bind_inbound(&self, handler: InboundHandler) {
        self.transport.set_inbound_handler(handler);
    }
}

/// One at-most-once send; the outcome only reaches the log.
async fn deliver(transport: &dyn NodeTransport, target: &str, tag: MessageTag, payload: &[u8]) {
    match transport.send(target, tag.as_path(), payload).await {
        Ok(()) => {
            tracing::debug!(target_node = %target, path = %tag, len = payload.len(), "message delivered");
        }
        Err(e) => {
            tracing::warn!(target_node = %target, path = %tag, error = %e, "message delivery failed");
        }
    }
}

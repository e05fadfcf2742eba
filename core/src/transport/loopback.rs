// Loopback transport — in-process peer substrate for tests and the demo
//
// A shared registry of named endpoints. Sending looks up the target and
// invokes its inbound handler directly; endpoints can be marked far away
// or unreachable to exercise discovery filtering and delivery failure.

use crate::message::InboundMessage;
use crate::transport::abstraction::{InboundHandler, NodeTransport, PeerNode, TransportError};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

struct EndpointEntry {
    display_name: String,
    nearby: bool,
    reachable: bool,
    handler: Option<InboundHandler>,
}

#[derive(Default)]
struct Registry {
    endpoints: HashMap<String, EndpointEntry>,
}

/// An in-process network of loopback endpoints.
#[derive(Clone, Default)]
pub struct LoopbackNetwork {
    registry: Arc<RwLock<Registry>>,
}

impl LoopbackNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new endpoint and hand back its transport.
    pub fn endpoint(&self, id: &str, display_name: &str, nearby: bool) -> Arc<LoopbackEndpoint> {
        self.registry.write().endpoints.insert(
            id.to_string(),
            EndpointEntry {
                display_name: display_name.to_string(),
                nearby,
                reachable: true,
                handler: None,
            },
        );
        Arc::new(LoopbackEndpoint {
            id: id.to_string(),
            registry: self.registry.clone(),
        })
    }

    /// Flip an endpoint's transport-reported proximity.
    pub fn set_nearby(&self, id: &str, nearby: bool) {
        if let Some(entry) = self.registry.write().endpoints.get_mut(id) {
            entry.nearby = nearby;
        }
    }

    /// Make sends to an endpoint fail (it stays discoverable).
    pub fn set_reachable(&self, id: &str, reachable: bool) {
        if let Some(entry) = self.registry.write().endpoints.get_mut(id) {
            entry.reachable = reachable;
        }
    }
}

/// One endpoint's view of the loopback network.
pub struct LoopbackEndpoint {
    id: String,
    registry: Arc<RwLock<Registry>>,
}

impl LoopbackEndpoint {
    pub fn id(&self) -> &str {
        &self.id
    }
}

#[async_trait]
impl NodeTransport for LoopbackEndpoint {
    async fn connected_nodes(&self) -> Result<Vec<PeerNode>, TransportError> {
        let registry = self.registry.read();
        Ok(registry
            .endpoints
            .iter()
            .filter(|(id, _)| id.as_str() != self.id)
            .map(|(id, entry)| PeerNode {
                id: id.clone(),
                display_name: entry.display_name.clone(),
                nearby: entry.nearby,
            })
            .collect())
    }

    async fn send(&self, target: &str, path: &str, payload: &[u8]) -> Result<(), TransportError> {
        // Clone the handler out so it runs without the registry lock held;
        // handlers are allowed to send in turn.
        let handler = {
            let registry = self.registry.read();
            let entry = registry
                .endpoints
                .get(target)
                .ok_or_else(|| TransportError::SendFailed(format!("unknown node {target}")))?;
            if !entry.reachable {
                return Err(TransportError::SendFailed(format!(
                    "node {target} unreachable"
                )));
            }
            entry.handler.clone()
        };

        if let Some(handler) = handler {
            handler(InboundMessage {
                source: self.id.clone(),
                path: path.to_string(),
                payload: payload.to_vec(),
            });
        }
        Ok(())
    }

    fn set_inbound_handler(&self, handler: InboundHandler) {
        if let Some(entry) = self.registry.write().endpoints.get_mut(&self.id) {
            entry.handler = Some(handler);
        }
    }
}

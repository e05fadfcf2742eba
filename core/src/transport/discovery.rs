// Node discovery — resolve the set of nearby peers, tolerating failure
//
// Discovery sits on the delivery-critical path, so the wait is bounded
// and every failure mode collapses to "no peers found". Callers treat an
// empty result as a normal, if unfortunate, outcome.

use crate::transport::abstraction::{NodeTransport, TransportError};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// Upper bound on a single discovery query.
pub const DISCOVERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Stateless call-and-return lookup of nearby peer node ids.
#[derive(Clone)]
pub struct NodeDiscovery {
    transport: Arc<dyn NodeTransport>,
    timeout: Duration,
}

impl NodeDiscovery {
    /// Create a discovery leaf over the given transport with the default
    /// query timeout.
    pub fn new(transport: Arc<dyn NodeTransport>) -> Self {
        Self::with_timeout(transport, DISCOVERY_TIMEOUT)
    }

    /// Create a discovery leaf with an explicit query timeout.
    pub fn with_timeout(transport: Arc<dyn NodeTransport>, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    /// Ids of the currently reachable peers that the transport reports as
    /// nearby. Transport errors and timeouts are logged and yield the
    /// empty set — never an error to the caller.
    pub async fn nearby_peer_ids(&self) -> HashSet<String> {
        match tokio::time::timeout(self.timeout, self.transport.connected_nodes()).await {
            Ok(Ok(nodes)) => nodes
                .into_iter()
                .filter(|node| node.nearby)
                .map(|node| node.id)
                .collect(),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "node discovery failed");
                HashSet::new()
            }
            Err(_) => {
                let e = TransportError::Timeout(format!("{:?} elapsed", self.timeout));
                tracing::warn!(error = %e, "node discovery timed out");
                HashSet::new()
            }
        }
    }
}

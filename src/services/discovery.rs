//! Peer discovery and endorser selection.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

#[cfg(test)]
use mockall::automock;

use super::Peer;

/// Source of the peers known to participate in a channel.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait DiscoveryService: Send + Sync {
    async fn get_peers(&self) -> eyre::Result<Vec<Arc<dyn Peer>>>;
}

/// Narrows discovered peers down to those needed to endorse a chaincode.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait SelectionService: Send + Sync {
    async fn get_endorsers_for(
        &self,
        chaincode_id: &str,
        channel_id: &str,
        peers: Vec<Arc<dyn Peer>>,
    ) -> eyre::Result<Vec<Arc<dyn Peer>>>;
}

/// Discovery backed by a fixed peer list.
#[derive(Clone, Default)]
pub struct StaticDiscoveryService {
    peers: Vec<Arc<dyn Peer>>,
}

impl StaticDiscoveryService {
    pub fn new(peers: Vec<Arc<dyn Peer>>) -> Self {
        Self { peers }
    }
}

#[async_trait]
impl DiscoveryService for StaticDiscoveryService {
    async fn get_peers(&self) -> eyre::Result<Vec<Arc<dyn Peer>>> {
        Ok(self.peers.clone())
    }
}

/// Selects every discovered peer.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllPeersSelection;

#[async_trait]
impl SelectionService for AllPeersSelection {
    async fn get_endorsers_for(
        &self,
        chaincode_id: &str,
        channel_id: &str,
        peers: Vec<Arc<dyn Peer>>,
    ) -> eyre::Result<Vec<Arc<dyn Peer>>> {
        debug!(
            "selected {} endorsers for chaincode {} on channel {}",
            peers.len(),
            chaincode_id,
            channel_id
        );
        Ok(peers)
    }
}

//! Ordering service node interface.

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::models::{BroadcastResponse, RpcError, SignedEnvelope};

#[async_trait]
#[cfg_attr(test, automock)]
pub trait Orderer: Send + Sync {
    fn url(&self) -> String;

    /// Broadcasts a signed envelope. One call is one broadcast attempt.
    async fn send_broadcast(
        &self,
        envelope: &SignedEnvelope,
    ) -> Result<BroadcastResponse, RpcError>;
}

//! Endorsing peer interface.
//!
//! Implementations wrap whatever RPC transport talks to the peer. Discovery
//! and selection hand peers around as `Arc<dyn Peer>`.

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::models::{ProposalResponse, RpcError, SignedProposal};

/// A network node able to execute and endorse transaction proposals.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait Peer: Send + Sync {
    fn name(&self) -> String;

    /// Address used to identify the peer in responses and logs.
    fn url(&self) -> String;

    /// Sends a signed proposal and returns the peer's response.
    ///
    /// A response with a non-success `status` is still `Ok`; only transport
    /// level failures are reported as `Err`.
    async fn process_transaction_proposal(
        &self,
        proposal: &SignedProposal,
    ) -> Result<ProposalResponse, RpcError>;
}

use serde::Serialize;

use super::ProposalResponse;

/// Outcome of a successful `query` or `execute`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Response {
    /// Payload all endorsers agreed on; empty when the chaincode returned nothing.
    pub payload: Vec<u8>,
    pub transaction_id: String,
    /// Successful proposal responses, in target order.
    pub responses: Vec<ProposalResponse>,
}

use serde::{Deserialize, Serialize};

use super::proposal::decode;
use super::{ChaincodeProposalPayload, Endorsement, Header, SignatureHeader, StatusError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaincodeEndorsedAction {
    /// The response payload every endorser signed.
    pub proposal_response_payload: Vec<u8>,
    pub endorsements: Vec<Endorsement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaincodeActionPayload {
    /// Proposal payload with the transient map stripped.
    pub chaincode_proposal_payload: ChaincodeProposalPayload,
    pub action: ChaincodeEndorsedAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionAction {
    pub header: SignatureHeader,
    pub payload: ChaincodeActionPayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub actions: Vec<TransactionAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub header: Header,
    pub data: Transaction,
}

/// What gets broadcast to the ordering service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedEnvelope {
    pub payload: Vec<u8>,
    pub signature: Vec<u8>,
}

impl SignedEnvelope {
    pub fn decode_payload(&self) -> Result<Payload, StatusError> {
        decode(&self.payload, "envelope payload")
    }
}

/// Orderer's acknowledgement of a broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastResponse {
    pub status: i32,
    pub info: String,
}

/// Commit notification for one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxStatusEvent {
    pub tx_id: String,
    pub validation_code: i32,
    pub block_number: u64,
}

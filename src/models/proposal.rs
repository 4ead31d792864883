//! Proposal-side wire structures.
//!
//! Everything that gets signed is encoded with `serde_json`; maps are
//! `BTreeMap`s so the encoding is stable.

use serde::{Deserialize, Serialize};

use super::{SdkCode, StatusError, TransientMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeaderType {
    EndorserTransaction,
}

/// Identity of the submitter as it appears in headers and endorsements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedIdentity {
    pub msp_id: String,
    pub id_bytes: Vec<u8>,
}

impl SerializedIdentity {
    pub fn to_bytes(&self) -> Result<Vec<u8>, StatusError> {
        encode(self, "identity")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelHeader {
    pub header_type: HeaderType,
    pub channel_id: String,
    pub tx_id: String,
    /// Milliseconds since the unix epoch.
    pub timestamp: i64,
    pub chaincode_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureHeader {
    pub creator: Vec<u8>,
    pub nonce: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub channel_header: ChannelHeader,
    pub signature_header: SignatureHeader,
}

/// Chaincode and input; `args[0]` is the function name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaincodeInvocationSpec {
    pub chaincode_id: String,
    pub args: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaincodeProposalPayload {
    pub input: ChaincodeInvocationSpec,
    #[serde(default, skip_serializing_if = "TransientMap::is_empty")]
    pub transient_map: TransientMap,
}

impl ChaincodeProposalPayload {
    /// The payload as it may appear on the ledger: transient data removed.
    pub fn without_transient(&self) -> Self {
        Self {
            input: self.input.clone(),
            transient_map: TransientMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub header: Header,
    pub payload: ChaincodeProposalPayload,
}

/// Encoded proposal plus the creator's signature over it; this is what peers receive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedProposal {
    pub proposal_bytes: Vec<u8>,
    pub signature: Vec<u8>,
}

impl SignedProposal {
    pub fn decode(&self) -> Result<Proposal, StatusError> {
        decode(&self.proposal_bytes, "proposal")
    }
}

/// A proposal ready to be sent, along with the transaction id derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionProposal {
    pub tx_id: String,
    pub proposal: Proposal,
    pub signed_proposal: SignedProposal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endorsement {
    /// Serialized identity of the endorsing peer.
    pub endorser: Vec<u8>,
    pub signature: Vec<u8>,
}

/// One peer's answer to a proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalResponse {
    /// Address of the peer that produced the response.
    pub endorser: String,
    pub status: i32,
    pub message: String,
    pub payload: Vec<u8>,
    pub endorsement: Option<Endorsement>,
}

/// A target that did not produce a usable proposal response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndorsementFailure {
    pub endorser: String,
    pub error: StatusError,
}

pub(crate) fn encode<T: Serialize>(value: &T, what: &str) -> Result<Vec<u8>, StatusError> {
    serde_json::to_vec(value)
        .map_err(|e| StatusError::sdk(SdkCode::Unknown, format!("failed to encode {what}: {e}")))
}

pub(crate) fn decode<T: for<'de> Deserialize<'de>>(
    bytes: &[u8],
    what: &str,
) -> Result<T, StatusError> {
    serde_json::from_slice(bytes)
        .map_err(|e| StatusError::sdk(SdkCode::Unknown, format!("failed to decode {what}: {e}")))
}

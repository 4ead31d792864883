//! Per-group status code spaces.
//!
//! Each subsystem owns its own integer space. `StatusError` carries the raw
//! `i32` and the group tells which of these enums can decode it.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::Serialize;
use strum::Display;

/// Codes raised by the client itself, also used for the client side of the
/// endorser and orderer RPC layers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, IntoPrimitive, TryFromPrimitive,
)]
#[repr(i32)]
pub enum SdkCode {
    Ok = 0,
    Unknown = 1,
    ConnectionFailed = 2,
    EndorsementMismatch = 3,
    EmptyCert = 4,
    Timeout = 5,
    NoPeersFound = 6,
    MultipleErrors = 7,
    SignatureVerificationFailed = 8,
    MissingEndorsement = 9,
    InvalidRequest = 10,
}

/// HTTP-like status reported by peers and orderers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, IntoPrimitive, TryFromPrimitive,
)]
#[repr(i32)]
pub enum PeerStatus {
    Unknown = 0,
    Success = 200,
    BadRequest = 400,
    Forbidden = 403,
    NotFound = 404,
    RequestEntityTooLarge = 413,
    InternalServerError = 500,
    NotImplemented = 501,
    ServiceUnavailable = 503,
}

/// Terminal validation outcome the ledger assigns to an ordered transaction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, IntoPrimitive, TryFromPrimitive,
)]
#[repr(i32)]
pub enum TxValidationCode {
    Valid = 0,
    NilEnvelope = 1,
    BadPayload = 2,
    BadCommonHeader = 3,
    BadCreatorSignature = 4,
    InvalidEndorserTransaction = 5,
    InvalidConfigTransaction = 6,
    UnsupportedTxPayload = 7,
    BadProposalTxId = 8,
    DuplicateTxId = 9,
    EndorsementPolicyFailure = 10,
    MvccReadConflict = 11,
    PhantomReadConflict = 12,
    UnknownTxType = 13,
    TargetChainNotFound = 14,
    MarshalTxError = 15,
    NilTxAction = 16,
    ExpiredChaincode = 17,
    ChaincodeVersionConflict = 18,
    BadHeaderExtension = 19,
    BadChannelHeader = 20,
    BadResponsePayload = 21,
    BadRwset = 22,
    IllegalWriteset = 23,
    InvalidWriteset = 24,
    NotValidated = 254,
    InvalidOtherReason = 255,
}

pub fn to_sdk_code(code: i32) -> Option<SdkCode> {
    SdkCode::try_from(code).ok()
}

pub fn to_peer_status(code: i32) -> Option<PeerStatus> {
    PeerStatus::try_from(code).ok()
}

pub fn to_validation_code(code: i32) -> Option<TxValidationCode> {
    TxValidationCode::try_from(code).ok()
}

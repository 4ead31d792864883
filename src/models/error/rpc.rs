use serde::Serialize;
use thiserror::Error;

use super::{Group, SdkCode, StatusError};

/// Failure reported by a peer or orderer RPC stub.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum RpcError {
    /// The stub already classified the failure.
    #[error(transparent)]
    Status(#[from] StatusError),
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Service unavailable: {0}")]
    Unavailable(String),
    #[error("Deadline exceeded")]
    DeadlineExceeded,
    #[error("Other RPC error: {0}")]
    Other(String),
}

/// Maps a transport failure into the code space of a client-side group.
///
/// `group` is the client group of the layer that made the call
/// (`EndorserClient` for proposals, `OrdererClient` for broadcasts). An
/// already classified status passes through unchanged.
pub fn classify_rpc_error(group: Group, err: RpcError) -> StatusError {
    match err {
        RpcError::Status(status) => status,
        RpcError::ConnectionFailed(msg) | RpcError::Unavailable(msg) => {
            StatusError::new(group, SdkCode::ConnectionFailed, msg)
        }
        RpcError::DeadlineExceeded => {
            StatusError::new(group, SdkCode::Timeout, "deadline exceeded")
        }
        RpcError::Other(msg) => StatusError::new(group, SdkCode::Unknown, msg),
    }
}

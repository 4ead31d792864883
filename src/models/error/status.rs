use std::error::Error;
use std::fmt;

use serde::Serialize;
use strum::Display;

use super::codes::{to_peer_status, to_sdk_code, to_validation_code, SdkCode};
use super::RpcError;

/// Subsystem a status code originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
pub enum Group {
    /// Client side of the endorser RPC (connection, local validation of endorsements).
    EndorserClient,
    /// A peer executed the proposal and rejected it.
    EndorserServer,
    /// Client side of the orderer broadcast RPC.
    OrdererClient,
    /// The orderer answered the broadcast with a non-success status.
    OrdererServer,
    /// The ledger marked the ordered transaction invalid.
    EventServer,
    /// Raised by this crate: bad input, timeouts, internal invariants.
    Sdk,
}

/// The single error type surfaced by the transaction pipeline.
///
/// `code` lives in the code space selected by `group`: [`SdkCode`] for
/// `Sdk`, `EndorserClient` and `OrdererClient`, `PeerStatus` for the two
/// server groups and `TxValidationCode` for `EventServer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusError {
    pub group: Group,
    pub code: i32,
    pub message: String,
    pub details: Vec<String>,
}

impl StatusError {
    pub fn new(group: Group, code: impl Into<i32>, message: impl Into<String>) -> Self {
        Self {
            group,
            code: code.into(),
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn sdk(code: SdkCode, message: impl Into<String>) -> Self {
        Self::new(Group::Sdk, code, message)
    }

    pub fn endorser_client(code: SdkCode, message: impl Into<String>) -> Self {
        Self::new(Group::EndorserClient, code, message)
    }

    pub fn endorser_server(status: impl Into<i32>, message: impl Into<String>) -> Self {
        Self::new(Group::EndorserServer, status, message)
    }

    pub fn orderer_client(code: SdkCode, message: impl Into<String>) -> Self {
        Self::new(Group::OrdererClient, code, message)
    }

    pub fn orderer_server(status: impl Into<i32>, message: impl Into<String>) -> Self {
        Self::new(Group::OrdererServer, status, message)
    }

    pub fn event_server(validation_code: impl Into<i32>, message: impl Into<String>) -> Self {
        Self::new(Group::EventServer, validation_code, message)
    }

    /// Attaches extra diagnostic lines. Only meant to be used while building the error.
    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    /// Human readable name of `code` within the group's code space.
    pub fn code_name(&self) -> String {
        let name = match self.group {
            Group::Sdk | Group::EndorserClient | Group::OrdererClient => {
                to_sdk_code(self.code).map(|c| c.to_string())
            }
            Group::EndorserServer | Group::OrdererServer => {
                to_peer_status(self.code).map(|c| c.to_string())
            }
            Group::EventServer => to_validation_code(self.code).map(|c| c.to_string()),
        };
        name.unwrap_or_else(|| "Unknown".to_string())
    }

    /// True when `(group, code)` equals the given pair.
    pub fn is(&self, group: Group, code: impl Into<i32>) -> bool {
        self.group == group && self.code == code.into()
    }

    /// Errors a chain step decided on for good: malformed requests, an empty
    /// target set and disagreeing endorsements. These never go through
    /// another attempt.
    pub fn is_permanent(&self) -> bool {
        self.is(Group::Sdk, SdkCode::InvalidRequest)
            || self.is(Group::Sdk, SdkCode::NoPeersFound)
            || self.is(Group::EndorserClient, SdkCode::EndorsementMismatch)
    }
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Code: ({}) {}. Description: {}",
            self.group,
            self.code,
            self.code_name(),
            self.message
        )?;
        if !self.details.is_empty() {
            write!(f, " Details: [{}]", self.details.join("; "))?;
        }
        Ok(())
    }
}

impl Error for StatusError {}

/// Recovers a [`StatusError`] from anywhere in an error's `source()` chain.
///
/// Matching is done by type, never by message content.
pub fn from_error(err: &(dyn Error + 'static)) -> Option<StatusError> {
    let mut current: Option<&(dyn Error + 'static)> = Some(err);
    while let Some(e) = current {
        if let Some(status) = e.downcast_ref::<StatusError>() {
            return Some(status.clone());
        }
        if let Some(RpcError::Status(status)) = e.downcast_ref::<RpcError>() {
            return Some(status.clone());
        }
        current = e.source();
    }
    None
}

/// Same as [`from_error`] for errors reported by pluggable collaborators.
pub fn from_report(report: &eyre::Report) -> Option<StatusError> {
    report.chain().find_map(|e| from_error(e))
}

/// Converts a collaborator failure into a `StatusError`, keeping any status
/// already present in its chain and falling back to `Sdk/Unknown`.
pub fn status_from_report(report: &eyre::Report, context: &str) -> StatusError {
    from_report(report)
        .unwrap_or_else(|| StatusError::sdk(SdkCode::Unknown, format!("{context}: {report}")))
}

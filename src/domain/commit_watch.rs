//! Waiting for the ledger's verdict on an ordered transaction.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::oneshot;

use crate::metrics::COMMIT_EVENTS_TOTAL;
use crate::models::{
    to_validation_code, SdkCode, StatusError, TxStatusEvent, TxValidationCode,
};
use crate::services::{EventService, RegistrationHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitState {
    Waiting,
    Valid,
    /// Carries the validation code the ledger assigned.
    Invalid(i32),
    TimedOut,
    /// The event source closed the registration without an event.
    Aborted,
}

impl CommitState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, CommitState::Waiting)
    }

    fn label(&self) -> &'static str {
        match self {
            CommitState::Waiting => "waiting",
            CommitState::Valid => "valid",
            CommitState::Invalid(_) => "invalid",
            CommitState::TimedOut => "timed_out",
            CommitState::Aborted => "aborted",
        }
    }
}

/// Releases the registration when dropped.
struct RegistrationGuard {
    event_service: Arc<dyn EventService>,
    handle: RegistrationHandle,
}

impl Drop for RegistrationGuard {
    fn drop(&mut self) {
        self.event_service.unregister(&self.handle);
    }
}

/// A registration for one transaction id and the state of the wait on it.
///
/// Dropping the watch, including dropping an unfinished [`CommitWatch::wait`]
/// future, releases the registration.
pub struct CommitWatch {
    tx_id: String,
    state: CommitState,
    receiver: oneshot::Receiver<TxStatusEvent>,
    guard: Option<RegistrationGuard>,
}

impl CommitWatch {
    pub fn register(
        event_service: Arc<dyn EventService>,
        tx_id: &str,
    ) -> Result<Self, StatusError> {
        let registration = event_service.register_tx_status(tx_id)?;
        debug!("watching commit status of transaction {}", tx_id);
        Ok(Self {
            tx_id: tx_id.to_string(),
            state: CommitState::Waiting,
            receiver: registration.receiver,
            guard: Some(RegistrationGuard {
                event_service,
                handle: registration.handle,
            }),
        })
    }

    pub fn tx_id(&self) -> &str {
        &self.tx_id
    }

    pub fn state(&self) -> CommitState {
        self.state
    }

    /// Waits at most `timeout` for the status event.
    ///
    /// Makes exactly one terminal transition; calling it again afterwards
    /// returns an error without waiting.
    pub async fn wait(&mut self, timeout: Duration) -> Result<TxStatusEvent, StatusError> {
        if self.state.is_terminal() {
            return Err(StatusError::sdk(
                SdkCode::Unknown,
                format!(
                    "commit watch for transaction {} already finished ({:?})",
                    self.tx_id, self.state
                ),
            ));
        }

        let outcome = tokio::time::timeout(timeout, &mut self.receiver).await;
        self.guard.take();

        let result = match outcome {
            Ok(Ok(event)) if event.validation_code == i32::from(TxValidationCode::Valid) => {
                self.state = CommitState::Valid;
                info!(
                    "transaction {} committed in block {}",
                    self.tx_id, event.block_number
                );
                Ok(event)
            }
            Ok(Ok(event)) => {
                self.state = CommitState::Invalid(event.validation_code);
                let reason = to_validation_code(event.validation_code)
                    .map(|code| code.to_string())
                    .unwrap_or_else(|| event.validation_code.to_string());
                warn!("transaction {} was invalidated: {}", self.tx_id, reason);
                Err(StatusError::event_server(
                    event.validation_code,
                    format!("received invalid transaction status {reason}"),
                ))
            }
            Ok(Err(_)) => {
                self.state = CommitState::Aborted;
                warn!("event registration for transaction {} was closed", self.tx_id);
                Err(StatusError::sdk(
                    SdkCode::Unknown,
                    "event registration closed before a status was received",
                ))
            }
            Err(_) => {
                self.state = CommitState::TimedOut;
                warn!(
                    "no commit event for transaction {} within {:?}",
                    self.tx_id, timeout
                );
                Err(StatusError::sdk(
                    SdkCode::Timeout,
                    format!("timed out waiting for commit of transaction {}", self.tx_id),
                ))
            }
        };

        COMMIT_EVENTS_TOTAL
            .with_label_values(&[self.state.label()])
            .inc();
        result
    }
}

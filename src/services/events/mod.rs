//! Transaction status notifications.
//!
//! A registration is a one-shot channel keyed by transaction id. The
//! [`TxStatusRegistry`] owns the senders; whoever observes committed blocks
//! calls [`TxStatusRegistry::deliver`].

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::{mapref::entry::Entry, DashMap};
use log::{debug, trace, warn};
use tokio::sync::oneshot;

#[cfg(test)]
use mockall::automock;

use crate::models::{SdkCode, StatusError, TxStatusEvent};

/// Identifies one registration so that it can be released later.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegistrationHandle {
    pub tx_id: String,
    pub id: u64,
}

#[derive(Debug)]
pub struct TxStatusRegistration {
    pub handle: RegistrationHandle,
    pub receiver: oneshot::Receiver<TxStatusEvent>,
}

#[cfg_attr(test, automock)]
pub trait EventService: Send + Sync {
    /// Registers interest in the commit status of `tx_id`.
    fn register_tx_status(&self, tx_id: &str) -> Result<TxStatusRegistration, StatusError>;

    /// Releases a registration. Unknown or already delivered handles are ignored.
    fn unregister(&self, handle: &RegistrationHandle);
}

/// In-memory event service.
#[derive(Debug, Default)]
pub struct TxStatusRegistry {
    registrations: DashMap<String, (u64, oneshot::Sender<TxStatusEvent>)>,
    next_id: AtomicU64,
}

impl TxStatusRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands `event` to the registration for its transaction id, if any.
    ///
    /// Returns whether a live registration received it. The registration is
    /// removed before sending, so an event is delivered at most once.
    pub fn deliver(&self, event: TxStatusEvent) -> bool {
        let Some((tx_id, (id, sender))) = self.registrations.remove(&event.tx_id) else {
            trace!("no registration for transaction {}", event.tx_id);
            return false;
        };
        match sender.send(event) {
            Ok(()) => {
                debug!("delivered status of transaction {} to registration {}", tx_id, id);
                true
            }
            Err(_) => {
                debug!("registration {} for transaction {} was already gone", id, tx_id);
                false
            }
        }
    }

    pub fn registration_count(&self) -> usize {
        self.registrations.len()
    }
}

impl EventService for TxStatusRegistry {
    fn register_tx_status(&self, tx_id: &str) -> Result<TxStatusRegistration, StatusError> {
        match self.registrations.entry(tx_id.to_string()) {
            Entry::Occupied(_) => {
                warn!("transaction {} already has a status registration", tx_id);
                Err(StatusError::sdk(
                    SdkCode::Unknown,
                    format!("registration already exists for transaction {tx_id}"),
                ))
            }
            Entry::Vacant(vacant) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                let (sender, receiver) = oneshot::channel();
                vacant.insert((id, sender));
                debug!("registered for status of transaction {} ({})", tx_id, id);
                Ok(TxStatusRegistration {
                    handle: RegistrationHandle {
                        tx_id: tx_id.to_string(),
                        id,
                    },
                    receiver,
                })
            }
        }
    }

    fn unregister(&self, handle: &RegistrationHandle) {
        if self
            .registrations
            .remove_if(&handle.tx_id, |_, (id, _)| *id == handle.id)
            .is_some()
        {
            debug!(
                "released registration {} for transaction {}",
                handle.id, handle.tx_id
            );
        }
    }
}

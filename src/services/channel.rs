//! Ledger channel handle: channel id plus the orderers serving it.

use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use log::{debug, info, warn};
use parking_lot::RwLock;

use crate::constants::SUCCESS_STATUS;
use crate::models::{
    classify_rpc_error, BroadcastResponse, Group, SdkCode, SignedEnvelope, StatusError,
};

use super::Orderer;

pub struct Channel {
    name: String,
    orderers: RwLock<Vec<Arc<dyn Orderer>>>,
}

impl Channel {
    /// Creates a handle for `name`. An empty name addresses the system channel.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            orderers: RwLock::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds an orderer; an orderer with the same url replaces the old one.
    pub fn add_orderer(&self, orderer: Arc<dyn Orderer>) {
        let url = orderer.url();
        let mut orderers = self.orderers.write();
        orderers.retain(|existing| existing.url() != url);
        orderers.push(orderer);
    }

    pub fn remove_orderer(&self, url: &str) {
        self.orderers.write().retain(|existing| existing.url() != url);
    }

    pub fn orderers(&self) -> Vec<Arc<dyn Orderer>> {
        self.orderers.read().clone()
    }

    /// Broadcasts `envelope` to every configured orderer concurrently.
    ///
    /// The first successful acknowledgement wins. When every orderer fails,
    /// the failure of the first orderer in configuration order is returned,
    /// with the other orderers' failures in its `details`.
    pub async fn send_envelope(
        &self,
        envelope: &SignedEnvelope,
    ) -> Result<BroadcastResponse, StatusError> {
        let orderers = self.orderers();
        if orderers.is_empty() {
            return Err(StatusError::orderer_client(
                SdkCode::Unknown,
                format!("no orderers configured for channel '{}'", self.name),
            ));
        }

        let mut pending: FuturesUnordered<_> = orderers
            .iter()
            .enumerate()
            .map(|(index, orderer)| async move {
                let result = orderer.send_broadcast(envelope).await;
                (index, orderer.url(), result)
            })
            .collect();

        let mut failures: Vec<(usize, String, StatusError)> = Vec::new();
        while let Some((index, url, result)) = pending.next().await {
            match result {
                Ok(response) if response.status == SUCCESS_STATUS => {
                    info!("envelope accepted by orderer {}", url);
                    return Ok(response);
                }
                Ok(response) => {
                    warn!(
                        "orderer {} rejected envelope with status {}: {}",
                        url, response.status, response.info
                    );
                    failures.push((
                        index,
                        url,
                        StatusError::orderer_server(response.status, response.info),
                    ));
                }
                Err(err) => {
                    warn!("broadcast to orderer {} failed: {}", url, err);
                    failures.push((index, url, classify_rpc_error(Group::OrdererClient, err)));
                }
            }
        }

        failures.sort_by_key(|(index, _, _)| *index);
        debug!("all {} orderers failed the broadcast", failures.len());
        let mut failures = failures.into_iter();
        match failures.next() {
            Some((_, _, err)) => Err(err.with_details(
                failures
                    .map(|(_, url, err)| format!("{}: {}", url, err))
                    .collect(),
            )),
            None => Err(StatusError::orderer_client(
                SdkCode::Unknown,
                "broadcast produced no result",
            )),
        }
    }
}

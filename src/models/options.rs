use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::TransientMap;
use crate::services::{Peer, RetryOptions};

/// Per-invocation overrides for `query` and `execute`.
#[derive(Clone, Default)]
pub struct InvokeOptions {
    /// Peers to send the proposal to instead of the selected endorsers.
    pub targets: Option<Vec<Arc<dyn Peer>>>,
    pub retry: Option<RetryOptions>,
    /// Merged over the request's own transient map.
    pub transient_map: Option<TransientMap>,
    /// Commit wait deadline, overriding the client default.
    pub timeout: Option<Duration>,
}

impl InvokeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_proposal_processors(mut self, targets: Vec<Arc<dyn Peer>>) -> Self {
        self.targets = Some(targets);
        self
    }

    pub fn with_retry(mut self, retry: RetryOptions) -> Self {
        self.retry = Some(retry);
        self
    }

    pub fn with_transient(mut self, transient_map: TransientMap) -> Self {
        self.transient_map = Some(transient_map);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl fmt::Debug for InvokeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvokeOptions")
            .field(
                "targets",
                &self
                    .targets
                    .as_ref()
                    .map(|targets| targets.iter().map(|p| p.url()).collect::<Vec<_>>()),
            )
            .field("retry", &self.retry)
            .field(
                "transient_keys",
                &self
                    .transient_map
                    .as_ref()
                    .map(|map| map.keys().cloned().collect::<Vec<_>>()),
            )
            .field("timeout", &self.timeout)
            .finish()
    }
}

use async_trait::async_trait;

use super::{handle_next, ClientContext, Handler, RequestContext};
use crate::domain::CommitWatch;
use crate::models::StatusError;

/// Waits until the ledger reports the submitted transaction as valid.
///
/// The deadline is the invocation's timeout, else the client's commit timeout.
///
/// Registration happens only after the envelope was accepted for ordering,
/// so an [`crate::services::EventService`] that does not replay recent blocks
/// can miss a fast commit and report it as `Sdk/Timeout`.
#[derive(Default)]
pub struct CommitStatusHandler {
    next: Option<Box<dyn Handler>>,
}

impl CommitStatusHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_next(next: impl Handler + 'static) -> Self {
        Self {
            next: Some(Box::new(next)),
        }
    }

    async fn wait_for_commit(
        &self,
        request_context: &RequestContext,
        client_context: &ClientContext,
    ) -> Result<(), StatusError> {
        let timeout = request_context
            .opts
            .timeout
            .unwrap_or(client_context.config.commit_timeout);
        let mut watch = CommitWatch::register(
            client_context.event_service.clone(),
            &request_context.response.transaction_id,
        )?;
        watch.wait(timeout).await?;
        Ok(())
    }
}

#[async_trait]
impl Handler for CommitStatusHandler {
    async fn handle(&self, request_context: &mut RequestContext, client_context: &ClientContext) {
        if let Err(err) = self.wait_for_commit(request_context, client_context).await {
            request_context.fail(err);
            return;
        }
        handle_next(self.next.as_deref(), request_context, client_context).await;
    }
}

use async_trait::async_trait;
use log::debug;

use super::{handle_next, ClientContext, Handler, RequestContext};
use crate::models::{status_from_report, StatusError};

/// Resolves the endorsing peers for the request.
///
/// Targets given through [`crate::models::InvokeOptions`] are kept as is;
/// otherwise the discovered peers are narrowed by the selection service.
#[derive(Default)]
pub struct ProposalProcessorHandler {
    next: Option<Box<dyn Handler>>,
}

impl ProposalProcessorHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_next(next: impl Handler + 'static) -> Self {
        Self {
            next: Some(Box::new(next)),
        }
    }

    async fn resolve_targets(
        &self,
        request_context: &mut RequestContext,
        client_context: &ClientContext,
    ) -> Result<(), StatusError> {
        if request_context.opts.targets.is_some() {
            return Ok(());
        }

        let peers = client_context
            .discovery
            .get_peers()
            .await
            .map_err(|e| status_from_report(&e, "failed to get peers"))?;
        let endorsers = client_context
            .selection
            .get_endorsers_for(
                &request_context.request.chaincode_id,
                client_context.channel.name(),
                peers,
            )
            .await
            .map_err(|e| status_from_report(&e, "failed to get endorsing peers"))?;

        debug!(
            "selected {} endorsers for chaincode {}",
            endorsers.len(),
            request_context.request.chaincode_id
        );
        request_context.opts.targets = Some(endorsers);
        Ok(())
    }
}

#[async_trait]
impl Handler for ProposalProcessorHandler {
    async fn handle(&self, request_context: &mut RequestContext, client_context: &ClientContext) {
        if let Err(err) = self.resolve_targets(request_context, client_context).await {
            request_context.fail(err);
            return;
        }
        handle_next(self.next.as_deref(), request_context, client_context).await;
    }
}

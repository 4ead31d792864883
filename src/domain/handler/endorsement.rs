use async_trait::async_trait;

use super::{handle_next, ClientContext, Handler, RequestContext};
use crate::domain::create_and_send_transaction_proposal;

/// Creates the proposal and collects the endorsements of the resolved targets.
#[derive(Default)]
pub struct EndorsementHandler {
    next: Option<Box<dyn Handler>>,
}

impl EndorsementHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_next(next: impl Handler + 'static) -> Self {
        Self {
            next: Some(Box::new(next)),
        }
    }
}

#[async_trait]
impl Handler for EndorsementHandler {
    async fn handle(&self, request_context: &mut RequestContext, client_context: &ClientContext) {
        let targets = request_context.opts.targets.clone().unwrap_or_default();
        let sent = create_and_send_transaction_proposal(
            &client_context.channel,
            client_context.identity.as_ref(),
            &request_context.request,
            &targets,
        )
        .await;

        let (proposal, outcome) = match sent {
            Ok(sent) => sent,
            Err(err) => {
                request_context.fail(err);
                return;
            }
        };

        request_context.response.transaction_id = proposal.tx_id.clone();
        request_context.response.responses = outcome.responses;
        request_context.endorsement_failures = outcome.failures;
        request_context.proposal = Some(proposal);

        handle_next(self.next.as_deref(), request_context, client_context).await;
    }
}

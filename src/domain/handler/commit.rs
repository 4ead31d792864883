use async_trait::async_trait;

use super::{handle_next, ClientContext, Handler, RequestContext};
use crate::domain::send_transaction;
use crate::models::{SdkCode, StatusError};

/// Submits the endorsed transaction to the channel's orderers.
#[derive(Default)]
pub struct CommitTxHandler {
    next: Option<Box<dyn Handler>>,
}

impl CommitTxHandler {
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
impl Handler for CommitTxHandler {
    async fn handle(&self, request_context: &mut RequestContext, client_context: &ClientContext) {
        let Some(proposal) = request_context.proposal.as_ref() else {
            request_context.fail(StatusError::sdk(
                SdkCode::Unknown,
                "no transaction proposal to commit",
            ));
            return;
        };

        let submitted = send_transaction(
            &client_context.channel,
            client_context.identity.as_ref(),
            proposal,
            &request_context.response.responses,
        )
        .await;

        if let Err(err) = submitted {
            request_context.fail(err);
            return;
        }
        handle_next(self.next.as_deref(), request_context, client_context).await;
    }
}

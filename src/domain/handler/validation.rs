use async_trait::async_trait;

use super::{handle_next, ClientContext, Handler, RequestContext};
use crate::domain::validate_endorsements;

/// Requires the endorsers to agree and exposes the agreed payload.
#[derive(Default)]
pub struct EndorsementValidationHandler {
    next: Option<Box<dyn Handler>>,
}

impl EndorsementValidationHandler {
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
impl Handler for EndorsementValidationHandler {
    async fn handle(&self, request_context: &mut RequestContext, client_context: &ClientContext) {
        let validated = validate_endorsements(
            &request_context.response.responses,
            &request_context.endorsement_failures,
        )
        .map(|payload| payload.to_vec());

        match validated {
            Ok(payload) => request_context.response.payload = payload,
            Err(err) => {
                request_context.fail(err);
                return;
            }
        }
        handle_next(self.next.as_deref(), request_context, client_context).await;
    }
}

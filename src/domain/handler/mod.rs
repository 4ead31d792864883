//! Chain of request handlers.
//!
//! Each step owns an optional successor and calls it explicitly once its own
//! work succeeded. A step that fails records the error in the
//! [`RequestContext`] and stops; nothing after it runs.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::ClientConfig;
use crate::models::{
    EndorsementFailure, InvokeOptions, Request, Response, StatusError, TransactionProposal,
};
use crate::services::{Channel, DiscoveryService, EventService, SelectionService, SigningIdentity};

mod proposal;
pub use proposal::*;

mod endorsement;
pub use endorsement::*;

mod validation;
pub use validation::*;

mod commit;
pub use commit::*;

mod commit_status;
pub use commit_status::*;

/// State of one invocation, passed by exclusive reference along the chain.
#[derive(Debug)]
pub struct RequestContext {
    pub request: Request,
    pub opts: InvokeOptions,
    pub response: Response,
    /// Set once the proposal has been sent.
    pub proposal: Option<TransactionProposal>,
    /// Targets that did not endorse, in target order.
    pub endorsement_failures: Vec<EndorsementFailure>,
    pub error: Option<StatusError>,
}

impl RequestContext {
    /// Entries of `opts.transient_map` are merged over the request's own.
    pub fn new(mut request: Request, opts: InvokeOptions) -> Self {
        if let Some(transient_map) = &opts.transient_map {
            request.transient_map.extend(
                transient_map
                    .iter()
                    .map(|(key, value)| (key.clone(), value.clone())),
            );
        }
        Self {
            request,
            opts,
            response: Response::default(),
            proposal: None,
            endorsement_failures: Vec::new(),
            error: None,
        }
    }

    pub fn fail(&mut self, error: StatusError) {
        self.error = Some(error);
    }

    pub fn into_result(self) -> Result<Response, StatusError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.response),
        }
    }
}

/// Collaborators shared by every step of every invocation.
#[derive(Clone)]
pub struct ClientContext {
    pub identity: Arc<dyn SigningIdentity>,
    pub discovery: Arc<dyn DiscoveryService>,
    pub selection: Arc<dyn SelectionService>,
    pub channel: Arc<Channel>,
    pub event_service: Arc<dyn EventService>,
    pub config: ClientConfig,
}

impl ClientContext {
    pub fn new(
        identity: Arc<dyn SigningIdentity>,
        discovery: Arc<dyn DiscoveryService>,
        selection: Arc<dyn SelectionService>,
        channel: Arc<Channel>,
        event_service: Arc<dyn EventService>,
    ) -> Self {
        Self {
            identity,
            discovery,
            selection,
            channel,
            event_service,
            config: ClientConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }
}

#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, request_context: &mut RequestContext, client_context: &ClientContext);
}

/// Passes control to `next` unless the context already carries an error.
pub async fn handle_next(
    next: Option<&dyn Handler>,
    request_context: &mut RequestContext,
    client_context: &ClientContext,
) {
    if request_context.error.is_some() {
        return;
    }
    if let Some(next) = next {
        next.handle(request_context, client_context).await;
    }
}

/// Target resolution, endorsement, validation.
pub fn new_query_handler() -> Box<dyn Handler> {
    Box::new(ProposalProcessorHandler::with_next(
        EndorsementHandler::with_next(EndorsementValidationHandler::new()),
    ))
}

/// The query chain followed by commit submission and the commit wait.
pub fn new_execute_handler() -> Box<dyn Handler> {
    Box::new(ProposalProcessorHandler::with_next(
        EndorsementHandler::with_next(EndorsementValidationHandler::with_next(
            CommitTxHandler::with_next(CommitStatusHandler::new()),
        )),
    ))
}

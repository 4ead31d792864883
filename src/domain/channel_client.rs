//! Entry point for invoking chaincode on one channel.

use std::time::Instant;

use log::{debug, error};

use super::{new_execute_handler, new_query_handler, ClientContext, Handler, RequestContext};
use crate::metrics::record_invocation;
use crate::models::{InvokeOptions, Request, Response, StatusError};
use crate::services::retry;

/// Runs queries and transactions against a channel.
///
/// Every call validates the request, then runs a handler chain inside the
/// retry policy. Each attempt starts from a fresh [`RequestContext`].
pub struct ChannelClient {
    context: ClientContext,
    query_handler: Box<dyn Handler>,
    execute_handler: Box<dyn Handler>,
}

impl ChannelClient {
    pub fn new(context: ClientContext) -> Self {
        Self {
            context,
            query_handler: new_query_handler(),
            execute_handler: new_execute_handler(),
        }
    }

    pub fn context(&self) -> &ClientContext {
        &self.context
    }

    /// Evaluates the request on the endorsers without ordering a transaction.
    pub async fn query(&self, request: Request) -> Result<Response, StatusError> {
        self.query_with_options(request, InvokeOptions::default())
            .await
    }

    pub async fn query_with_options(
        &self,
        request: Request,
        options: InvokeOptions,
    ) -> Result<Response, StatusError> {
        self.invoke("query", self.query_handler.as_ref(), request, options)
            .await
    }

    /// Endorses, orders and waits for the transaction to be committed.
    pub async fn execute(&self, request: Request) -> Result<Response, StatusError> {
        self.execute_with_options(request, InvokeOptions::default())
            .await
    }

    pub async fn execute_with_options(
        &self,
        request: Request,
        options: InvokeOptions,
    ) -> Result<Response, StatusError> {
        self.invoke("execute", self.execute_handler.as_ref(), request, options)
            .await
    }

    /// Runs `handler` in place of the built-in chains.
    pub async fn invoke_handler(
        &self,
        handler: &dyn Handler,
        request: Request,
        options: InvokeOptions,
    ) -> Result<Response, StatusError> {
        self.invoke("invoke_handler", handler, request, options)
            .await
    }

    async fn invoke(
        &self,
        operation: &str,
        handler: &dyn Handler,
        request: Request,
        options: InvokeOptions,
    ) -> Result<Response, StatusError> {
        let started = Instant::now();
        let result = self.run(operation, handler, request, options).await;
        if let Err(err) = &result {
            error!("{} failed: {}", operation, err);
        }
        record_invocation(operation, &result, started.elapsed());
        result
    }

    async fn run(
        &self,
        operation: &str,
        handler: &dyn Handler,
        request: Request,
        options: InvokeOptions,
    ) -> Result<Response, StatusError> {
        request.validate()?;
        debug!(
            "{} {}:{} on channel '{}'",
            operation,
            request.chaincode_id,
            request.fcn,
            self.context.channel.name()
        );

        let retry_options = options
            .retry
            .clone()
            .unwrap_or_else(|| self.context.config.retry.clone());
        let context = &self.context;

        retry(&retry_options, operation, || {
            let mut request_context = RequestContext::new(request.clone(), options.clone());
            async move {
                handler.handle(&mut request_context, context).await;
                request_context.into_result()
            }
        })
        .await
    }
}

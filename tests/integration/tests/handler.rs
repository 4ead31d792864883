//! Custom handler chains run through `ChannelClient::invoke_handler`.

use std::sync::Arc;

use async_trait::async_trait;
use chaincode_txn::domain::{
    create_and_send_transaction_proposal, handle_next, ClientContext, EndorsementValidationHandler,
    Handler, ProposalProcessorHandler, RequestContext,
};
use chaincode_txn::models::{Group, InvokeOptions, SdkCode, StatusError};
use chaincode_txn::services::Channel;

use crate::integration::common::{
    context::{as_peers, query_request, setup_channel_client},
    mocks::MockPeer,
};

struct CustomHandler {
    payload: Vec<u8>,
}

#[async_trait]
impl Handler for CustomHandler {
    async fn handle(&self, request_context: &mut RequestContext, _: &ClientContext) {
        request_context.response.payload = self.payload.clone();
    }
}

/// Endorses on its own channel instead of the client's.
struct CustomEndorsementHandler {
    channel: Arc<Channel>,
    next: Box<dyn Handler>,
}

#[async_trait]
impl Handler for CustomEndorsementHandler {
    async fn handle(&self, request_context: &mut RequestContext, client_context: &ClientContext) {
        let targets = request_context.opts.targets.clone().unwrap_or_default();
        let sent = create_and_send_transaction_proposal(
            &self.channel,
            client_context.identity.as_ref(),
            &request_context.request,
            &targets,
        )
        .await;

        match sent {
            Ok((proposal, outcome)) => {
                request_context.response.transaction_id = proposal.tx_id.clone();
                request_context.response.responses = outcome.responses;
                request_context.endorsement_failures = outcome.failures;
                request_context.proposal = Some(proposal);
            }
            Err(err) => {
                request_context.fail(err);
                return;
            }
        }
        handle_next(Some(self.next.as_ref()), request_context, client_context).await;
    }
}

struct FailingHandler;

#[async_trait]
impl Handler for FailingHandler {
    async fn handle(&self, request_context: &mut RequestContext, _: &ClientContext) {
        request_context.fail(StatusError::sdk(SdkCode::Unknown, "step failed"));
    }
}

#[tokio::test]
async fn test_invoke_handler() {
    let peer = Arc::new(MockPeer::new("Peer1", "http://peer1.com"));
    let test = setup_channel_client(as_peers(&[peer.clone()]));
    let expected = b"somepayload".to_vec();

    let response = test
        .client
        .invoke_handler(
            &CustomHandler {
                payload: expected.clone(),
            },
            query_request(),
            InvokeOptions::new(),
        )
        .await
        .unwrap();

    assert_eq!(response.payload, expected);
    assert_eq!(peer.process_proposal_calls(), 0);
}

#[tokio::test]
async fn test_system_channel_endorsement() {
    let peer = Arc::new(MockPeer::new("Peer1", "http://peer1.com").with_payload(b"config"));
    let test = setup_channel_client(as_peers(&[peer.clone()]));

    let handler = ProposalProcessorHandler::with_next(CustomEndorsementHandler {
        channel: Arc::new(Channel::new("")),
        next: Box::new(EndorsementValidationHandler::new()),
    });

    let response = test
        .client
        .invoke_handler(&handler, query_request(), InvokeOptions::new())
        .await
        .unwrap();
    assert_eq!(response.payload, b"config".to_vec());

    let proposal = peer.received_proposals()[0].decode().unwrap();
    assert_eq!(proposal.header.channel_header.channel_id, "");
    assert_eq!(proposal.header.channel_header.tx_id, response.transaction_id);
}

#[tokio::test]
async fn test_failing_step_stops_chain() {
    let peer = Arc::new(MockPeer::new("Peer1", "http://peer1.com"));
    let test = setup_channel_client(as_peers(&[peer.clone()]));

    let handler = ProposalProcessorHandler::with_next(FailingHandler);
    let err = test
        .client
        .invoke_handler(&handler, query_request(), InvokeOptions::new())
        .await
        .unwrap_err();

    assert!(err.is(Group::Sdk, SdkCode::Unknown));
    assert_eq!(err.message, "step failed");
    assert_eq!(peer.process_proposal_calls(), 0);
}

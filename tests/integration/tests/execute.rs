//! Execute integration tests
//!
//! Full invocations: endorsement, ordering and the commit wait.

use std::sync::Arc;
use std::time::Duration;

use chaincode_txn::models::{
    from_error, Group, InvokeOptions, PeerStatus, Request, RpcError, SdkCode, StatusError,
    TransientMap, TxValidationCode,
};
use chaincode_txn::services::Orderer;

use crate::integration::common::{
    context::{
        as_peers, move_request, setup_channel_client, setup_channel_client_with_error,
        setup_channel_client_with_nodes,
    },
    mocks::{MockEventService, MockOrderer, MockPeer},
};

fn orderer(mock: MockOrderer) -> (Arc<MockOrderer>, Vec<Arc<dyn Orderer>>) {
    let orderer = Arc::new(mock);
    let orderers: Vec<Arc<dyn Orderer>> = vec![orderer.clone()];
    (orderer, orderers)
}

// =============================================================================
// Request Validation
// =============================================================================

#[tokio::test]
async fn test_execute_rejects_invalid_requests() {
    let peer = Arc::new(MockPeer::new("Peer1", "http://peer1.com"));
    let test = setup_channel_client(as_peers(&[peer.clone()]));

    let invalid = [
        Request::default(),
        Request::new("", "invoke").with_args(["move", "a", "b", "1"]),
        Request::new("testCC", "").with_args(["move", "a", "b", "1"]),
    ];
    for request in invalid {
        let err = test.client.execute(request).await.unwrap_err();
        assert_eq!(err.group, Group::Sdk);
    }
    assert_eq!(peer.process_proposal_calls(), 0);
    assert_eq!(test.events.registration_attempts(), 0);
}

// =============================================================================
// Successful Commit
// =============================================================================

#[tokio::test]
async fn test_execute_tx() {
    let peer = Arc::new(MockPeer::new("Peer1", "http://peer1.com").with_payload(b"moved"));
    let (orderer, orderers) = orderer(MockOrderer::new("grpc://orderer1:7050"));
    let events = Arc::new(MockEventService::new(Some(TxValidationCode::Valid.into())));
    let test = setup_channel_client_with_nodes(
        None,
        None,
        as_peers(&[peer]),
        orderers,
        events.clone(),
    );

    let response = test.client.execute(move_request()).await.unwrap();
    assert_eq!(response.payload, b"moved".to_vec());
    assert_eq!(response.responses.len(), 1);

    let envelopes = orderer.received_envelopes();
    assert_eq!(envelopes.len(), 1);
    let payload = envelopes[0].decode_payload().unwrap();
    assert_eq!(payload.header.channel_header.tx_id, response.transaction_id);
    assert_eq!(payload.header.channel_header.channel_id, test.channel.name());

    assert_eq!(events.registration_attempts(), 1);
    assert_eq!(events.live_registrations(), 0);
}

#[tokio::test]
async fn test_execute_excludes_transient_data_from_envelope() {
    let peer = Arc::new(MockPeer::new("Peer1", "http://peer1.com"));
    let (orderer, orderers) = orderer(MockOrderer::new("grpc://orderer1:7050"));
    let test = setup_channel_client_with_nodes(
        None,
        None,
        as_peers(&[peer.clone()]),
        orderers,
        Arc::new(MockEventService::new(Some(0))),
    );

    let mut transient = TransientMap::new();
    transient.insert("collection-secret".to_string(), b"s3cr3t".to_vec());
    test.client
        .execute_with_options(move_request(), InvokeOptions::new().with_transient(transient))
        .await
        .unwrap();

    let proposal = peer.received_proposals()[0].decode().unwrap();
    assert_eq!(
        proposal.payload.transient_map["collection-secret"],
        b"s3cr3t".to_vec()
    );

    let payload = orderer.received_envelopes()[0].decode_payload().unwrap();
    let action = &payload.data.actions[0].payload;
    assert!(action.chaincode_proposal_payload.transient_map.is_empty());
    assert_eq!(
        action.chaincode_proposal_payload.input,
        proposal.payload.input
    );
}

#[tokio::test]
async fn test_execute_first_orderer_success_wins() {
    let (_, mut orderers) = orderer(
        MockOrderer::new("grpc://orderer1:7050")
            .with_error(RpcError::Unavailable("restarting".to_string())),
    );
    let (healthy, more) = orderer(MockOrderer::new("grpc://orderer2:7050"));
    orderers.extend(more);

    let test = setup_channel_client_with_nodes(
        None,
        None,
        as_peers(&[Arc::new(MockPeer::new("Peer1", "http://peer1.com"))]),
        orderers,
        Arc::new(MockEventService::new(Some(0))),
    );

    test.client.execute(move_request()).await.unwrap();
    assert_eq!(healthy.received_envelopes().len(), 1);
}

// =============================================================================
// Ordering Failures
// =============================================================================

#[tokio::test]
async fn test_orderer_status_error() {
    let (_, orderers) = orderer(MockOrderer::new("grpc://orderer1:7050").with_error(
        RpcError::Status(StatusError::orderer_client(
            SdkCode::ConnectionFailed,
            "test error",
        )),
    ));
    let events = Arc::new(MockEventService::new(None));
    let test = setup_channel_client_with_nodes(
        None,
        None,
        as_peers(&[Arc::new(MockPeer::new("Peer1", "http://peer1.com"))]),
        orderers,
        events.clone(),
    );

    let err = test.client.execute(move_request()).await.unwrap_err();
    let status = from_error(&err).expect("Expected status error");
    assert!(status.is(Group::OrdererClient, SdkCode::ConnectionFailed));
    assert_eq!(status.message, "test error");
    assert_eq!(events.registration_attempts(), 0);
}

#[tokio::test]
async fn test_orderer_rejection_is_orderer_server_error() {
    let mut rejecting = MockOrderer::new("grpc://orderer1:7050");
    rejecting.status = PeerStatus::BadRequest.into();
    let (_, orderers) = orderer(rejecting);
    let test = setup_channel_client_with_nodes(
        None,
        None,
        as_peers(&[Arc::new(MockPeer::new("Peer1", "http://peer1.com"))]),
        orderers,
        Arc::new(MockEventService::new(None)),
    );

    let err = test.client.execute(move_request()).await.unwrap_err();
    assert!(err.is(Group::OrdererServer, PeerStatus::BadRequest));
}

#[tokio::test]
async fn test_execute_without_orderers() {
    let test = setup_channel_client_with_nodes(
        None,
        None,
        as_peers(&[Arc::new(MockPeer::new("Peer1", "http://peer1.com"))]),
        Vec::new(),
        Arc::new(MockEventService::new(None)),
    );

    let err = test.client.execute(move_request()).await.unwrap_err();
    assert!(err.is(Group::OrdererClient, SdkCode::Unknown));
}

// =============================================================================
// Commit Status
// =============================================================================

#[tokio::test]
async fn test_transaction_validation_error() {
    let validation_code = TxValidationCode::BadRwset;
    let events = Arc::new(MockEventService::new(Some(validation_code.into())));
    let (_, orderers) = orderer(MockOrderer::new("grpc://orderer1:7050"));
    let test = setup_channel_client_with_nodes(
        None,
        None,
        as_peers(&[Arc::new(MockPeer::new("Peer1", "http://peer1.com").with_payload(b"x"))]),
        orderers,
        events.clone(),
    );

    let result = test.client.execute(move_request()).await;
    let err = result.expect_err("expected error");
    let status = from_error(&err).expect("Expected status error");
    assert!(status.is(Group::EventServer, validation_code));
    assert_eq!(events.live_registrations(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_execute_commit_timeout_releases_registration() {
    let events = Arc::new(MockEventService::new(None));
    let (_, orderers) = orderer(MockOrderer::new("grpc://orderer1:7050"));
    let test = setup_channel_client_with_nodes(
        None,
        None,
        as_peers(&[Arc::new(MockPeer::new("Peer1", "http://peer1.com"))]),
        orderers,
        events.clone(),
    );

    let err = test
        .client
        .execute_with_options(
            move_request(),
            InvokeOptions::new().with_timeout(Duration::from_millis(100)),
        )
        .await
        .unwrap_err();
    assert!(err.is(Group::Sdk, SdkCode::Timeout));
    assert_eq!(events.registration_attempts(), 1);
    assert_eq!(events.live_registrations(), 0);
}

// =============================================================================
// Target Resolution
// =============================================================================

#[tokio::test]
async fn test_execute_tx_discovery_error() {
    let test = setup_channel_client_with_error(Some("Test Error"), None, Vec::new());

    let err = test.client.execute(move_request()).await.unwrap_err();
    assert!(err.message.contains("Test Error"));
    assert_eq!(test.events.registration_attempts(), 0);
}

#[tokio::test]
async fn test_execute_tx_selection_error() {
    let test = setup_channel_client_with_error(None, Some("Test Error"), Vec::new());

    let err = test.client.execute(move_request()).await.unwrap_err();
    assert!(err.message.contains("Test Error"));
}

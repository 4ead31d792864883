//! Channel client fixtures wired to the in-process mocks.

use std::sync::Arc;

use chaincode_txn::config::ClientConfig;
use chaincode_txn::domain::{ChannelClient, ClientContext};
use chaincode_txn::models::Request;
use chaincode_txn::services::{Channel, Orderer, Peer};

use super::logging::init_test_logging;
use super::mocks::{MockDiscovery, MockEventService, MockIdentity, MockOrderer, MockSelection};

pub const TEST_CHANNEL: &str = "testChannel";

pub struct TestClient {
    pub client: ChannelClient,
    pub events: Arc<MockEventService>,
    pub channel: Arc<Channel>,
}

pub fn query_request() -> Request {
    Request::new("testCC", "invoke").with_args(["query", "b"])
}

pub fn move_request() -> Request {
    Request::new("testCC", "invoke").with_args(["move", "a", "b", "1"])
}

pub fn as_peers<P: Peer + 'static>(peers: &[Arc<P>]) -> Vec<Arc<dyn Peer>> {
    peers
        .iter()
        .map(|peer| peer.clone() as Arc<dyn Peer>)
        .collect()
}

/// Client whose selection returns `peers`, with one healthy orderer and an
/// event source that reports every transaction as valid.
pub fn setup_channel_client(peers: Vec<Arc<dyn Peer>>) -> TestClient {
    setup_channel_client_with_error(None, None, peers)
}

pub fn setup_channel_client_with_error(
    discovery_error: Option<&str>,
    selection_error: Option<&str>,
    peers: Vec<Arc<dyn Peer>>,
) -> TestClient {
    setup_channel_client_with_nodes(
        discovery_error,
        selection_error,
        peers,
        vec![Arc::new(MockOrderer::new("grpc://orderer.example.com:7050"))],
        Arc::new(MockEventService::new(Some(0))),
    )
}

pub fn setup_channel_client_with_nodes(
    discovery_error: Option<&str>,
    selection_error: Option<&str>,
    peers: Vec<Arc<dyn Peer>>,
    orderers: Vec<Arc<dyn Orderer>>,
    events: Arc<MockEventService>,
) -> TestClient {
    init_test_logging();

    let channel = Arc::new(Channel::new(TEST_CHANNEL));
    for orderer in orderers {
        channel.add_orderer(orderer);
    }

    let context = ClientContext::new(
        Arc::new(MockIdentity),
        Arc::new(MockDiscovery {
            peers: Vec::new(),
            error: discovery_error.map(str::to_string),
        }),
        Arc::new(MockSelection {
            peers,
            error: selection_error.map(str::to_string),
        }),
        channel.clone(),
        events.clone(),
    )
    .with_config(ClientConfig::default());

    TestClient {
        client: ChannelClient::new(context),
        events,
        channel,
    }
}

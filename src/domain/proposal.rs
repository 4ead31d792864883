//! Building, signing and fanning out transaction proposals.

use std::sync::Arc;

use futures::future::join_all;
use log::{debug, warn};
use rand::Rng;

use crate::constants::{NONCE_SIZE, SUCCESS_STATUS};
use crate::metrics::ENDORSEMENT_FAILURES_TOTAL;
use crate::models::{
    classify_rpc_error, encode, status_from_report, ChaincodeInvocationSpec,
    ChaincodeProposalPayload, ChannelHeader, EndorsementFailure, Group, Header, HeaderType,
    Proposal, ProposalResponse, Request, SdkCode, SignatureHeader, SignedProposal, StatusError,
    TransactionProposal,
};
use crate::services::{serialize_identity, Channel, Peer, SigningIdentity};
use crate::utils::{current_timestamp_ms, sha256_hex};

/// What the targets of a proposal answered, both lists in target order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProposalResponses {
    /// Responses carrying a success status.
    pub responses: Vec<ProposalResponse>,
    pub failures: Vec<EndorsementFailure>,
}

pub fn generate_nonce() -> Vec<u8> {
    let mut nonce = vec![0u8; NONCE_SIZE];
    rand::rng().fill(&mut nonce[..]);
    nonce
}

/// Transaction id: hex encoded SHA-256 of `nonce || creator`.
pub fn compute_txn_id(nonce: &[u8], creator: &[u8]) -> String {
    sha256_hex(&[nonce, creator])
}

/// Builds and signs a proposal invoking `request` on `channel_id`.
///
/// The chaincode input is the function name followed by the request args.
/// The transient map travels inside the proposal only.
pub async fn new_transaction_proposal(
    channel_id: &str,
    identity: &dyn SigningIdentity,
    request: &Request,
) -> Result<TransactionProposal, StatusError> {
    let creator = serialize_identity(identity)?;
    let nonce = generate_nonce();
    let tx_id = compute_txn_id(&nonce, &creator);

    let mut args = Vec::with_capacity(request.args.len() + 1);
    args.push(request.fcn.as_bytes().to_vec());
    args.extend(request.args.iter().cloned());

    let proposal = Proposal {
        header: Header {
            channel_header: ChannelHeader {
                header_type: HeaderType::EndorserTransaction,
                channel_id: channel_id.to_string(),
                tx_id: tx_id.clone(),
                timestamp: current_timestamp_ms(),
                chaincode_id: request.chaincode_id.clone(),
            },
            signature_header: SignatureHeader { creator, nonce },
        },
        payload: ChaincodeProposalPayload {
            input: ChaincodeInvocationSpec {
                chaincode_id: request.chaincode_id.clone(),
                args,
            },
            transient_map: request.transient_map.clone(),
        },
    };

    let proposal_bytes = encode(&proposal, "proposal")?;
    let signature = identity
        .sign(&proposal_bytes)
        .await
        .map_err(|e| status_from_report(&e, "failed to sign proposal"))?;

    debug!(
        "created proposal {} for {}:{} on channel '{}'",
        tx_id, request.chaincode_id, request.fcn, channel_id
    );
    Ok(TransactionProposal {
        tx_id,
        proposal,
        signed_proposal: SignedProposal {
            proposal_bytes,
            signature,
        },
    })
}

/// Sends the signed proposal to every target concurrently and waits for all
/// of them.
///
/// Fails only when no target produced a successful response, with the
/// failure of the first target. The other targets' failures are kept in
/// its `details`.
pub async fn send_transaction_proposal(
    proposal: &TransactionProposal,
    targets: &[Arc<dyn Peer>],
) -> Result<ProposalResponses, StatusError> {
    if targets.is_empty() {
        return Err(StatusError::sdk(
            SdkCode::NoPeersFound,
            "no target peers for transaction proposal",
        ));
    }

    let signed = &proposal.signed_proposal;
    let results = join_all(targets.iter().map(|peer| async move {
        let url = peer.url();
        let result = match peer.process_transaction_proposal(signed).await {
            Ok(response) if response.status == SUCCESS_STATUS => Ok(response),
            Ok(response) => Err(StatusError::endorser_server(
                response.status,
                response.message,
            )),
            Err(err) => Err(classify_rpc_error(Group::EndorserClient, err)),
        };
        if let Err(error) = &result {
            warn!(
                "proposal {} failed on peer {} ({}): {}",
                proposal.tx_id,
                peer.name(),
                url,
                error
            );
        }
        result.map_err(|error| EndorsementFailure {
            endorser: url,
            error,
        })
    }))
    .await;

    let mut outcome = ProposalResponses::default();
    for result in results {
        match result {
            Ok(response) => outcome.responses.push(response),
            Err(failure) => {
                ENDORSEMENT_FAILURES_TOTAL
                    .with_label_values(&[failure.error.group.to_string().as_str()])
                    .inc();
                outcome.failures.push(failure);
            }
        }
    }

    if outcome.responses.is_empty() {
        if let Some((first, others)) = outcome.failures.split_first() {
            return Err(first
                .error
                .clone()
                .with_details(failure_details(others)));
        }
    }
    Ok(outcome)
}

/// `endorser: error` lines for the failures not reported as the main error.
fn failure_details(failures: &[EndorsementFailure]) -> Vec<String> {
    failures
        .iter()
        .map(|failure| format!("{}: {}", failure.endorser, failure.error))
        .collect()
}

/// Creates a proposal on `channel` and sends it to `targets`.
pub async fn create_and_send_transaction_proposal(
    channel: &Channel,
    identity: &dyn SigningIdentity,
    request: &Request,
    targets: &[Arc<dyn Peer>],
) -> Result<(TransactionProposal, ProposalResponses), StatusError> {
    let proposal = new_transaction_proposal(channel.name(), identity, request).await?;
    let responses = send_transaction_proposal(&proposal, targets).await?;
    Ok((proposal, responses))
}

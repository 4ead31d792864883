//! Assembling the endorsed transaction and handing it to the ordering service.

use log::info;

use crate::models::{
    encode, status_from_report, ChaincodeActionPayload, ChaincodeEndorsedAction, Payload,
    ProposalResponse, SdkCode, SignedEnvelope, StatusError, Transaction, TransactionAction,
    TransactionProposal,
};
use crate::services::{Channel, SigningIdentity};

/// Builds the signed envelope for `proposal` from its agreed responses.
///
/// The transient map of the proposal is left out of the envelope.
pub async fn create_transaction(
    proposal: &TransactionProposal,
    responses: &[ProposalResponse],
    identity: &dyn SigningIdentity,
) -> Result<SignedEnvelope, StatusError> {
    let Some(first) = responses.first() else {
        return Err(StatusError::endorser_client(
            SdkCode::MissingEndorsement,
            "at least one proposal response is required to create a transaction",
        ));
    };

    let endorsements = responses
        .iter()
        .map(|response| {
            response.endorsement.clone().ok_or_else(|| {
                StatusError::endorser_client(
                    SdkCode::MissingEndorsement,
                    format!("proposal response from {} has no endorsement", response.endorser),
                )
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let payload = Payload {
        header: proposal.proposal.header.clone(),
        data: Transaction {
            actions: vec![TransactionAction {
                header: proposal.proposal.header.signature_header.clone(),
                payload: ChaincodeActionPayload {
                    chaincode_proposal_payload: proposal.proposal.payload.without_transient(),
                    action: ChaincodeEndorsedAction {
                        proposal_response_payload: first.payload.clone(),
                        endorsements,
                    },
                },
            }],
        },
    };

    let payload = encode(&payload, "transaction payload")?;
    let signature = identity
        .sign(&payload)
        .await
        .map_err(|e| status_from_report(&e, "failed to sign transaction"))?;

    Ok(SignedEnvelope { payload, signature })
}

/// Creates the envelope and broadcasts it on `channel`.
pub async fn send_transaction(
    channel: &Channel,
    identity: &dyn SigningIdentity,
    proposal: &TransactionProposal,
    responses: &[ProposalResponse],
) -> Result<(), StatusError> {
    let envelope = create_transaction(proposal, responses, identity).await?;
    channel.send_envelope(&envelope).await?;
    info!(
        "transaction {} submitted for ordering on channel '{}'",
        proposal.tx_id,
        channel.name()
    );
    Ok(())
}

use log::{debug, warn};

use crate::constants::ENDORSEMENT_MISMATCH_MESSAGE;
use crate::models::{EndorsementFailure, Group, ProposalResponse, SdkCode, StatusError};

/// Checks that the endorsers agree and returns the agreed payload.
///
/// A peer that executed the proposal and rejected it counts as disagreement
/// and fails validation with that peer's status. Peers that could not be
/// reached are ignored. Every remaining payload must equal the first
/// response's payload byte for byte.
pub fn validate_endorsements<'a>(
    responses: &'a [ProposalResponse],
    failures: &[EndorsementFailure],
) -> Result<&'a [u8], StatusError> {
    if let Some(rejected) = failures
        .iter()
        .find(|failure| failure.error.group == Group::EndorserServer)
    {
        warn!(
            "endorser {} rejected the proposal: {}",
            rejected.endorser, rejected.error
        );
        return Err(rejected.error.clone());
    }

    let Some((reference, others)) = responses.split_first() else {
        return Err(StatusError::endorser_client(
            SdkCode::MissingEndorsement,
            "no proposal responses to validate",
        ));
    };

    if let Some(diverging) = others.iter().find(|r| r.payload != reference.payload) {
        warn!(
            "payload from {} differs from payload of {}",
            diverging.endorser, reference.endorser
        );
        return Err(StatusError::endorser_client(
            SdkCode::EndorsementMismatch,
            ENDORSEMENT_MISMATCH_MESSAGE,
        ));
    }

    debug!("{} endorsements agree", responses.len());
    Ok(&reference.payload)
}

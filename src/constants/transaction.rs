/// Size in bytes of the random nonce mixed into every transaction id.
pub const NONCE_SIZE: usize = 24;

/// Default time to wait for a commit event after the envelope is ordered.
pub const DEFAULT_COMMIT_TIMEOUT_MS: u64 = 30_000; // 30 seconds

/// Status a peer or orderer uses to report success.
pub const SUCCESS_STATUS: i32 = 200;

pub const ENDORSEMENT_MISMATCH_MESSAGE: &str = "ProposalResponsePayloads do not match";

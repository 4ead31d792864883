use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::models::{SerializedIdentity, StatusError};

/// The submitter: membership id, certificate bytes and a signing key.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait SigningIdentity: Send + Sync {
    fn msp_id(&self) -> String;

    /// Enrollment certificate bytes.
    fn identity(&self) -> Vec<u8>;

    async fn sign(&self, message: &[u8]) -> eyre::Result<Vec<u8>>;
}

/// Serialized creator bytes as they appear in headers.
pub fn serialize_identity(identity: &dyn SigningIdentity) -> Result<Vec<u8>, StatusError> {
    SerializedIdentity {
        msp_id: identity.msp_id(),
        id_bytes: identity.identity(),
    }
    .to_bytes()
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{SdkCode, StatusError};

/// Data handed to the chaincode at execution time but kept out of the
/// ledger-visible transaction.
pub type TransientMap = BTreeMap<String, Vec<u8>>;

/// A chaincode invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub chaincode_id: String,
    pub fcn: String,
    pub args: Vec<Vec<u8>>,
    #[serde(default)]
    pub transient_map: TransientMap,
}

impl Request {
    pub fn new(chaincode_id: impl Into<String>, fcn: impl Into<String>) -> Self {
        Self {
            chaincode_id: chaincode_id.into(),
            fcn: fcn.into(),
            ..Default::default()
        }
    }

    pub fn with_args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Vec<u8>>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_transient_map(mut self, transient_map: TransientMap) -> Self {
        self.transient_map = transient_map;
        self
    }

    /// Rejects requests that cannot be turned into a proposal.
    pub fn validate(&self) -> Result<(), StatusError> {
        if self.chaincode_id.is_empty() {
            return Err(StatusError::sdk(
                SdkCode::InvalidRequest,
                "ChaincodeID is required",
            ));
        }
        if self.fcn.is_empty() {
            return Err(StatusError::sdk(SdkCode::InvalidRequest, "Fcn is required"));
        }
        Ok(())
    }
}

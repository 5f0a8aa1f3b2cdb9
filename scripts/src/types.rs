//! Type definitions used throughout the scripts

use alloy::primitives::Bytes;

/// A request to deploy a single contract
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentRequest {
    /// The name of the contract, as known to the build system
    pub contract_name: String,
    /// The creation bytecode, with any ABI-encoded constructor arguments appended
    pub creation_code: Bytes,
}

impl DeploymentRequest {
    /// Construct a new deployment request
    pub fn new(contract_name: impl Into<String>, creation_code: Bytes) -> Self {
        Self {
            contract_name: contract_name.into(),
            creation_code,
        }
    }
}

//! Definitions of CLI arguments for the deploy script

use std::path::PathBuf;

use alloy::primitives::Bytes;
use clap::Parser;

use crate::{
    artifacts::load_artifact,
    client::RpcDeploymentClient,
    constants::{
        DEFAULT_ARTIFACTS_DIR, DEFAULT_CONTRACT_NAME, DEFAULT_PKEY, DEFAULT_RPC_URL,
        NUM_DEPLOY_CONFIRMATIONS,
    },
    errors::ScriptError,
    types::DeploymentRequest,
};

/// Deploy a compiled contract and print its address
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Private key of the deployer
    #[arg(short, long, env = "PKEY", default_value = DEFAULT_PKEY, hide_default_value = true)]
    pub priv_key: String,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Name of the contract to deploy
    #[arg(short, long, default_value = DEFAULT_CONTRACT_NAME)]
    pub contract: String,

    /// Directory containing the compiled contract artifacts
    #[arg(short, long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: PathBuf,

    /// ABI-encoded constructor arguments, in hex
    #[arg(long)]
    pub constructor_args: Option<String>,

    /// Number of confirmations to wait for
    #[arg(
        long,
        default_value_t = NUM_DEPLOY_CONFIRMATIONS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub confirmations: u64,
}

impl Cli {
    /// Build the RPC client described by the arguments
    pub fn client(&self) -> Result<RpcDeploymentClient, ScriptError> {
        RpcDeploymentClient::new(&self.rpc_url, &self.priv_key, self.confirmations)
    }

    /// Build the deployment request described by the arguments
    pub fn deployment_request(&self) -> Result<DeploymentRequest, ScriptError> {
        let constructor_args = match &self.constructor_args {
            Some(hex) => hex
                .parse::<Bytes>()
                .map_err(|e| ScriptError::CalldataConstruction(e.to_string()))?,
            None => Bytes::new(),
        };

        let artifact = load_artifact(&self.artifacts_dir, &self.contract)?;
        let creation_code = artifact.creation_code(&constructor_args)?;

        Ok(DeploymentRequest::new(&self.contract, creation_code))
    }
}

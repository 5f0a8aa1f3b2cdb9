//! The blockchain client used to submit and confirm deployments

use std::{future::Future, str::FromStr};

use alloy::{
    network::{Ethereum, TransactionBuilder},
    primitives::Address,
    providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder},
    rpc::types::{TransactionReceipt, TransactionRequest},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use tracing::info;

use crate::{errors::ScriptError, types::DeploymentRequest};

/// The operations the deploy script needs from a blockchain client
pub trait DeploymentClient {
    /// A submitted but not yet confirmed deployment
    type Pending;
    /// A confirmed deployment
    type Deployed;

    /// Submit the contract creation transaction
    fn deploy_contract(
        &self,
        request: &DeploymentRequest,
    ) -> impl Future<Output = Result<Self::Pending, ScriptError>>;

    /// Wait until the network confirms the deployment
    fn wait_for_deployment(
        &self,
        pending: Self::Pending,
    ) -> impl Future<Output = Result<Self::Deployed, ScriptError>>;

    /// Get the address of the deployed contract
    fn get_address(&self, deployed: &Self::Deployed) -> Address;
}

/// A confirmed deployment, as seen through the RPC client
pub struct ConfirmedDeployment {
    /// The receipt of the creation transaction
    pub receipt: TransactionReceipt,
    /// The address at which the contract was created
    pub address: Address,
}

/// A [`DeploymentClient`] backed by a JSON-RPC provider with a local signer
#[derive(Clone)]
pub struct RpcDeploymentClient {
    /// The provider, with the deployer's key attached as wallet
    provider: DynProvider<Ethereum>,
    /// The number of confirmations to wait for
    confirmations: u64,
}

impl RpcDeploymentClient {
    /// Sets up the client with which to deploy contracts from the given
    /// private key and RPC url
    pub fn new(rpc_url: &str, priv_key: &str, confirmations: u64) -> Result<Self, ScriptError> {
        let url =
            Url::parse(rpc_url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
        let signer = PrivateKeySigner::from_str(priv_key)
            .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

        info!("deploying from {}", signer.address());

        let provider = ProviderBuilder::new().wallet(signer).connect_http(url);
        Ok(Self {
            provider: DynProvider::new(provider),
            confirmations,
        })
    }
}

impl DeploymentClient for RpcDeploymentClient {
    type Pending = PendingTransactionBuilder<Ethereum>;
    type Deployed = ConfirmedDeployment;

    async fn deploy_contract(
        &self,
        request: &DeploymentRequest,
    ) -> Result<Self::Pending, ScriptError> {
        let tx = TransactionRequest::default().with_deploy_code(request.creation_code.clone());

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

        info!("submitted deployment transaction {}", pending.tx_hash());
        Ok(pending)
    }

    async fn wait_for_deployment(
        &self,
        pending: Self::Pending,
    ) -> Result<Self::Deployed, ScriptError> {
        let receipt = pending
            .with_required_confirmations(self.confirmations)
            .get_receipt()
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

        let deployed = confirmed_deployment(receipt)?;
        info!("deployment confirmed in block {:?}", deployed.receipt.block_number);
        Ok(deployed)
    }

    fn get_address(&self, deployed: &Self::Deployed) -> Address {
        deployed.address
    }
}

/// Check that a confirmed creation transaction succeeded and created a contract
pub fn confirmed_deployment(
    receipt: TransactionReceipt,
) -> Result<ConfirmedDeployment, ScriptError> {
    if !receipt.status() {
        return Err(ScriptError::ContractDeployment(format!(
            "transaction {} reverted",
            receipt.transaction_hash
        )));
    }

    let address = receipt.contract_address.ok_or_else(|| {
        ScriptError::ContractDeployment(format!(
            "receipt for {} has no contract address",
            receipt.transaction_hash
        ))
    })?;

    Ok(ConfirmedDeployment { receipt, address })
}

//! Implementation of the deploy script

use std::io::Write;

use alloy::primitives::Address;
use tracing::{debug, info};

use crate::{
    client::DeploymentClient,
    constants::{FAILURE_EXIT_CODE, SUCCESS_EXIT_CODE},
    errors::ScriptError,
    types::DeploymentRequest,
};

/// Deploy a contract, returning its address once the deployment is confirmed.
///
/// Makes a single attempt; any error is returned to the caller as-is.
pub async fn deploy<C: DeploymentClient>(
    client: &C,
    request: &DeploymentRequest,
) -> Result<Address, ScriptError> {
    info!("deploying {}", request.contract_name);

    let pending = client.deploy_contract(request).await?;
    let deployed = client.wait_for_deployment(pending).await?;
    let address = client.get_address(&deployed);

    debug!("{} confirmed at {}", request.contract_name, address);
    Ok(address)
}

/// Deploy a contract and report the outcome to the operator, returning the
/// process exit code.
///
/// On success a single line is written to `out`; on failure the error is
/// written to `err` and nothing is written to `out`.
pub async fn run_deployment<C: DeploymentClient>(
    client: &C,
    request: &DeploymentRequest,
    out: &mut impl Write,
    err: &mut impl Write,
) -> u8 {
    let res = deploy(client, request).await;
    report(&request.contract_name, res, out, err)
}

/// Write the outcome of a deployment, returning the process exit code
pub fn report(
    contract_name: &str,
    res: Result<Address, ScriptError>,
    out: &mut impl Write,
    err: &mut impl Write,
) -> u8 {
    let written = match res {
        Ok(address) => writeln!(out, "{} deployed to :  {}", contract_name, address),
        Err(e) => {
            let _ = writeln!(err, "{}", e);
            return FAILURE_EXIT_CODE;
        }
    };

    match written {
        Ok(()) => SUCCESS_EXIT_CODE,
        Err(e) => {
            let _ = writeln!(err, "error writing deployment result: {}", e);
            FAILURE_EXIT_CODE
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use alloy::primitives::{address, Address, Bytes};

    use super::{deploy, report, run_deployment};
    use crate::{
        client::DeploymentClient,
        constants::{FAILURE_EXIT_CODE, SUCCESS_EXIT_CODE},
        errors::ScriptError,
        types::DeploymentRequest,
    };

    /// The address the mock client assigns to deployed contracts
    const MOCK_ADDRESS: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");

    /// The stage at which the mock client fails, if any
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum FailAt {
        /// Succeed at every stage
        Never,
        /// Fail to submit the creation transaction
        Submission,
        /// Fail while waiting for confirmation
        Confirmation,
    }

    /// A deployment client that records calls and fails on request
    struct MockClient {
        /// Where to fail
        fail_at: FailAt,
        /// The number of submissions made
        submissions: Cell<usize>,
        /// Whether the client was asked to wait on a deployment
        waited: Cell<bool>,
    }

    impl MockClient {
        /// Construct a mock that fails at the given stage
        fn new(fail_at: FailAt) -> Self {
            Self {
                fail_at,
                submissions: Cell::new(0),
                waited: Cell::new(false),
            }
        }
    }

    impl DeploymentClient for MockClient {
        type Pending = Bytes;
        type Deployed = Address;

        async fn deploy_contract(
            &self,
            request: &DeploymentRequest,
        ) -> Result<Self::Pending, ScriptError> {
            self.submissions.set(self.submissions.get() + 1);
            if self.fail_at == FailAt::Submission {
                return Err(ScriptError::ContractDeployment("insufficient funds".to_string()));
            }

            Ok(request.creation_code.clone())
        }

        async fn wait_for_deployment(
            &self,
            _pending: Self::Pending,
        ) -> Result<Self::Deployed, ScriptError> {
            self.waited.set(true);
            if self.fail_at == FailAt::Confirmation {
                return Err(ScriptError::ContractDeployment("transaction reverted".to_string()));
            }

            Ok(MOCK_ADDRESS)
        }

        fn get_address(&self, deployed: &Self::Deployed) -> Address {
            *deployed
        }
    }

    /// A request for the default contract with dummy bytecode
    fn request() -> DeploymentRequest {
        DeploymentRequest::new("StablecoinEscrow", Bytes::from_static(&[0x60, 0x80]))
    }

    /// Run a deployment against the mock, returning the exit code and the
    /// contents of the output and error streams
    async fn run(client: &MockClient) -> (u8, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run_deployment(client, &request(), &mut out, &mut err).await;

        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_successful_deployment() {
        let client = MockClient::new(FailAt::Never);
        let (code, out, err) = run(&client).await;

        assert_eq!(code, SUCCESS_EXIT_CODE);
        assert_eq!(out.lines().count(), 1);
        assert_eq!(
            out,
            "StablecoinEscrow deployed to :  0x5FbDB2315678afecb367f032d93F642f64180aa3\n"
        );
        assert!(err.is_empty());
    }

    #[tokio::test]
    async fn test_address_printed_untransformed() {
        let client = MockClient::new(FailAt::Never);
        let (_, out, _) = run(&client).await;

        assert!(out.contains(&MOCK_ADDRESS.to_string()));
    }

    #[tokio::test]
    async fn test_submission_failure() {
        let client = MockClient::new(FailAt::Submission);
        let (code, out, err) = run(&client).await;

        assert_eq!(code, FAILURE_EXIT_CODE);
        assert!(out.is_empty());
        assert!(err.contains("insufficient funds"));
        assert!(!client.waited.get());
    }

    #[tokio::test]
    async fn test_confirmation_failure() {
        let client = MockClient::new(FailAt::Confirmation);
        let (code, out, err) = run(&client).await;

        assert_eq!(code, FAILURE_EXIT_CODE);
        assert!(out.is_empty());
        assert!(err.contains("transaction reverted"));
    }

    #[tokio::test]
    async fn test_no_retry_on_failure() {
        let client = MockClient::new(FailAt::Submission);
        let res = deploy(&client, &request()).await;

        assert!(res.is_err());
        assert_eq!(client.submissions.get(), 1);
    }

    #[test]
    fn test_report_setup_failure() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let res = Err(ScriptError::ReadArtifact("no artifact".to_string()));
        let code = report("StablecoinEscrow", res, &mut out, &mut err);

        assert_eq!(code, FAILURE_EXIT_CODE);
        assert!(out.is_empty());
        assert_eq!(String::from_utf8(err).unwrap(), "error reading artifact: no artifact\n");
    }
}

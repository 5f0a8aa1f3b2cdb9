//! Constants used in the deploy scripts

/// The contract deployed when none is given on the command line
pub const DEFAULT_CONTRACT_NAME: &str = "StablecoinEscrow";

/// The directory in which the build system writes contract artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// The default RPC URL, a local development node
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// The default private key, the first default account of a local development node
pub const DEFAULT_PKEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// The number of confirmations to wait for the contract deployment transaction
pub const NUM_DEPLOY_CONFIRMATIONS: u64 = 1;

/// The extension of a contract artifact file
pub const ARTIFACT_EXTENSION: &str = "json";

/// The directory holding raw compiler input/output, which contains no artifacts
pub const BUILD_INFO_DIR: &str = "build-info";

/// The marker surrounding an unresolved library placeholder in linkable bytecode
pub const LIBRARY_PLACEHOLDER_MARKER: &str = "__";

/// The log level used when `RUST_LOG` is unset
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// The exit code signalling a successful deployment
pub const SUCCESS_EXIT_CODE: u8 = 0;

/// The exit code signalling a failed deployment
pub const FAILURE_EXIT_CODE: u8 = 1;

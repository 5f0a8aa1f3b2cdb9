//! Resolution and parsing of compiled contract artifacts.
//!
//! Both Hardhat artifacts (`artifacts/contracts/<File>.sol/<Name>.json`, with
//! `bytecode` as a hex string) and Foundry artifacts (`out/<File>.sol/<Name>.json`,
//! with the hex string under `bytecode.object`) are accepted.

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::primitives::{hex, Bytes};
use itertools::Itertools;
use serde::Deserialize;
use tracing::debug;

use crate::{
    constants::{ARTIFACT_EXTENSION, BUILD_INFO_DIR, LIBRARY_PLACEHOLDER_MARKER},
    errors::ScriptError,
};

/// The on-disk layout of an artifact, restricted to the fields we consume
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    /// The contract name, only present in Hardhat artifacts
    contract_name: Option<String>,
    /// The creation bytecode
    bytecode: RawBytecode,
}

/// The two encodings of the `bytecode` field
#[derive(Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    /// Hardhat: a bare hex string
    Hex(String),
    /// Foundry: an object whose `object` field is the hex string
    Object {
        /// The hex-encoded bytecode
        object: String,
    },
}

impl RawBytecode {
    /// Consume the field, returning the hex string
    fn into_hex(self) -> String {
        match self {
            RawBytecode::Hex(s) => s,
            RawBytecode::Object { object } => object,
        }
    }
}

/// A compiled contract artifact
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractArtifact {
    /// The name of the contract
    pub contract_name: String,
    /// The hex-encoded creation bytecode, without a `0x` prefix
    bytecode: String,
}

impl ContractArtifact {
    /// Parse an artifact from its JSON representation.
    ///
    /// `fallback_name` is used when the artifact does not name its contract.
    pub fn from_json(json: &str, fallback_name: &str) -> Result<Self, ScriptError> {
        let raw: RawArtifact =
            serde_json::from_str(json).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;

        let bytecode = raw.bytecode.into_hex();
        let bytecode = bytecode.strip_prefix("0x").unwrap_or(&bytecode).to_string();

        Ok(Self {
            contract_name: raw.contract_name.unwrap_or_else(|| fallback_name.to_string()),
            bytecode,
        })
    }

    /// Read and parse the artifact at the given path
    pub fn from_file(path: &Path) -> Result<Self, ScriptError> {
        let json = fs::read_to_string(path)
            .map_err(|e| ScriptError::ReadArtifact(format!("{}: {}", path.display(), e)))?;

        let fallback_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();

        Self::from_json(&json, fallback_name)
    }

    /// Build the creation code for the contract, appending the given
    /// ABI-encoded constructor arguments
    pub fn creation_code(&self, constructor_args: &[u8]) -> Result<Bytes, ScriptError> {
        if self.bytecode.is_empty() {
            return Err(ScriptError::ArtifactParsing(format!(
                "{} has no bytecode, it may be an interface or abstract contract",
                self.contract_name
            )));
        }

        if self.bytecode.contains(LIBRARY_PLACEHOLDER_MARKER) {
            return Err(ScriptError::ArtifactParsing(format!(
                "{} has unlinked library references",
                self.contract_name
            )));
        }

        let mut code =
            hex::decode(&self.bytecode).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;
        code.extend_from_slice(constructor_args);

        Ok(Bytes::from(code))
    }
}

/// Find the artifact for the given contract beneath the artifacts directory
pub fn find_artifact(artifacts_dir: &Path, contract_name: &str) -> Result<PathBuf, ScriptError> {
    let file_name = format!("{contract_name}.{ARTIFACT_EXTENSION}");

    let mut matches = Vec::new();
    collect_artifacts(artifacts_dir, &file_name, &mut matches)?;
    matches.sort();

    match matches.len() {
        0 => Err(ScriptError::ReadArtifact(format!(
            "no artifact for {} found in {}",
            contract_name,
            artifacts_dir.display()
        ))),
        1 => Ok(matches.remove(0)),
        _ => Err(ScriptError::ReadArtifact(format!(
            "multiple artifacts for {} found: {}",
            contract_name,
            matches.iter().map(|p| p.display()).join(", ")
        ))),
    }
}

/// Find and parse the artifact for the given contract
pub fn load_artifact(
    artifacts_dir: &Path,
    contract_name: &str,
) -> Result<ContractArtifact, ScriptError> {
    let path = find_artifact(artifacts_dir, contract_name)?;
    debug!("using artifact at {}", path.display());

    ContractArtifact::from_file(&path)
}

/// Recursively collect all files named `file_name` beneath `dir`
fn collect_artifacts(
    dir: &Path,
    file_name: &str,
    matches: &mut Vec<PathBuf>,
) -> Result<(), ScriptError> {
    let entries = fs::read_dir(dir)
        .map_err(|e| ScriptError::ReadArtifact(format!("{}: {}", dir.display(), e)))?;

    for entry in entries {
        let path = entry
            .map_err(|e| ScriptError::ReadArtifact(e.to_string()))?
            .path();

        if path.is_dir() {
            if path.file_name().is_some_and(|name| name == BUILD_INFO_DIR) {
                continue;
            }
            collect_artifacts(&path, file_name, matches)?;
        } else if path.file_name().is_some_and(|name| name == file_name) {
            matches.push(path);
        }
    }

    Ok(())
}

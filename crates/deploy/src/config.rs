//! Run configuration: network selection, credentials, and the `foundry.toml`
//! values the verification phase depends on.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::contracts::ProtocolParams;

/// Networks the suite can be deployed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Network {
    Mainnet,
    Ropsten,
    Rinkeby,
    Goerli,
}

impl Network {
    /// Chain identifier passed to the verification tool.
    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Mainnet => 1,
            Network::Ropsten => 3,
            Network::Rinkeby => 4,
            Network::Goerli => 5,
        }
    }

    /// Alchemy RPC endpoint for this network.
    pub fn rpc_url(&self, alchemy_key: &str) -> String {
        format!("https://eth-{self}.alchemyapi.io/v2/{alchemy_key}")
    }
}

/// Immutable configuration for one pipeline run, assembled once at startup
/// and handed to every orchestrator.
#[derive(Debug, Clone)]
pub struct DeployConfig {
    pub network: Network,
    pub chain_id: u64,
    pub rpc_url: String,
    /// Private key the deployment transactions are signed with.
    pub private_key: String,
    /// Block-explorer API key for verification status checks.
    pub etherscan_key: String,
    /// Binary driven for `create`, `verify-contract` and `verify-check`.
    pub forge_bin: String,
    /// Binary driven for `abi-encode`.
    pub cast_bin: String,
    /// Explicit solc binary, overriding the `~/.svm` lookup.
    pub solc_bin: Option<PathBuf>,
    pub params: ProtocolParams,
    /// Upper bound on each external call.
    pub command_timeout: Duration,
}

/// The `foundry.toml` values the verification phase needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FoundryConfig {
    /// Compiler version identifier, e.g. `0.8.13`.
    pub solc: String,
    /// Optimizer run count the contracts were compiled with.
    pub optimizer_runs: u64,
}

#[derive(Debug, Deserialize)]
struct FoundryToml {
    default: Option<FoundryConfig>,
    profile: Option<FoundryProfiles>,
}

#[derive(Debug, Deserialize)]
struct FoundryProfiles {
    default: Option<FoundryConfig>,
}

impl FoundryConfig {
    /// Loads the default profile from a `foundry.toml`, accepting both the
    /// legacy `[default]` and the current `[profile.default]` layouts.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("invalid foundry config {}", path.display()))
    }

    fn from_toml(content: &str) -> Result<Self> {
        let parsed: FoundryToml = toml::from_str(content).context("failed to parse as TOML")?;
        parsed
            .default
            .or(parsed.profile.and_then(|profiles| profiles.default))
            .context("no `[default]` or `[profile.default]` table with `solc` and `optimizer_runs`")
    }

    /// Path of the locally installed compiler for this version,
    /// `~/.svm/<solc>/solc-<solc>`.
    pub fn solc_binary(&self) -> Result<PathBuf> {
        let home = dirs::home_dir().context("could not determine home directory")?;
        Ok(home
            .join(".svm")
            .join(&self.solc)
            .join(format!("solc-{}", self.solc)))
    }
}

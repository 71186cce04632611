use std::path::PathBuf;

use alloy_core::primitives::Address;
use clap::Parser;
use rentex_deploy::contracts::{
    DEFAULT_PROTOCOL_FEE_RECIPIENT, DEFAULT_PROXY_FACTORY, DEFAULT_STRATEGY_FEE_BPS, DEFAULT_WETH,
};
use rentex_deploy::{Network, ProtocolParams};
use tracing::level_filters::LevelFilter;

/// The default network to deploy to.
const DEFAULT_NETWORK: Network = Network::Mainnet;
/// The default upper bound on each external tool invocation, in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 600;

#[derive(Parser)]
#[command(name = "rentex")]
#[command(
    author,
    version,
    about = "Deploy the rental-exchange contract suite and verify it on the block explorer"
)]
pub struct Cli {
    /// The verbosity level.
    #[arg(short, long, env = "RENTEX_VERBOSITY", default_value_t = LevelFilter::INFO)]
    pub verbosity: LevelFilter,

    /// The network to deploy to.
    #[arg(value_name = "NETWORK", default_value_t = DEFAULT_NETWORK)]
    pub network: Network,

    /// Alchemy API key used to build the RPC endpoint URL.
    #[arg(long, env = "ALCHEMY_KEY", hide_env_values = true)]
    pub alchemy_key: String,

    /// Private key the deployment transactions are signed with.
    #[arg(long, env = "PK", hide_env_values = true)]
    pub private_key: String,

    /// Block-explorer API key for verification status checks.
    #[arg(long, env = "ETHERSCAN_API_KEY", hide_env_values = true)]
    pub etherscan_key: String,

    /// Path to the project's foundry.toml, which supplies the compiler
    /// version and optimizer-run count for verification.
    #[arg(long, alias = "config", env = "RENTEX_FOUNDRY_CONFIG", default_value = "foundry.toml")]
    pub foundry_config: PathBuf,

    /// Upper bound in seconds on each external tool invocation.
    #[arg(long, env = "RENTEX_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Path the deployed address map is written to.
    #[arg(long, env = "RENTEX_REPORT", default_value = "deployments.toml")]
    pub report: PathBuf,

    /// Stop after the deployment phase, skipping verification.
    #[arg(long, env = "RENTEX_SKIP_VERIFY")]
    pub skip_verify: bool,

    /// The forge binary to invoke.
    #[arg(long, env = "RENTEX_FORGE_BIN", default_value = "forge")]
    pub forge_bin: String,

    /// The cast binary to invoke.
    #[arg(long, env = "RENTEX_CAST_BIN", default_value = "cast")]
    pub cast_bin: String,

    /// Explicit solc binary path, overriding the `~/.svm/<version>` lookup.
    #[arg(long, env = "RENTEX_SOLC_BIN")]
    pub solc_bin: Option<PathBuf>,

    /// Protocol parameter overrides.
    #[clap(flatten)]
    pub params: ProtocolParamOverrides,
}

/// Protocol parameters threaded into the contract constructors.
#[derive(Debug, Clone, Parser)]
pub struct ProtocolParamOverrides {
    /// Proxy factory address wired into the exchange constructor.
    #[arg(long, env = "RENTEX_PROXY_FACTORY", default_value = DEFAULT_PROXY_FACTORY)]
    pub proxy_factory: Address,

    /// WETH address wired into the exchange constructor.
    #[arg(long, env = "RENTEX_WETH", default_value = DEFAULT_WETH)]
    pub weth: Address,

    /// Protocol fee recipient wired into the exchange constructor.
    #[arg(long, env = "RENTEX_FEE_RECIPIENT", default_value = DEFAULT_PROTOCOL_FEE_RECIPIENT)]
    pub fee_recipient: Address,

    /// Fixed-price strategy fee in basis points.
    #[arg(long, env = "RENTEX_STRATEGY_FEE_BPS", default_value_t = DEFAULT_STRATEGY_FEE_BPS)]
    pub strategy_fee_bps: u64,
}

impl From<ProtocolParamOverrides> for ProtocolParams {
    fn from(overrides: ProtocolParamOverrides) -> Self {
        Self {
            proxy_factory: overrides.proxy_factory,
            weth: overrides.weth,
            protocol_fee_recipient: overrides.fee_recipient,
            strategy_fee_bps: overrides.strategy_fee_bps,
        }
    }
}

//! Driving the forge binary: contract deployment, explorer verification, and
//! verification status checks.

pub mod cmd;

use alloy_core::primitives::Address;
use anyhow::{Context, Result};

use crate::config::DeployConfig;
use crate::contracts::Contract;
use crate::parse;
use crate::runner::CommandRunner;

use cmd::{ForgeCreateCmd, ForgeVerifyCmd, verify_check_args};

/// Deploys one contract and returns the address scraped from the
/// `Deployed to:` line.
///
/// A missing marker means the deployment did not land (compile error,
/// reverted simulation, network failure) and is an error: threading an
/// absent address into a later constructor would waste gas on a broken
/// deployment.
pub async fn create(
    runner: &CommandRunner,
    config: &DeployConfig,
    contract: Contract,
    constructor_args: Vec<String>,
) -> Result<Address> {
    let args = ForgeCreateCmd::new(&config.rpc_url, &config.private_key, contract.path())
        .constructor_args(constructor_args)
        .build();

    let raw = runner
        .run_scan(&config.forge_bin, &args, |line| {
            parse::deployed_to(line).map(str::to_string)
        })
        .await
        .with_context(|| format!("deploying {contract}"))?
        .with_context(|| {
            format!(
                "no `{}` line in forge output for {contract}; the deployment did not land",
                parse::DEPLOYED_TO_MARKER
            )
        })?;

    raw.parse()
        .with_context(|| format!("malformed deployed address {raw:?} for {contract}"))
}

/// Submits one contract for explorer verification and returns the tracking
/// identifier scraped from the `GUID:` line.
pub async fn verify_contract(
    runner: &CommandRunner,
    config: &DeployConfig,
    optimizer_runs: u64,
    compiler_version: &str,
    address: Address,
    contract: Contract,
    encoded_args: Option<String>,
) -> Result<String> {
    let mut cmd = ForgeVerifyCmd::new(
        config.chain_id,
        optimizer_runs,
        compiler_version,
        address.to_string(),
        contract.path(),
    );
    if let Some(encoded) = encoded_args {
        cmd = cmd.constructor_args(encoded);
    }

    runner
        .run_scan(&config.forge_bin, &cmd.build(), |line| {
            parse::extract_guid(line).map(str::to_string)
        })
        .await
        .with_context(|| format!("verifying {contract}"))?
        .with_context(|| {
            format!("no `{}` line in forge output for {contract}", parse::GUID_MARKER)
        })
}

/// Polls the verification status for one tracking identifier, streaming the
/// tool's output to the operator.
pub async fn verify_check(
    runner: &CommandRunner,
    config: &DeployConfig,
    guid: &str,
) -> Result<()> {
    let args = verify_check_args(config.chain_id, guid, &config.etherscan_key);
    runner
        .run_scan(&config.forge_bin, &args, |_line| None::<()>)
        .await?;
    Ok(())
}

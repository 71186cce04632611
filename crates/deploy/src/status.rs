//! Polling the explorer verification status per tracking identifier.

use crate::config::DeployConfig;
use crate::runner::CommandRunner;
use crate::services::forge;
use crate::verifier::VerificationOutcome;

/// Runs a status check for every collected tracking identifier, streaming
/// the tool's output to the operator.
///
/// Best-effort feedback only: a failed check is logged and the loop moves
/// on. Pass/fail aggregation is the explorer's job, not this tool's.
pub async fn check_all(runner: &CommandRunner, config: &DeployConfig, outcome: &VerificationOutcome) {
    for (contract, guid) in &outcome.guids {
        tracing::info!(%contract, guid, "Verification status for {}...", contract.solidity_name());
        if let Err(err) = forge::verify_check(runner, config, guid).await {
            tracing::error!(%contract, "Status check failed: {err:#}");
        }
    }
}

//! Probing the locally installed compiler for its exact version string.

use anyhow::{Context, Result};

use crate::config::{DeployConfig, FoundryConfig};
use crate::parse;
use crate::runner::CommandRunner;

/// Runs `solc --version` for the configured compiler and returns the
/// `v<version>+commit.<sha>` form the verification tool expects.
///
/// The binary is the one the build used: `~/.svm/<solc>/solc-<solc>` as
/// installed by forge, unless the configuration points at an explicit path.
pub async fn compiler_version(
    runner: &CommandRunner,
    config: &DeployConfig,
    foundry: &FoundryConfig,
) -> Result<String> {
    let binary = match &config.solc_bin {
        Some(path) => path.clone(),
        None => foundry.solc_binary()?,
    };
    let binary = binary
        .to_str()
        .with_context(|| format!("non-UTF-8 solc path {}", binary.display()))?;

    let version_line = runner
        .run_scan(binary, &["--version".to_string()], |line| {
            line.starts_with(parse::VERSION_MARKER).then(|| line.to_string())
        })
        .await
        .context("probing solc version")?
        .with_context(|| format!("no `{}` line in `{binary} --version` output", parse::VERSION_MARKER))?;

    parse::extract_compiler_version(&version_line)
        .with_context(|| format!("malformed solc version line {version_line:?}"))
}

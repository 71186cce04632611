//! ABI encoding of constructor arguments via the cast binary.

use anyhow::{Context, Result, bail};

use crate::config::DeployConfig;
use crate::runner::CommandRunner;

/// Runs `cast abi-encode "constructor(<types>)" <values...>` and returns the
/// encoded bytes printed on stdout, used verbatim as the verification call's
/// `--constructor-args` value.
pub async fn abi_encode(
    runner: &CommandRunner,
    config: &DeployConfig,
    signature: &str,
    values: &[String],
) -> Result<String> {
    let mut args = vec!["abi-encode".to_string(), signature.to_string()];
    args.extend(values.iter().cloned());

    let encoded = runner
        .run_capture(&config.cast_bin, &args)
        .await
        .with_context(|| format!("abi-encoding `{signature}`"))?;

    if encoded.is_empty() {
        bail!("`{} abi-encode` produced no output for `{signature}`", config.cast_bin);
    }

    Ok(encoded)
}

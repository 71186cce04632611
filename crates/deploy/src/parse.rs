//! Scrapers for the textual output of the Foundry tools.
//!
//! The deploy and verification CLIs signal success through free-text marker
//! lines. These functions are the only place that knows their shape, so the
//! orchestrators can be exercised against canned output instead of real
//! binaries.

use anyhow::{Result, bail};

/// Marker line prefix printed by `forge create` on a successful deployment.
pub const DEPLOYED_TO_MARKER: &str = "Deployed to:";
/// Marker line prefix printed by `forge verify-contract` once a submission
/// is accepted.
pub const GUID_MARKER: &str = "GUID:";
/// Marker line prefix printed by `solc --version`.
pub const VERSION_MARKER: &str = "Version:";

const COMMIT_MARKER: &str = "+commit.";

/// Returns the first whitespace-separated token of `line` that starts
/// with `0x`.
pub fn extract_address(line: &str) -> Option<&str> {
    line.split_whitespace().find(|token| token.starts_with("0x"))
}

/// Per-line form of the deployment marker scan: the address token of a line
/// prefixed with `Deployed to:`, `None` for any other line.
pub fn deployed_to(line: &str) -> Option<&str> {
    line.starts_with(DEPLOYED_TO_MARKER)
        .then(|| extract_address(line))
        .flatten()
}

/// Scans `output` line-by-line and returns the address of the first
/// `Deployed to:` line, or `None` if no such line exists.
pub fn extract_deployed_address(output: &str) -> Option<&str> {
    output.lines().find_map(deployed_to)
}

/// Extracts `v<version>+commit.<sha>` from a solc version line such as
/// `Version: 0.8.13+commit.abaa5c0e.Darwin.appleclang`.
///
/// The version token is the last whitespace-separated token of the line; the
/// result stops at the first `.` after the commit sha. A token without a
/// `+commit.` segment is an error, never a truncated version string.
pub fn extract_compiler_version(line: &str) -> Result<String> {
    let token = line.split_whitespace().last().unwrap_or_default();
    let Some(marker) = token.find(COMMIT_MARKER) else {
        bail!("no `{COMMIT_MARKER}` segment in version token {token:?}");
    };

    let sha_start = marker + COMMIT_MARKER.len();
    let end = token[sha_start..]
        .find('.')
        .map_or(token.len(), |dot| sha_start + dot);

    Ok(format!("v{}", &token[..end]))
}

/// Extracts the tracking identifier from a `GUID:` line, stripping the
/// quotes or backticks forge prints around it. The marker may be preceded
/// by whitespace.
pub fn extract_guid(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    if !trimmed.starts_with(GUID_MARKER) {
        return None;
    }

    let token = trimmed.split_whitespace().last()?;
    let guid = token.trim_matches(|c| matches!(c, '"' | '\'' | '`'));
    (!guid.is_empty()).then_some(guid)
}

//! Deployment report: the machine-readable address map plus the operator
//! summary table.

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::Table;

use crate::contracts::AddressBook;
use crate::verifier::VerificationOutcome;

/// Writes the deployed address map as a TOML document under an `[addresses]`
/// table, in deployment order, for CI or later tooling to pick up.
pub fn save_addresses(book: &AddressBook, path: &Path) -> Result<()> {
    let mut addresses = toml::Table::new();
    for (contract, address) in book.iter() {
        addresses.insert(contract.to_string(), toml::Value::String(address.to_string()));
    }

    let mut doc = toml::Table::new();
    doc.insert("addresses".to_string(), toml::Value::Table(addresses));

    let content = toml::to_string_pretty(&doc).context("failed to serialize deployment report")?;
    std::fs::write(path, content)
        .with_context(|| format!("failed to write report to {}", path.display()))?;

    tracing::info!(path = %path.display(), "Deployment report saved");
    Ok(())
}

/// Renders the final per-contract summary. With a verification outcome the
/// table carries a third column naming each contract's submission state.
pub fn summary_table(book: &AddressBook, outcome: Option<&VerificationOutcome>) -> Table {
    let mut table = Table::new();

    match outcome {
        Some(_) => table.set_header(["contract", "address", "verification"]),
        None => table.set_header(["contract", "address"]),
    };

    for (contract, address) in book.iter() {
        let name = contract.to_string();
        let address = address.to_string();
        match outcome {
            Some(outcome) => {
                let status = match outcome.guid(contract) {
                    Some(guid) => format!("submitted ({guid})"),
                    None => "FAILED".to_string(),
                };
                table.add_row([name, address, status]);
            }
            None => {
                table.add_row([name, address]);
            }
        }
    }

    table
}

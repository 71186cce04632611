//! Sequential deployment of the contract suite.

use anyhow::{Result, bail};
use strum::IntoEnumIterator;

use crate::config::DeployConfig;
use crate::contracts::{AddressBook, Contract};
use crate::runner::CommandRunner;
use crate::services::forge;

/// Deploys the eight contracts of the suite in dependency order.
pub struct Deployer<'a> {
    config: &'a DeployConfig,
    runner: &'a CommandRunner,
}

impl<'a> Deployer<'a> {
    pub fn new(config: &'a DeployConfig, runner: &'a CommandRunner) -> Self {
        Self { config, runner }
    }

    /// Deploys every contract, wiring dependency addresses into later
    /// constructor argument lists.
    ///
    /// Deployment order is the declaration order of [`Contract`]. Before
    /// each deployment the declared dependencies are checked against the
    /// book, so an ordering mistake in the contract table fails here instead
    /// of deploying a contract with a missing constructor argument. Any
    /// failed deployment aborts the rest of the sequence for the same
    /// reason.
    pub async fn deploy_all(&self) -> Result<AddressBook> {
        let mut book = AddressBook::default();

        for contract in Contract::iter() {
            for dep in contract.dependencies() {
                if !book.contains(*dep) {
                    bail!("{contract} requires {dep} to be deployed first");
                }
            }

            let args = contract.constructor_args(&book, &self.config.params)?;

            tracing::info!(%contract, "Deploying {}...", contract.solidity_name());
            let address = forge::create(self.runner, self.config, contract, args).await?;
            tracing::info!(%contract, %address, "Deployed");

            book.insert(contract, address)?;
        }

        tracing::info!("All contracts deployed.");
        for (contract, address) in book.iter() {
            tracing::info!("  {contract}: {address}");
        }
        Self::log_manual_steps();

        Ok(book)
    }

    /// Post-deployment wiring that is deliberately left to the operator.
    fn log_manual_steps() {
        tracing::info!("Manual follow-up steps:");
        tracing::info!("  1. Transfer ownership of the ReceiptToken to the RentalExchange");
        tracing::info!("  2. Add WETH to the CurrencyManager");
        tracing::info!("  3. Add the fixed-price strategy to the ExecutionManager");
        tracing::info!(
            "  4. Set the TransferSelectorNFT on the exchange via `updateTransferSelectorNFT`"
        );
    }
}

//! Explorer verification of the deployed suite.

use alloy_core::primitives::Address;
use anyhow::Result;

use crate::config::{DeployConfig, FoundryConfig};
use crate::contracts::{AddressBook, Contract};
use crate::runner::CommandRunner;
use crate::services::{cast, forge, solc};

/// Outcome of the verification phase.
///
/// Per-contract failures are collected rather than aborting the phase: the
/// deployed contracts stay on-chain and usable either way, and the remaining
/// submissions are still worth making.
#[derive(Debug, Default)]
pub struct VerificationOutcome {
    /// Tracking identifiers for the contracts whose submission was accepted.
    pub guids: Vec<(Contract, String)>,
    /// Contracts whose submission failed, with the failure rendered.
    pub failures: Vec<(Contract, String)>,
}

impl VerificationOutcome {
    pub fn guid(&self, contract: Contract) -> Option<&str> {
        self.guids
            .iter()
            .find(|(entry, _)| *entry == contract)
            .map(|(_, guid)| guid.as_str())
    }

    pub fn all_verified(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Submits each deployed contract for block-explorer verification.
pub struct Verifier<'a> {
    config: &'a DeployConfig,
    foundry: &'a FoundryConfig,
    runner: &'a CommandRunner,
}

impl<'a> Verifier<'a> {
    pub fn new(
        config: &'a DeployConfig,
        foundry: &'a FoundryConfig,
        runner: &'a CommandRunner,
    ) -> Self {
        Self {
            config,
            foundry,
            runner,
        }
    }

    /// Verifies every contract in the book.
    ///
    /// The compiler version is probed once up front; a failure there aborts
    /// the phase since no submission can be made without it. Individual
    /// submission failures are recorded in the outcome and logged.
    pub async fn verify_all(&self, book: &AddressBook) -> Result<VerificationOutcome> {
        let compiler_version = solc::compiler_version(self.runner, self.config, self.foundry).await?;

        tracing::info!(
            chain_id = self.config.chain_id,
            optimizer_runs = self.foundry.optimizer_runs,
            compiler_version,
            "Starting verification"
        );

        let mut outcome = VerificationOutcome::default();
        for (contract, address) in book.iter() {
            tracing::info!(%contract, "Verifying {}...", contract.solidity_name());

            match self.verify_one(book, contract, address, &compiler_version).await {
                Ok(guid) => {
                    tracing::info!(%contract, guid, "Verification submitted");
                    outcome.guids.push((contract, guid));
                }
                Err(err) => {
                    tracing::error!(%contract, "Verification failed: {err:#}");
                    outcome.failures.push((contract, format!("{err:#}")));
                }
            }
        }

        Ok(outcome)
    }

    async fn verify_one(
        &self,
        book: &AddressBook,
        contract: Contract,
        address: Address,
        compiler_version: &str,
    ) -> Result<String> {
        // Constructor arguments are re-derived from the book and encoded with
        // the contract-specific type signature, exactly as they were passed
        // at deployment.
        let encoded = match contract.constructor_signature() {
            Some(signature) => {
                let values = contract.constructor_args(book, &self.config.params)?;
                Some(cast::abi_encode(self.runner, self.config, signature, &values).await?)
            }
            None => None,
        };

        forge::verify_contract(
            self.runner,
            self.config,
            self.foundry.optimizer_runs,
            compiler_version,
            address,
            contract,
            encoded,
        )
        .await
    }
}

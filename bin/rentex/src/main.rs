//! rentex is a CLI tool that deploys the rental-exchange contract suite and
//! verifies it on the block explorer, driving forge, cast and solc as
//! external processes.

mod cli;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use cli::Cli;
use rentex_deploy::{
    CommandRunner, DeployConfig, Deployer, FoundryConfig, Verifier, report, status,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize the logger.
    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity)
        .init();

    // Resolve the full configuration before the first external call, so a
    // configuration mistake aborts the run without touching the chain.
    let foundry = FoundryConfig::load(&cli.foundry_config)?;
    let config = DeployConfig {
        chain_id: cli.network.chain_id(),
        rpc_url: cli.network.rpc_url(&cli.alchemy_key),
        network: cli.network,
        private_key: cli.private_key,
        etherscan_key: cli.etherscan_key,
        forge_bin: cli.forge_bin,
        cast_bin: cli.cast_bin,
        solc_bin: cli.solc_bin,
        params: cli.params.into(),
        command_timeout: Duration::from_secs(cli.timeout_secs),
    };

    tracing::info!(
        network = %config.network,
        chain_id = config.chain_id,
        solc = foundry.solc,
        optimizer_runs = foundry.optimizer_runs,
        "Starting deployment..."
    );

    let runner = CommandRunner::new(config.command_timeout);

    let book = Deployer::new(&config, &runner).deploy_all().await?;
    report::save_addresses(&book, &cli.report)?;

    if cli.skip_verify {
        println!("{}", report::summary_table(&book, None));
        return Ok(());
    }

    let outcome = Verifier::new(&config, &foundry, &runner)
        .verify_all(&book)
        .await?;

    status::check_all(&runner, &config, &outcome).await;

    println!("{}", report::summary_table(&book, Some(&outcome)));

    if !outcome.all_verified() {
        let failed: Vec<String> = outcome
            .failures
            .iter()
            .map(|(contract, _)| contract.to_string())
            .collect();
        anyhow::bail!("verification failed for: {}", failed.join(", "));
    }

    Ok(())
}

//! End-to-end pipeline tests against stub tool binaries.
//!
//! The stubs are small shell scripts replaying the output shapes of the real
//! tools, so the full deploy/verify flow runs without a network connection or
//! a Foundry installation. Each invocation is appended to a log file the
//! assertions read back.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use strum::IntoEnumIterator;
use tempdir::TempDir;

use rentex_deploy::{
    AddressBook, CommandRunner, Contract, DeployConfig, Deployer, FoundryConfig, Network,
    ProtocolParams, Verifier, report, status,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn write_stub(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

/// A forge stub handling `create`, `verify-contract` and `verify-check`.
///
/// Deployed addresses are keyed off the contract path; verification echoes a
/// GUID derived from the submitted address. `fail_on` injects a failure for
/// any invocation whose arguments contain the given needle.
fn forge_stub(dir: &Path, fail_on: &str) -> PathBuf {
    let log = dir.join("forge.log");
    let body = format!(
        r#"log="{log}"
echo "$@" >> "$log"
case "$*" in
  *{fail_on}*) echo "something went wrong"; exit 1 ;;
esac
case "$1" in
  create)
    case "$*" in
      *StrategyStandardSaleForFixedPrice*) addr=0x0000000000000000000000000000000000000011 ;;
      *CurrencyManager*) addr=0x0000000000000000000000000000000000000012 ;;
      *ExecutionManager*) addr=0x0000000000000000000000000000000000000013 ;;
      *ReceiptToken*) addr=0x0000000000000000000000000000000000000014 ;;
      *RentalExchange*) addr=0x0000000000000000000000000000000000000015 ;;
      *TransferManagerERC721*) addr=0x0000000000000000000000000000000000000016 ;;
      *TransferManagerERC1155*) addr=0x0000000000000000000000000000000000000017 ;;
      *TransferSelectorNFT*) addr=0x0000000000000000000000000000000000000018 ;;
    esac
    echo "Compiler run successful"
    echo "Deployer: 0x00a329c0648769A73afAc7F9381E08FB43dBEA72"
    echo "Deployed to: $addr"
    echo "Transaction hash: 0xabc"
    ;;
  verify-contract)
    echo "Start verifying contract..."
    echo "  GUID: \`guid-$8\`"
    ;;
  verify-check)
    echo "Contract verification status: Pass - Verified"
    ;;
esac"#,
        log = log.display(),
    );
    write_stub(dir, "forge", &body)
}

fn cast_stub(dir: &Path) -> PathBuf {
    let log = dir.join("cast.log");
    let body = format!(
        r#"echo "$@" >> "{log}"
echo "0x0000000000000000000000000000000000000000000000000000000000000190""#,
        log = log.display(),
    );
    write_stub(dir, "cast", &body)
}

fn solc_stub(dir: &Path) -> PathBuf {
    let body = r#"echo "solc, the solidity compiler commandline interface"
echo "Version: 0.8.13+commit.abaa5c0e.Linux.g++""#;
    write_stub(dir, "solc", body)
}

fn config(dir: &Path) -> DeployConfig {
    DeployConfig {
        network: Network::Goerli,
        chain_id: Network::Goerli.chain_id(),
        rpc_url: Network::Goerli.rpc_url("test-key"),
        private_key: "0xdeadbeef".to_string(),
        etherscan_key: "etherscan-key".to_string(),
        forge_bin: dir.join("forge").display().to_string(),
        cast_bin: dir.join("cast").display().to_string(),
        solc_bin: Some(dir.join("solc")),
        params: ProtocolParams {
            proxy_factory: rentex_deploy::contracts::DEFAULT_PROXY_FACTORY.parse().unwrap(),
            weth: rentex_deploy::contracts::DEFAULT_WETH.parse().unwrap(),
            protocol_fee_recipient: rentex_deploy::contracts::DEFAULT_PROTOCOL_FEE_RECIPIENT
                .parse()
                .unwrap(),
            strategy_fee_bps: rentex_deploy::contracts::DEFAULT_STRATEGY_FEE_BPS,
        },
        command_timeout: Duration::from_secs(30),
    }
}

fn foundry() -> FoundryConfig {
    FoundryConfig {
        solc: "0.8.13".to_string(),
        optimizer_runs: 200,
    }
}

fn runner() -> CommandRunner {
    CommandRunner::new(Duration::from_secs(30))
}

fn log_lines(dir: &Path, name: &str) -> Vec<String> {
    fs::read_to_string(dir.join(name))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn deploys_all_eight_contracts_in_order() {
    init_tracing();
    let dir = TempDir::new("rentex-deploy").unwrap();
    forge_stub(dir.path(), "never-matches");
    let config = config(dir.path());

    let book = Deployer::new(&config, &runner()).deploy_all().await.unwrap();

    assert_eq!(book.len(), 8);
    assert_eq!(
        book.get(Contract::Exchange).unwrap().to_string().to_lowercase(),
        "0x0000000000000000000000000000000000000015"
    );
    assert_eq!(
        book.get(Contract::TransferSelector).unwrap().to_string().to_lowercase(),
        "0x0000000000000000000000000000000000000018"
    );

    let lines = log_lines(dir.path(), "forge.log");
    assert_eq!(lines.len(), 8);
    for (line, contract) in lines.iter().zip(Contract::iter()) {
        assert!(line.starts_with("create "), "{line}");
        assert!(line.contains(contract.path()), "{line} should target {contract}");
        assert!(line.contains(&config.rpc_url), "{line}");
    }

    // The strategy takes its fee literally.
    assert!(lines[0].ends_with("--constructor-args 400"), "{}", lines[0]);

    // The exchange constructor receives the earlier addresses plus the
    // protocol parameters, in signature order.
    let expected = format!(
        "--constructor-args {} {} {} {} {} {}",
        "0x0000000000000000000000000000000000000012",
        "0x0000000000000000000000000000000000000013",
        config.params.proxy_factory,
        "0x0000000000000000000000000000000000000014",
        config.params.weth,
        config.params.protocol_fee_recipient,
    );
    assert!(
        lines[4].to_lowercase().ends_with(&expected.to_lowercase()),
        "{}",
        lines[4]
    );

    // Both transfer managers point back at the exchange.
    for line in &lines[5..7] {
        assert!(
            line.to_lowercase()
                .ends_with("--constructor-args 0x0000000000000000000000000000000000000015"),
            "{line}"
        );
    }
}

#[tokio::test]
async fn a_missing_marker_aborts_the_remaining_deployments() {
    init_tracing();
    let dir = TempDir::new("rentex-deploy").unwrap();
    // ExecutionManager exits non-zero; nothing after it may be attempted.
    forge_stub(dir.path(), "ExecutionManager");
    let config = config(dir.path());

    let err = Deployer::new(&config, &runner()).deploy_all().await.unwrap_err();
    assert!(format!("{err:#}").contains("executionManager"), "{err:#}");

    let lines = log_lines(dir.path(), "forge.log");
    assert_eq!(lines.len(), 3, "no deployment may run after the failure");
    assert!(!lines.iter().any(|line| line.contains("ReceiptToken")));
}

#[tokio::test]
async fn verification_collects_partial_failures() {
    init_tracing();
    let dir = TempDir::new("rentex-verify").unwrap();
    forge_stub(dir.path(), "ReceiptToken.sol");
    cast_stub(dir.path());
    solc_stub(dir.path());
    let config = config(dir.path());
    let foundry = foundry();

    let mut book = AddressBook::default();
    for (index, contract) in Contract::iter().enumerate() {
        let address = format!("0x00000000000000000000000000000000000000{:02x}", 0x11 + index);
        book.insert(contract, address.parse().unwrap()).unwrap();
    }

    let outcome = Verifier::new(&config, &foundry, &runner())
        .verify_all(&book)
        .await
        .unwrap();

    assert_eq!(outcome.guids.len(), 7);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].0, Contract::ReceiptToken);
    assert!(!outcome.all_verified());

    let expected_guid = format!("guid-{}", book.get(Contract::Exchange).unwrap());
    assert_eq!(outcome.guid(Contract::Exchange), Some(expected_guid.as_str()));

    // Five contracts have constructor arguments to encode; the no-arg
    // ReceiptToken would have been the sixth call only if it took any.
    let cast_lines = log_lines(dir.path(), "cast.log");
    assert_eq!(cast_lines.len(), 5);
    assert_eq!(cast_lines[0], "abi-encode constructor(uint256) 400");
    assert!(
        cast_lines
            .iter()
            .any(|line| line.starts_with(
                "abi-encode constructor(address,address,address,address,address,address) "
            )),
        "{cast_lines:?}"
    );

    // Every verify call carries the probed compiler version and the chain id.
    let forge_lines = log_lines(dir.path(), "forge.log");
    let verify_lines: Vec<_> = forge_lines
        .iter()
        .filter(|line| line.starts_with("verify-contract "))
        .collect();
    assert_eq!(verify_lines.len(), 8);
    for line in &verify_lines {
        assert!(line.contains("--chain-id 5"), "{line}");
        assert!(line.contains("--num-of-optimizations 200"), "{line}");
        assert!(line.contains("--compiler-version v0.8.13+commit.abaa5c0e"), "{line}");
    }

    // Status checks cover exactly the collected GUIDs.
    status::check_all(&runner(), &config, &outcome).await;
    let check_lines: Vec<_> = log_lines(dir.path(), "forge.log")
        .into_iter()
        .filter(|line| line.starts_with("verify-check "))
        .collect();
    assert_eq!(check_lines.len(), 7);
    for line in &check_lines {
        assert!(line.contains("--chain-id 5"), "{line}");
        assert!(line.ends_with("etherscan-key"), "{line}");
    }
}

#[tokio::test]
async fn the_report_mirrors_the_address_book() {
    init_tracing();
    let dir = TempDir::new("rentex-report").unwrap();
    forge_stub(dir.path(), "never-matches");
    let config = config(dir.path());

    let book = Deployer::new(&config, &runner()).deploy_all().await.unwrap();
    let path = dir.path().join("deployments.toml");
    report::save_addresses(&book, &path).unwrap();

    let parsed: toml::Table = toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let addresses = parsed["addresses"].as_table().unwrap();
    assert_eq!(addresses.len(), 8);
    for contract in Contract::iter() {
        let recorded = addresses[&contract.to_string()].as_str().unwrap();
        assert_eq!(recorded, book.get(contract).unwrap().to_string());
    }
}

//! rentex-deploy - Deployment and verification pipeline for the
//! rental-exchange contract suite.
//!
//! This crate drives the Foundry toolchain (`forge`, `cast`, `solc`) as
//! external processes: deploy the eight contracts in dependency order,
//! submit each for block-explorer verification, then poll the verification
//! status. Everything that parses tool output or builds argument vectors is
//! separate from process spawning so it can be tested against canned data.

mod deployer;
pub use deployer::Deployer;

mod verifier;
pub use verifier::{VerificationOutcome, Verifier};

pub mod config;
pub mod contracts;
pub mod parse;
pub mod report;
pub mod runner;
pub mod services;
pub mod status;

pub use config::{DeployConfig, FoundryConfig, Network};
pub use contracts::{AddressBook, Contract, ProtocolParams};
pub use runner::CommandRunner;

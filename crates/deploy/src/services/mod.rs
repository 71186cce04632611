//! Invocation layers for the external tools the pipeline drives.
//!
//! Each module owns one binary's argument shapes and output markers: `forge`
//! for deployment, verification and status checks, `cast` for ABI encoding,
//! `solc` for the compiler-version probe.

pub mod cast;
pub mod forge;
pub mod solc;

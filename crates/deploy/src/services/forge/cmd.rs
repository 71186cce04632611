//! Argument builders for the forge subcommands the pipeline drives.

/// Builder for `forge create` arguments.
#[derive(Debug, Clone)]
pub struct ForgeCreateCmd {
    rpc_url: String,
    private_key: String,
    contract_path: String,
    constructor_args: Vec<String>,
}

impl ForgeCreateCmd {
    pub fn new(
        rpc_url: impl Into<String>,
        private_key: impl Into<String>,
        contract_path: impl Into<String>,
    ) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            private_key: private_key.into(),
            contract_path: contract_path.into(),
            constructor_args: Vec::new(),
        }
    }

    /// Set the positional constructor arguments. An empty list leaves the
    /// `--constructor-args` flag out entirely.
    pub fn constructor_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        self.constructor_args = args.into_iter().collect();
        self
    }

    /// Build the argument vector.
    pub fn build(self) -> Vec<String> {
        let mut cmd = vec![
            "create".to_string(),
            "--rpc-url".to_string(),
            self.rpc_url,
            "--private-key".to_string(),
            self.private_key,
            self.contract_path,
        ];

        if !self.constructor_args.is_empty() {
            cmd.push("--constructor-args".to_string());
            cmd.extend(self.constructor_args);
        }

        cmd
    }
}

/// Builder for `forge verify-contract` arguments.
#[derive(Debug, Clone)]
pub struct ForgeVerifyCmd {
    chain_id: u64,
    optimizer_runs: u64,
    compiler_version: String,
    address: String,
    contract_path: String,
    constructor_args: Option<String>,
}

impl ForgeVerifyCmd {
    pub fn new(
        chain_id: u64,
        optimizer_runs: u64,
        compiler_version: impl Into<String>,
        address: impl Into<String>,
        contract_path: impl Into<String>,
    ) -> Self {
        Self {
            chain_id,
            optimizer_runs,
            compiler_version: compiler_version.into(),
            address: address.into(),
            contract_path: contract_path.into(),
            constructor_args: None,
        }
    }

    /// Set the ABI-encoded constructor arguments.
    pub fn constructor_args(mut self, encoded: impl Into<String>) -> Self {
        self.constructor_args = Some(encoded.into());
        self
    }

    /// Build the argument vector.
    pub fn build(self) -> Vec<String> {
        let mut cmd = vec![
            "verify-contract".to_string(),
            "--chain-id".to_string(),
            self.chain_id.to_string(),
            "--num-of-optimizations".to_string(),
            self.optimizer_runs.to_string(),
            "--compiler-version".to_string(),
            self.compiler_version,
            self.address,
            self.contract_path,
        ];

        if let Some(encoded) = self.constructor_args {
            cmd.push("--constructor-args".to_string());
            cmd.push(encoded);
        }

        cmd
    }
}

/// Arguments for `forge verify-check`.
pub fn verify_check_args(chain_id: u64, guid: &str, etherscan_key: &str) -> Vec<String> {
    vec![
        "verify-check".to_string(),
        "--chain-id".to_string(),
        chain_id.to_string(),
        guid.to_string(),
        etherscan_key.to_string(),
    ]
}

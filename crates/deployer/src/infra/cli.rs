use {
    std::{path::PathBuf, time::Duration},
    url::Url,
};

#[derive(Debug, clap::Parser)]
#[clap(about = "Deploys a compiled contract and reports its address")]
pub struct Args {
    /// The log filter.
    #[clap(long, env, default_value = "warn,deployer=debug,ethrpc=debug")]
    pub log: String,

    /// At which log level logs should be printed to stderr instead of stdout.
    #[clap(long, env)]
    pub stderr_threshold: Option<tracing::Level>,

    /// Whether to use JSON format for the logs.
    #[clap(long, env, default_value = "false")]
    pub use_json_logs: bool,

    /// The node RPC API endpoint. Selects the network the contract is
    /// deployed to.
    #[clap(long, env, default_value = "http://localhost:8545")]
    pub node_url: Url,

    /// Timeout of a single request to the node.
    #[clap(long, env, default_value = "30s", value_parser = humantime::parse_duration)]
    pub rpc_timeout: Duration,

    /// BIP-39 mnemonic of a local HD wallet that signs the deployment. If not
    /// specified the accounts managed by the node are used and the node signs.
    #[clap(long, env)]
    pub mnemonic: Option<String>,

    /// How many accounts to derive from the mnemonic.
    #[clap(long, env, default_value = "1")]
    pub mnemonic_accounts: u32,

    /// Path to the deployment configuration file. This file should be in TOML
    /// format. For an example see `crates/deployer/example.toml`.
    #[clap(long, env)]
    pub config: PathBuf,
}

/// Arg types have custom `Display` impls instead of relying on `Debug` to avoid
/// accidentally printing secrets. Secret values are printed as "SECRET".
impl std::fmt::Display for Args {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "log: {}", self.log)?;
        writeln!(f, "stderr_threshold: {:?}", self.stderr_threshold)?;
        writeln!(f, "use_json_logs: {}", self.use_json_logs)?;
        // Node URLs regularly embed API keys.
        writeln!(f, "node_url: SECRET")?;
        writeln!(f, "rpc_timeout: {:?}", self.rpc_timeout)?;
        writeln!(
            f,
            "mnemonic: {:?}",
            self.mnemonic.as_ref().map(|_| "SECRET")
        )?;
        writeln!(f, "mnemonic_accounts: {}", self.mnemonic_accounts)?;
        writeln!(f, "config: {:?}", self.config)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, clap::Parser};

    const PHRASE: &str = "test test test test test test test test test test test junk";

    #[test]
    fn parses_arguments() {
        let args = Args::parse_from([
            "deployer",
            "--node-url",
            "https://rinkeby.infura.io/v3/secret-key",
            "--mnemonic",
            PHRASE,
            "--mnemonic-accounts",
            "2",
            "--config",
            "inbox.toml",
        ]);

        assert_eq!(args.node_url.host_str(), Some("rinkeby.infura.io"));
        assert_eq!(args.mnemonic.as_deref(), Some(PHRASE));
        assert_eq!(args.mnemonic_accounts, 2);
        assert_eq!(args.rpc_timeout, Duration::from_secs(30));
        assert_eq!(args.config, PathBuf::from("inbox.toml"));
        assert!(!args.use_json_logs);
    }

    #[test]
    fn display_hides_secrets() {
        let args = Args::parse_from([
            "deployer",
            "--node-url",
            "https://rinkeby.infura.io/v3/secret-key",
            "--mnemonic",
            PHRASE,
            "--config",
            "inbox.toml",
        ]);
        let display = args.to_string();

        assert!(!display.contains("secret-key"));
        assert!(!display.contains("junk"));
        assert!(display.contains("mnemonic: Some(\"SECRET\")"));
    }
}

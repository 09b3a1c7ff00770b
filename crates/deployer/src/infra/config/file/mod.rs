pub use load::load;
use {
    alloy::primitives::Address,
    serde::Deserialize,
    std::{path::PathBuf, time::Duration},
};

mod load;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct Config {
    /// Path to the compiled contract artifact, relative to the directory of
    /// this file unless absolute.
    artifact: PathBuf,

    /// Constructor arguments in the order the constructor declares them.
    #[serde(default)]
    constructor_arguments: Vec<String>,

    /// Gas limit of the deployment transaction.
    #[serde(default = "default_gas_limit")]
    gas_limit: u64,

    /// Abort before submitting if the node is connected to a different chain.
    chain_id: Option<u64>,

    /// Which account sends the deployment.
    #[serde(default)]
    account: Account,

    #[serde(default)]
    confirmation: ConfirmationConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum Account {
    /// The first account the signer reports.
    #[default]
    First,
    /// The account at this position in the signer's list.
    Index(usize),
    /// The account with this address.
    Address(Address),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ConfirmationConfig {
    #[serde(default = "default_confirmations")]
    confirmations: u64,

    /// How long to wait for the confirmations, `"none"` waits forever.
    #[serde(default = "default_confirmation_timeout")]
    timeout: Timeout,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            confirmations: default_confirmations(),
            timeout: default_confirmation_timeout(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Timeout {
    Disabled(Disabled),
    After(#[serde(with = "humantime_serde")] Duration),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Disabled {
    None,
}

impl From<Timeout> for Option<Duration> {
    fn from(value: Timeout) -> Self {
        match value {
            Timeout::Disabled(Disabled::None) => None,
            Timeout::After(duration) => Some(duration),
        }
    }
}

fn default_gas_limit() -> u64 {
    1_000_000
}

fn default_confirmations() -> u64 {
    1
}

fn default_confirmation_timeout() -> Timeout {
    Timeout::After(Duration::from_secs(750))
}

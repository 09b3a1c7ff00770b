use {
    crate::domain::{account, eth},
    std::{path::PathBuf, time::Duration},
};

pub mod file;

/// Configuration of a single deployment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the compiled contract artifact.
    pub artifact: PathBuf,
    pub constructor_arguments: Vec<String>,
    pub gas_limit: eth::Gas,
    pub chain_id: Option<u64>,
    pub account: AccountSelection,
    pub confirmation: Confirmation,
}

/// Which of the available accounts sends the deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccountSelection {
    #[default]
    First,
    Index(usize),
    Address(eth::Address),
}

impl AccountSelection {
    pub fn strategy(&self) -> Box<dyn account::Selection> {
        match *self {
            Self::First => Box::new(account::First),
            Self::Index(index) => Box::new(account::Index(index)),
            Self::Address(address) => Box::new(account::ByAddress(address)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    /// Number of blocks, including the one with the transaction, that need to
    /// be mined before the deployment counts as confirmed.
    pub confirmations: u64,
    /// Give up waiting after this long. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Default for Confirmation {
    fn default() -> Self {
        Self {
            confirmations: 1,
            timeout: Some(Duration::from_secs(750)),
        }
    }
}

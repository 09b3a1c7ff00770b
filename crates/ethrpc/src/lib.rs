pub mod alloy;

use {::alloy::providers::DynProvider, std::time::Duration};

pub type AlloyProvider = DynProvider;

/// Configuration of the connection to the node.
#[derive(Debug, Clone)]
pub struct Config {
    /// Label attached to every request sent through the provider. Shows up
    /// in the request logs as `component`.
    pub label: String,

    /// Timeout of a single HTTP request to the node.
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            label: "main".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

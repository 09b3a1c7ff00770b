//! Trait definitions for external system boundaries.
//!
//! These traits abstract the signing capability and the network so that the
//! deployment flow can be unit tested with mocks.

use {crate::domain::eth, std::time::Duration};

/// Errors reported by the boundaries. The variants separate the failures that
/// leave a submitted transaction in a different state.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The node could not be reached or its response was lost. Whether the
    /// request had an effect is unknown.
    #[error("transport error: {0:#}")]
    Transport(#[source] anyhow::Error),
    /// The node processed the request and refused it.
    #[error("node error: {0}")]
    Node(String),
    /// The signing capability could not sign for the requested account.
    #[error("signer error: {0}")]
    Signer(String),
    /// The transaction was not included before the boundary gave up waiting.
    #[error("not included within {}", humantime::format_duration(*.0))]
    Timeout(Duration),
}

/// The capability that holds the keys of the deploying accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Signer: Send + Sync {
    /// Lists the accounts this capability can sign for, in a stable order.
    async fn accounts(&self) -> Result<Vec<eth::Address>, Error>;
}

/// The network the contract gets deployed to.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Chain: Send + Sync {
    /// EIP-155 chain ID of the connected network.
    async fn chain_id(&self) -> Result<u64, Error>;

    /// Signs and sends the transaction on behalf of `tx.from`.
    ///
    /// Submitting is not idempotent: a second call with the same transaction
    /// either deploys a second contract or fails on a nonce conflict, so
    /// implementations never retry.
    async fn submit(&self, tx: eth::Tx) -> Result<eth::TxHash, Error>;

    /// Waits until the transaction is included and returns its receipt.
    async fn confirm(&self, tx: eth::TxHash) -> Result<eth::Receipt, Error>;
}

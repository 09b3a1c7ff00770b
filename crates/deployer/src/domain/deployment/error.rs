use {
    crate::{
        boundary,
        domain::{account, artifact, eth},
    },
    std::{fmt, time::Duration},
};

/// The step of a deployment that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Chain check, account listing and selection.
    Resolution,
    /// Loading the artifact and constructing the request.
    Build,
    /// Sending the transaction.
    Submit,
    /// Waiting for the transaction to be included.
    Confirm,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Resolution => "resolution",
            Self::Build => "build",
            Self::Submit => "submit",
            Self::Confirm => "confirm",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Account(#[from] account::Error),
    #[error("connected to chain {actual} but chain {expected} is configured")]
    ChainMismatch { expected: u64, actual: u64 },
    #[error("invalid artifact: {0}")]
    InvalidArtifact(#[from] artifact::Error),
    #[error("invalid constructor arguments: {0}")]
    InvalidArguments(String),
    #[error("gas limit must be greater than zero")]
    InvalidGasLimit,
    #[error("signing failed: {0}")]
    SigningFailed(String),
    #[error("transport error: {0:#}")]
    Transport(anyhow::Error),
    #[error("deployment rejected: {0}")]
    Rejected(Rejection),
}

impl Error {
    /// Node errors on read requests (accounts, chain id, receipts) are not
    /// rejections of the deployment, the node just could not serve the
    /// request.
    pub(super) fn lookup(err: boundary::Error) -> Self {
        match err {
            boundary::Error::Node(message) => {
                Self::Transport(anyhow::anyhow!("node error: {message}"))
            }
            err => err.into(),
        }
    }
}

impl From<boundary::Error> for Error {
    fn from(err: boundary::Error) -> Self {
        match err {
            boundary::Error::Transport(err) => Self::Transport(err),
            boundary::Error::Node(message) => Self::Rejected(Rejection::Node(message)),
            boundary::Error::Signer(message) => Self::SigningFailed(message),
            boundary::Error::Timeout(timeout) => Self::Rejected(Rejection::NotIncluded(timeout)),
        }
    }
}

/// Why the network did not deploy the contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("the node refused the transaction: {0}")]
    Node(String),
    #[error("the transaction reverted")]
    Reverted,
    #[error("the transaction ran out of gas after using {0}")]
    OutOfGas(eth::Gas),
    #[error("the receipt does not contain a contract address")]
    NoContractCreated,
    #[error("the transaction was not included within {}", humantime::format_duration(*.0))]
    NotIncluded(Duration),
}

/// A failed deployment. Records where it failed and, once a transaction was
/// sent, its hash, since the transaction exists independently of this
/// process.
#[derive(Debug, thiserror::Error)]
#[error("{phase} failed: {error}")]
pub struct Failure {
    pub phase: Phase,
    pub error: Error,
    /// The account the deployment was sent from, once it was resolved.
    pub from: Option<account::Account>,
    pub tx: Option<eth::TxHash>,
}

/// What is known about the deployment transaction after a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    /// Nothing was sent to the network.
    NotSubmitted,
    /// The transaction may or may not have been sent or may still be
    /// included later. The hash is absent if the submission response got
    /// lost.
    Unknown(Option<eth::TxHash>),
    /// The transaction was included but did not deploy the contract.
    Failed(eth::TxHash),
}

impl Failure {
    pub fn new(phase: Phase, error: impl Into<Error>) -> Self {
        Self {
            phase,
            error: error.into(),
            from: None,
            tx: None,
        }
    }

    pub fn with_from(mut self, from: account::Account) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_tx(mut self, tx: eth::TxHash) -> Self {
        self.tx = Some(tx);
        self
    }

    pub fn fate(&self) -> Fate {
        // Only a mined receipt proves the transaction failed.
        let mined = matches!(
            self.error,
            Error::Rejected(
                Rejection::Reverted | Rejection::OutOfGas(_) | Rejection::NoContractCreated
            )
        );
        let lost = matches!(
            self.error,
            Error::Transport(_) | Error::Rejected(Rejection::NotIncluded(_))
        );
        match self.tx {
            Some(tx) if mined => Fate::Failed(tx),
            Some(tx) => Fate::Unknown(Some(tx)),
            None if lost && self.phase == Phase::Submit => Fate::Unknown(None),
            None => Fate::NotSubmitted,
        }
    }
}

impl fmt::Display for Fate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSubmitted => write!(f, "no transaction was submitted"),
            Self::Unknown(Some(tx)) => write!(
                f,
                "transaction {tx} was submitted and may still be included, check its status before deploying again"
            ),
            Self::Unknown(None) => write!(
                f,
                "the transaction may have been submitted, check the account's transactions before deploying again"
            ),
            Self::Failed(tx) => write!(f, "transaction {tx} was included but failed"),
        }
    }
}

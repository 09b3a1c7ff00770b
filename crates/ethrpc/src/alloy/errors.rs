use alloy::transports::{RpcError, TransportError};

/// Coarse classification of a failed RPC request. It tells apart the cases
/// callers have to react to differently when a request may have had side
/// effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The node received the request and answered with a JSON-RPC error
    /// object, e.g. `insufficient funds` or `nonce too low`.
    Node(String),
    /// The request never left the process, e.g. because no signer for the
    /// sender was available.
    Local(String),
    /// Anything else: connection failures, HTTP errors, timeouts and
    /// malformed responses. Whether the node processed the request is
    /// unknown.
    Transport,
}

pub trait TransportErrorExt {
    /// Classifies the error, see [`Classification`].
    fn classify(&self) -> Classification;
}

impl TransportErrorExt for TransportError {
    fn classify(&self) -> Classification {
        match self {
            RpcError::ErrorResp(err) => {
                tracing::debug!(?err, "node rpc error");
                Classification::Node(err.message.to_string())
            }
            RpcError::LocalUsageError(err) => Classification::Local(err.to_string()),
            _ => Classification::Transport,
        }
    }
}

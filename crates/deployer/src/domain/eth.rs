pub use alloy::primitives::{Address, Bytes, TxHash};

/// Gas amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Gas(pub u64);

impl From<u64> for Gas {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Gas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A contract creation transaction. It has no recipient: the node creates a
/// new contract running `input` as its init code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tx {
    pub from: Address,
    /// Contract bytecode followed by the ABI encoded constructor arguments.
    pub input: Bytes,
    pub gas_limit: Gas,
}

/// Confirmation record of an included transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
    /// Whether execution succeeded (EIP-658 status).
    pub success: bool,
    pub gas_used: Gas,
    /// Address of the created contract, only present for successful contract
    /// creations.
    pub contract_address: Option<Address>,
}

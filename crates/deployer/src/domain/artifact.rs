//! Compiled contract artifacts.
//!
//! The artifact is kept in the form the compiler produced it. It is only
//! turned into a structured ABI and raw bytecode when a deployment request is
//! built.

use {
    crate::domain::eth,
    alloy::json_abi::JsonAbi,
    serde::Deserialize,
};

/// A compiled contract: its interface description and its creation bytecode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// The ABI as JSON, an ordered list of function, event and constructor
    /// descriptors.
    pub interface: serde_json::Value,
    /// Hex encoded creation bytecode, with or without `0x` prefix.
    pub bytecode: String,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed artifact: {0}")]
    Json(#[from] serde_json::Error),
    #[error("interface is not a valid ABI: {0}")]
    Interface(String),
    #[error("bytecode {0}")]
    Bytecode(String),
}

impl Artifact {
    pub fn new(interface: serde_json::Value, bytecode: impl Into<String>) -> Self {
        Self {
            interface,
            bytecode: bytecode.into(),
        }
    }

    /// Parses an artifact as written by the common compilers:
    ///
    /// - `{"interface": "<ABI JSON text>", "bytecode": "0x.."}` (solc-js)
    /// - `{"abi": [..], "bytecode": "0x.."}` (Truffle, Hardhat)
    /// - `{"abi": [..], "bytecode": {"object": "0x.."}}` (Foundry)
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let raw: dto::Artifact = serde_json::from_str(json)?;
        let interface = match raw.interface {
            dto::Interface::Text(text) => serde_json::from_str(&text)?,
            dto::Interface::Structured(value) => value,
        };
        let bytecode = match raw.bytecode {
            dto::Bytecode::Hex(hex) => hex,
            dto::Bytecode::Object { object } => object,
        };
        Ok(Self {
            interface,
            bytecode,
        })
    }

    /// The structured interface description.
    pub fn abi(&self) -> Result<JsonAbi, Error> {
        serde_json::from_value(self.interface.clone())
            .map_err(|err| Error::Interface(err.to_string()))
    }

    /// The decoded creation bytecode.
    pub fn code(&self) -> Result<eth::Bytes, Error> {
        let code = alloy::hex::decode(self.bytecode.trim()).map_err(|err| {
            if self.bytecode.contains("__") {
                Error::Bytecode(format!("has unlinked library placeholders: {err}"))
            } else {
                Error::Bytecode(format!("is not valid hex: {err}"))
            }
        })?;
        if code.is_empty() {
            return Err(Error::Bytecode("is empty".to_string()));
        }
        Ok(code.into())
    }
}

mod dto {
    use super::Deserialize;

    #[derive(Deserialize)]
    pub struct Artifact {
        #[serde(alias = "abi")]
        pub interface: Interface,
        pub bytecode: Bytecode,
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    pub enum Interface {
        Text(String),
        Structured(serde_json::Value),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    pub enum Bytecode {
        Hex(String),
        Object { object: String },
    }
}

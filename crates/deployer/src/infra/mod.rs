pub mod artifact;
pub mod blockchain;
pub mod cli;
pub mod config;
pub mod observe;

pub use {blockchain::Ethereum, config::Config};

pub mod account;
pub mod artifact;
pub mod deployment;
pub mod eth;

pub use {
    account::{Account, Accounts},
    artifact::Artifact,
    deployment::{Deployment, Failure, Phase},
};

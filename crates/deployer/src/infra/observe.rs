//! This module implements the observability for the deployer. It exposes
//! functions which represent events that are meaningful to the system. These
//! functions are called when the corresponding events occur and log them.

use {
    crate::domain::{
        account::{Account, Accounts, Selection},
        artifact::Artifact,
        deployment::{Deployment, Failure, Request},
        eth,
    },
    std::path::Path,
};

/// Setup the observability. The log argument configures the tokio tracing
/// framework.
pub fn init(log: &str, stderr_threshold: Option<tracing::Level>, use_json_logs: bool) {
    let config = ::observe::Config::new(log, stderr_threshold, use_json_logs);
    ::observe::tracing::initialize(&config);
}

/// Observe that the configuration could not be loaded.
pub fn invalid_config(err: &anyhow::Error) {
    tracing::error!(?err, "invalid configuration");
}

/// Observe a loaded artifact.
pub fn loaded_artifact(path: &Path, artifact: &Artifact) {
    tracing::debug!(
        ?path,
        bytecode_len = artifact.bytecode.len(),
        "loaded artifact"
    );
}

pub fn listing_accounts() {
    tracing::trace!("listing accounts");
}

/// Observe the accounts reported by the signing capability.
pub fn accounts(accounts: &Accounts) {
    tracing::debug!(?accounts, "available accounts");
}

/// Observe the account the deployment is sent from.
pub fn selected_account(account: &Account, selection: &dyn Selection) {
    tracing::info!(%account, ?selection, "attempting to deploy from account");
}

/// Observe a built deployment request.
pub fn built(request: &Request) {
    tracing::debug!(
        from = %request.from(),
        gas_limit = %request.gas_limit(),
        arguments = ?request.arguments(),
        "built deployment request"
    );
}

/// Observe that the deployment transaction is about to be sent.
pub fn submitting(request: &Request) {
    tracing::info!(from = %request.from(), "submitting deployment transaction");
}

/// Observe that the network accepted the deployment transaction.
pub fn submitted(tx: eth::TxHash) {
    tracing::info!(?tx, "deployment transaction submitted");
}

pub fn awaiting_confirmation(tx: eth::TxHash) {
    tracing::debug!(?tx, "waiting for confirmation");
}

/// Observe a confirmed deployment.
pub fn confirmed(deployment: &Deployment) {
    tracing::info!(
        address = %deployment.address,
        tx = ?deployment.receipt.tx_hash,
        block = ?deployment.receipt.block_number,
        gas_used = %deployment.receipt.gas_used,
        "contract deployed"
    );
}

/// Observe a failed deployment.
pub fn failed(failure: &Failure) {
    tracing::error!(
        phase = %failure.phase,
        err = %failure.error,
        fate = %failure.fate(),
        "deployment failed"
    );
}

use {
    crate::{
        domain::eth,
        infra::{self, config::file},
    },
    anyhow::{Context, Result, ensure},
    std::path::Path,
    tokio::fs,
};

/// Load the deployment configuration from a TOML file.
pub async fn load(path: &Path) -> Result<infra::Config> {
    let data = fs::read_to_string(path)
        .await
        .with_context(|| format!("I/O error while reading {path:?}"))?;
    let config: file::Config = toml::de::from_str(&data)
        .with_context(|| format!("TOML syntax error while reading {path:?}"))?;

    ensure!(config.gas_limit > 0, "gas-limit must be greater than zero");
    ensure!(
        config.confirmation.confirmations > 0,
        "confirmation.confirmations must be greater than zero"
    );

    let artifact = match path.parent() {
        Some(dir) if config.artifact.is_relative() => dir.join(&config.artifact),
        _ => config.artifact,
    };

    Ok(infra::Config {
        artifact,
        constructor_arguments: config.constructor_arguments,
        gas_limit: eth::Gas(config.gas_limit),
        chain_id: config.chain_id,
        account: match config.account {
            file::Account::First => infra::config::AccountSelection::First,
            file::Account::Index(index) => infra::config::AccountSelection::Index(index),
            file::Account::Address(address) => infra::config::AccountSelection::Address(address),
        },
        confirmation: infra::config::Confirmation {
            confirmations: config.confirmation.confirmations,
            timeout: config.confirmation.timeout.into(),
        },
    })
}

use {
    crate::{
        boundary,
        domain::deployment::{self, Deployment, Failure, Phase},
        infra::{
            self,
            artifact,
            blockchain::{self, Ethereum},
            cli,
            config,
            observe,
        },
    },
    clap::Parser,
    std::process::ExitCode,
};

/// Exit code of a deployment that failed at any phase.
const DEPLOYMENT_FAILED: u8 = 1;
/// Exit code of a run that never attempted a deployment because the
/// arguments or the configuration file are invalid.
const INVALID_CONFIG: u8 = 2;

/// Deploys the configured contract and reports the outcome.
pub async fn start(args: impl Iterator<Item = String>) -> ExitCode {
    let args = cli::Args::parse_from(args);
    observe::init(&args.log, args.stderr_threshold, args.use_json_logs);
    tracing::info!("running deployer with validated arguments:\n{}", args);

    let config = match config::file::load(&args.config).await {
        Ok(config) => config,
        Err(err) => return invalid_config(err),
    };
    let eth = match Ethereum::new(&blockchain::Config {
        url: args.node_url.clone(),
        credentials: match &args.mnemonic {
            Some(phrase) => blockchain::Credentials::Mnemonic {
                phrase: phrase.clone(),
                accounts: args.mnemonic_accounts,
            },
            None => blockchain::Credentials::Node,
        },
        rpc_timeout: args.rpc_timeout,
        confirmations: config.confirmation.confirmations,
        confirmation_timeout: config.confirmation.timeout,
    }) {
        Ok(eth) => eth,
        Err(err) => return invalid_config(err),
    };

    match run(&eth, &eth, &config).await {
        Ok(deployment) => {
            println!("Deployed from account {}", deployment.from);
            println!("Contract deployed to {}", deployment.extract_address());
            println!("Transaction {}", deployment.receipt.tx_hash);
            ExitCode::SUCCESS
        }
        Err(failure) => {
            observe::failed(&failure);
            if let Some(from) = failure.from {
                println!("Attempted to deploy from account {from}");
            }
            eprintln!("{failure} ({})", failure.fate());
            ExitCode::from(DEPLOYMENT_FAILED)
        }
    }
}

/// Loads the artifact and deploys it from the configured account.
pub async fn run(
    signer: &dyn boundary::Signer,
    chain: &dyn boundary::Chain,
    config: &infra::Config,
) -> Result<Deployment, Failure> {
    let artifact = artifact::load(&config.artifact)
        .await
        .map_err(|err| Failure::new(Phase::Build, err))?;
    let params = deployment::Params {
        artifact,
        arguments: config.constructor_arguments.clone(),
        gas_limit: config.gas_limit,
        chain_id: config.chain_id,
    };
    let selection = config.account.strategy();
    deployment::deploy(signer, chain, selection.as_ref(), &params).await
}

fn invalid_config(err: anyhow::Error) -> ExitCode {
    observe::invalid_config(&err);
    eprintln!("invalid configuration: {err:#}");
    ExitCode::from(INVALID_CONFIG)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            boundary::{MockChain, MockSigner},
            domain::{deployment::Error, eth},
            infra::config::{AccountSelection, Confirmation},
        },
        alloy::primitives::{address, b256},
        std::path::PathBuf,
    };

    const INBOX: &str = r#"{
        "abi": [{
            "type": "constructor",
            "stateMutability": "nonpayable",
            "inputs": [{ "name": "initialMessage", "type": "string", "internalType": "string" }]
        }],
        "bytecode": "0x6080604052"
    }"#;

    fn config(artifact: PathBuf, account: AccountSelection) -> infra::Config {
        infra::Config {
            artifact,
            constructor_arguments: vec!["Hi there!".to_string()],
            gas_limit: eth::Gas(1_000_000),
            chain_id: None,
            account,
            confirmation: Confirmation::default(),
        }
    }

    #[tokio::test]
    async fn deploys_artifact_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Inbox.json");
        std::fs::write(&path, INBOX).unwrap();

        let from = address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8");
        let tx = b256!("0x1111111111111111111111111111111111111111111111111111111111111111");
        let contract = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");

        let mut signer = MockSigner::new();
        signer.expect_accounts().returning(move || {
            Ok(vec![
                address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
                from,
            ])
        });
        let mut chain = MockChain::new();
        chain
            .expect_submit()
            .times(1)
            .withf(move |request| request.from == from)
            .returning(move |_| Ok(tx));
        chain.expect_confirm().times(1).returning(move |tx_hash| {
            Ok(eth::Receipt {
                tx_hash,
                block_number: Some(1),
                success: true,
                gas_used: eth::Gas(300_000),
                contract_address: Some(contract),
            })
        });

        let deployment = run(&signer, &chain, &config(path, AccountSelection::Index(1)))
            .await
            .unwrap();

        assert_eq!(deployment.from.address(), from);
        assert_eq!(
            deployment.extract_address(),
            "0x5FbDB2315678afecb367f032d93F642f64180aa3"
        );
    }

    #[tokio::test]
    async fn missing_artifact_fails_before_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let mut signer = MockSigner::new();
        signer.expect_accounts().never();
        let mut chain = MockChain::new();
        chain.expect_submit().never();

        let failure = run(
            &signer,
            &chain,
            &config(dir.path().join("missing.json"), AccountSelection::First),
        )
        .await
        .unwrap_err();

        assert_eq!(failure.phase, Phase::Build);
        assert!(matches!(failure.error, Error::InvalidArtifact(_)));
        assert_eq!(failure.fate(), deployment::Fate::NotSubmitted);
        assert_eq!(failure.from, None);
    }

    #[tokio::test]
    async fn failure_names_selected_account() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Inbox.json");
        std::fs::write(&path, INBOX).unwrap();

        let from = address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8");
        let mut signer = MockSigner::new();
        signer.expect_accounts().returning(move || {
            Ok(vec![
                address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
                from,
            ])
        });
        let mut chain = MockChain::new();
        chain
            .expect_submit()
            .times(1)
            .returning(|_| Err(boundary::Error::Node("insufficient funds".into())));
        chain.expect_confirm().never();

        let failure = run(&signer, &chain, &config(path, AccountSelection::Index(1)))
            .await
            .unwrap_err();

        assert_eq!(failure.phase, Phase::Submit);
        assert_eq!(failure.from.map(|account| account.address()), Some(from));
        assert_eq!(failure.fate(), deployment::Fate::NotSubmitted);
    }
}

use {
    crate::{boundary, domain::eth},
    alloy::{
        network::{ReceiptResponse, TransactionBuilder},
        providers::{PendingTransactionBuilder, PendingTransactionError, Provider, WatchTxError},
        rpc::types::TransactionRequest,
        transports::TransportError,
    },
    ethrpc::{
        AlloyProvider,
        alloy::{
            errors::{Classification, TransportErrorExt},
            wallet::HdWallet,
        },
    },
    std::{fmt, time::Duration},
    url::Url,
};

/// Configuration of the connection to the network.
#[derive(Debug, Clone)]
pub struct Config {
    pub url: Url,
    pub credentials: Credentials,
    pub rpc_timeout: Duration,
    pub confirmations: u64,
    pub confirmation_timeout: Option<Duration>,
}

/// Who signs the deployment.
#[derive(Clone)]
pub enum Credentials {
    /// The node manages the accounts and signs.
    Node,
    /// A local HD wallet derived from a mnemonic signs.
    Mnemonic { phrase: String, accounts: u32 },
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node => f.write_str("Node"),
            Self::Mnemonic { accounts, .. } => f
                .debug_struct("Mnemonic")
                .field("phrase", &"SECRET")
                .field("accounts", accounts)
                .finish(),
        }
    }
}

/// The Ethereum network reached through a node's RPC API. Acts as both the
/// signing capability and the chain the contract gets deployed to.
#[derive(Clone)]
pub struct Ethereum {
    provider: AlloyProvider,
    /// Accounts of the local wallet, `None` when the node signs.
    local_accounts: Option<Vec<eth::Address>>,
    confirmations: u64,
    timeout: Option<Duration>,
}

impl Ethereum {
    /// Connects to the node at the configured URL. No request is sent yet.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let rpc = ethrpc::Config {
            label: "deployer".to_string(),
            request_timeout: config.rpc_timeout,
        };
        let (wallet, local_accounts) = match &config.credentials {
            Credentials::Node => (None, None),
            Credentials::Mnemonic { phrase, accounts } => {
                let wallet = HdWallet::from_mnemonic(phrase, *accounts)?;
                (Some(wallet.ethereum_wallet()), Some(wallet.addresses()))
            }
        };
        let provider = ethrpc::alloy::provider(&config.url, &rpc, wallet)?;
        Ok(Self::with_provider(
            provider,
            local_accounts,
            config.confirmations,
            config.confirmation_timeout,
        ))
    }

    pub fn with_provider(
        provider: AlloyProvider,
        local_accounts: Option<Vec<eth::Address>>,
        confirmations: u64,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            provider,
            local_accounts,
            confirmations,
            timeout,
        }
    }
}

#[async_trait::async_trait]
impl boundary::Signer for Ethereum {
    async fn accounts(&self) -> Result<Vec<eth::Address>, boundary::Error> {
        match &self.local_accounts {
            Some(accounts) => Ok(accounts.clone()),
            None => self.provider.get_accounts().await.map_err(rpc_error),
        }
    }
}

#[async_trait::async_trait]
impl boundary::Chain for Ethereum {
    async fn chain_id(&self) -> Result<u64, boundary::Error> {
        self.provider.get_chain_id().await.map_err(rpc_error)
    }

    async fn submit(&self, tx: eth::Tx) -> Result<eth::TxHash, boundary::Error> {
        let pending = self
            .provider
            .send_transaction(creation(tx))
            .await
            .map_err(rpc_error)?;
        Ok(*pending.tx_hash())
    }

    async fn confirm(&self, tx: eth::TxHash) -> Result<eth::Receipt, boundary::Error> {
        // Local nodes usually mine on submission.
        if self.confirmations == 1 {
            let mined = self
                .provider
                .get_transaction_receipt(tx)
                .await
                .map_err(rpc_error)?;
            if let Some(mined) = mined {
                return Ok(receipt(&mined));
            }
        }
        let mined = PendingTransactionBuilder::new(self.provider.root().clone(), tx)
            .with_required_confirmations(self.confirmations)
            .with_timeout(self.timeout)
            .get_receipt()
            .await
            .map_err(|err| pending_error(err, self.timeout))?;
        Ok(receipt(&mined))
    }
}

/// A contract creation transaction: no recipient, the input is the init code.
fn creation(tx: eth::Tx) -> TransactionRequest {
    TransactionRequest::default()
        .with_from(tx.from)
        .with_deploy_code(tx.input)
        .with_gas_limit(tx.gas_limit.0)
}

fn receipt(receipt: &impl ReceiptResponse) -> eth::Receipt {
    eth::Receipt {
        tx_hash: receipt.transaction_hash(),
        block_number: receipt.block_number(),
        success: receipt.status(),
        gas_used: eth::Gas(receipt.gas_used()),
        contract_address: receipt.contract_address(),
    }
}

fn rpc_error(err: TransportError) -> boundary::Error {
    match err.classify() {
        Classification::Node(message) => boundary::Error::Node(message),
        Classification::Local(message) => boundary::Error::Signer(message),
        Classification::Transport => boundary::Error::Transport(err.into()),
    }
}

fn pending_error(err: PendingTransactionError, timeout: Option<Duration>) -> boundary::Error {
    match err {
        PendingTransactionError::TransportError(err) => rpc_error(err),
        PendingTransactionError::TxWatcher(WatchTxError::Timeout) => {
            boundary::Error::Timeout(timeout.unwrap_or_default())
        }
        err => boundary::Error::Transport(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::boundary::{Chain, Signer},
        alloy::{
            primitives::{B256, TxKind, address, b256, bytes},
            providers::{ProviderBuilder, mock},
        },
        ethrpc::alloy::mocked_provider,
        serde_json::json,
    };

    const CONTRACT: eth::Address = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");
    const FROM: eth::Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

    fn ethereum(provider: AlloyProvider, local_accounts: Option<Vec<eth::Address>>) -> Ethereum {
        Ethereum::with_provider(provider, local_accounts, 1, Some(Duration::from_secs(750)))
    }

    /// A mocked provider that sends transactions as they are, without
    /// querying nonce, fees or chain id first.
    fn unfilled_provider() -> (AlloyProvider, mock::Asserter) {
        let asserter = mock::Asserter::new();
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone())
            .erased();
        (provider, asserter)
    }

    fn tx_hash() -> eth::TxHash {
        b256!("0x1111111111111111111111111111111111111111111111111111111111111111")
    }

    fn deployment_tx() -> eth::Tx {
        eth::Tx {
            from: FROM,
            input: bytes!("600a600c"),
            gas_limit: eth::Gas(1_000_000),
        }
    }

    fn receipt_json(status: &str, gas_used: &str, contract_address: Option<eth::Address>) -> serde_json::Value {
        json!({
            "type": "0x2",
            "status": status,
            "cumulativeGasUsed": gas_used,
            "logs": [],
            "logsBloom": format!("0x{}", "00".repeat(256)),
            "transactionHash": tx_hash(),
            "transactionIndex": "0x0",
            "blockHash": B256::repeat_byte(0x22),
            "blockNumber": "0x7",
            "gasUsed": gas_used,
            "effectiveGasPrice": "0x3b9aca00",
            "from": FROM,
            "to": null,
            "contractAddress": contract_address,
        })
    }

    #[tokio::test]
    async fn node_accounts() {
        let (provider, asserter) = mocked_provider();
        let accounts = vec![
            address!("0x00000000000000000000000000000000000000ab"),
            address!("0x00000000000000000000000000000000000000de"),
        ];
        asserter.push_success(&accounts);

        let ethereum = ethereum(provider, None);

        assert_eq!(ethereum.accounts().await.unwrap(), accounts);
    }

    #[tokio::test]
    async fn local_accounts_do_not_hit_the_node() {
        let (provider, _asserter) = mocked_provider();
        let wallet = HdWallet::anvil(2);

        let ethereum = ethereum(provider, Some(wallet.addresses()));

        assert_eq!(ethereum.accounts().await.unwrap(), wallet.addresses());
    }

    #[tokio::test]
    async fn chain_id() {
        let (provider, asserter) = mocked_provider();
        asserter.push_success(&"0x5");

        assert_eq!(ethereum(provider, None).chain_id().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn node_errors_are_classified() {
        let (provider, asserter) = mocked_provider();
        asserter.push_failure_msg("the method eth_accounts does not exist");

        let err = ethereum(provider, None).accounts().await.unwrap_err();

        assert!(
            matches!(&err, boundary::Error::Node(message) if message.contains("eth_accounts")),
            "{err:?}"
        );
    }

    #[tokio::test]
    async fn missing_response_is_a_transport_error() {
        let (provider, _asserter) = mocked_provider();

        let err = ethereum(provider, None).chain_id().await.unwrap_err();

        assert!(matches!(err, boundary::Error::Transport(_)), "{err:?}");
    }

    #[test]
    fn creation_request_has_no_recipient() {
        let request = creation(deployment_tx());

        assert_eq!(request.from, Some(FROM));
        assert_eq!(request.to, Some(TxKind::Create));
        assert_eq!(request.input.input(), Some(&bytes!("600a600c")));
        assert_eq!(request.gas, Some(1_000_000));
    }

    #[tokio::test]
    async fn submit_returns_transaction_hash() {
        let (provider, asserter) = unfilled_provider();
        asserter.push_success(&tx_hash());

        let submitted = ethereum(provider, None).submit(deployment_tx()).await.unwrap();

        assert_eq!(submitted, tx_hash());
    }

    #[tokio::test]
    async fn submit_refused_by_node() {
        let (provider, asserter) = unfilled_provider();
        asserter.push_failure_msg("insufficient funds for gas * price + value");

        let err = ethereum(provider, None)
            .submit(deployment_tx())
            .await
            .unwrap_err();

        assert!(
            matches!(&err, boundary::Error::Node(message) if message.contains("insufficient funds")),
            "{err:?}"
        );
    }

    #[tokio::test]
    async fn submit_without_response_is_a_transport_error() {
        let (provider, _asserter) = unfilled_provider();

        let err = ethereum(provider, None)
            .submit(deployment_tx())
            .await
            .unwrap_err();

        assert!(matches!(err, boundary::Error::Transport(_)), "{err:?}");
    }

    #[tokio::test]
    async fn confirm_maps_mined_receipt() {
        let (provider, asserter) = unfilled_provider();
        asserter.push_success(&receipt_json("0x1", "0x493e0", Some(CONTRACT)));

        let receipt = ethereum(provider, None).confirm(tx_hash()).await.unwrap();

        assert_eq!(
            receipt,
            eth::Receipt {
                tx_hash: tx_hash(),
                block_number: Some(7),
                success: true,
                gas_used: eth::Gas(300_000),
                contract_address: Some(CONTRACT),
            }
        );
    }

    #[tokio::test]
    async fn confirm_maps_failed_receipt() {
        let (provider, asserter) = unfilled_provider();
        asserter.push_success(&receipt_json("0x0", "0xf4240", None));

        let receipt = ethereum(provider, None).confirm(tx_hash()).await.unwrap();

        assert!(!receipt.success);
        assert_eq!(receipt.gas_used, eth::Gas(1_000_000));
        assert_eq!(receipt.contract_address, None);
    }

    #[tokio::test]
    async fn receipt_lookup_errors_are_classified() {
        let (provider, asserter) = unfilled_provider();
        asserter.push_failure_msg("header not found");

        let err = ethereum(provider, None).confirm(tx_hash()).await.unwrap_err();

        assert!(
            matches!(&err, boundary::Error::Node(message) if message == "header not found"),
            "{err:?}"
        );
    }

    #[test]
    fn timeouts_are_reported_with_their_duration() {
        let timeout = Some(Duration::from_secs(30));
        let err = pending_error(PendingTransactionError::TxWatcher(WatchTxError::Timeout), timeout);

        assert!(matches!(err, boundary::Error::Timeout(d) if d == Duration::from_secs(30)));
    }

    #[test]
    fn debug_hides_mnemonic() {
        let credentials = Credentials::Mnemonic {
            phrase: "test test test test test test test test test test test junk".to_string(),
            accounts: 1,
        };

        assert!(!format!("{credentials:?}").contains("junk"));
    }
}

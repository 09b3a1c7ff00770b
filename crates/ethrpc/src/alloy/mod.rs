pub mod errors;
mod instrumentation;
pub mod wallet;

#[cfg(any(test, feature = "test-util"))]
use alloy::providers::mock;
use {
    crate::{AlloyProvider, Config},
    alloy::{
        network::EthereumWallet,
        providers::{Provider, ProviderBuilder},
        rpc::client::ClientBuilder,
        transports::http::{Http, reqwest},
    },
    instrumentation::{InstrumentationLayer, LabelingLayer},
    url::Url,
};

/// Creates a provider talking to the node at `url`. Every request is labeled
/// and logged. When a `wallet` is given transactions get signed locally and
/// submitted as raw transactions, otherwise signing is left to the node.
pub fn provider(
    url: &Url,
    config: &Config,
    wallet: Option<EthereumWallet>,
) -> anyhow::Result<AlloyProvider> {
    let http = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()?;
    let rpc = ClientBuilder::default()
        .layer(LabelingLayer {
            label: config.label.clone(),
        })
        .layer(InstrumentationLayer)
        .transport(Http::with_client(http, url.clone()), is_local(url));

    let provider = match wallet {
        Some(wallet) => ProviderBuilder::new()
            .wallet(wallet)
            .connect_client(rpc)
            .erased(),
        None => ProviderBuilder::new().connect_client(rpc).erased(),
    };
    Ok(provider)
}

/// Local nodes get polled more aggressively while waiting for transactions.
fn is_local(url: &Url) -> bool {
    matches!(
        url.host_str(),
        Some("localhost" | "127.0.0.1" | "[::1]" | "0.0.0.0")
    )
}

/// A provider backed by a mocked transport. Responses are taken from the
/// returned asserter in FIFO order.
#[cfg(any(test, feature = "test-util"))]
pub fn mocked_provider() -> (AlloyProvider, mock::Asserter) {
    let asserter = mock::Asserter::new();
    let provider = ProviderBuilder::new()
        .connect_mocked_client(asserter.clone())
        .erased();
    (provider, asserter)
}

#[cfg(test)]
mod tests {
    use {super::*, alloy::primitives::address};

    #[test]
    fn detects_local_nodes() {
        assert!(is_local(&"http://localhost:8545".parse().unwrap()));
        assert!(is_local(&"http://127.0.0.1:8545".parse().unwrap()));
        assert!(!is_local(&"https://rinkeby.infura.io/v3/key".parse().unwrap()));
    }

    #[tokio::test]
    async fn mocked_provider_replays_responses() {
        let (provider, asserter) = mocked_provider();
        let accounts = vec![address!("0x00000000000000000000000000000000000000ab")];
        asserter.push_success(&accounts);

        assert_eq!(provider.get_accounts().await.unwrap(), accounts);
    }

    #[tokio::test]
    async fn builds_provider_with_and_without_wallet() {
        let url = "http://localhost:8545".parse().unwrap();
        let wallet = wallet::HdWallet::anvil(2);

        assert!(provider(&url, &Config::default(), None).is_ok());
        assert!(provider(&url, &Config::default(), Some(wallet.ethereum_wallet())).is_ok());
    }
}

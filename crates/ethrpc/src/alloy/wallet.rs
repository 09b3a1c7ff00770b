use {
    alloy::{
        network::EthereumWallet,
        primitives::Address,
        signers::local::{MnemonicBuilder, PrivateKeySigner, coins_bip39::English},
    },
    anyhow::{Context, Result},
};

/// A local BIP-39 HD wallet. Keys are derived on the default Ethereum path
/// `m/44'/60'/0'/0/{index}`. The first derived key is the primary signer.
#[derive(Clone)]
pub struct HdWallet {
    primary: PrivateKeySigner,
    additional: Vec<PrivateKeySigner>,
}

impl HdWallet {
    /// Derives the first `count` accounts of the wallet described by
    /// `phrase`.
    pub fn from_mnemonic(phrase: &str, count: u32) -> Result<Self> {
        anyhow::ensure!(count > 0, "at least one account has to be derived");
        // Errors must not mention the phrase.
        let derive = |index: u32| -> Result<PrivateKeySigner> {
            MnemonicBuilder::<English>::default()
                .phrase(phrase)
                .index(index)
                .with_context(|| format!("invalid derivation index {index}"))?
                .build()
                .context("invalid mnemonic")
        };
        Ok(Self {
            primary: derive(0)?,
            additional: (1..count).map(derive).collect::<Result<_>>()?,
        })
    }

    /// The wallet of the well known mnemonic that local development nodes
    /// (anvil, hardhat) fund on startup.
    #[cfg(any(test, feature = "test-util"))]
    pub fn anvil(count: u32) -> Self {
        let phrase = "test test test test test test test test test test test junk";
        Self::from_mnemonic(phrase, count).expect("valid anvil mnemonic")
    }

    /// Addresses of the derived accounts, in derivation order.
    pub fn addresses(&self) -> Vec<Address> {
        std::iter::once(&self.primary)
            .chain(&self.additional)
            .map(PrivateKeySigner::address)
            .collect()
    }

    /// A wallet able to sign for every derived account. The first account is
    /// the default signer.
    pub fn ethereum_wallet(&self) -> EthereumWallet {
        let mut wallet = EthereumWallet::new(self.primary.clone());
        for signer in &self.additional {
            wallet.register_signer(signer.clone());
        }
        wallet
    }
}

impl std::fmt::Debug for HdWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HdWallet")
            .field("addresses", &self.addresses())
            .finish()
    }
}

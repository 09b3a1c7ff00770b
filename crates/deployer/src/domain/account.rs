//! Discovery and selection of the account that signs the deployment.

use {
    crate::{boundary, domain::eth, infra::observe},
    std::fmt::{self, Debug, Display},
};

/// An account the signing capability can sign for.
///
/// Accounts can only be obtained from an [`Accounts`] list returned by the
/// signer, so a deployment is never sent from an account the signer does not
/// know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Account(eth::Address);

impl Account {
    pub fn address(&self) -> eth::Address {
        self.0
    }
}

impl Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// The ordered list of accounts reported by the signing capability.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accounts(Vec<Account>);

impl Accounts {
    pub(crate) fn new(addresses: impl IntoIterator<Item = eth::Address>) -> Self {
        Self(addresses.into_iter().map(Account).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<Account> {
        self.0.first().copied()
    }

    pub fn get(&self, index: usize) -> Option<Account> {
        self.0.get(index).copied()
    }

    pub fn find(&self, address: eth::Address) -> Option<Account> {
        self.0.iter().copied().find(|account| account.0 == address)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no account available")]
    NoAccountAvailable,
    #[error("account {0} is not available")]
    UnknownAccount(String),
}

/// Strategy picking the deploying account out of the available ones.
pub trait Selection: Debug + Send + Sync {
    fn select(&self, accounts: &Accounts) -> Result<Account, Error>;
}

/// Picks the first account. This is the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct First;

impl Selection for First {
    fn select(&self, accounts: &Accounts) -> Result<Account, Error> {
        select_default(accounts)
    }
}

/// Picks the account at a position of the list.
#[derive(Debug, Clone, Copy)]
pub struct Index(pub usize);

impl Selection for Index {
    fn select(&self, accounts: &Accounts) -> Result<Account, Error> {
        if accounts.is_empty() {
            return Err(Error::NoAccountAvailable);
        }
        accounts.get(self.0).ok_or_else(|| {
            Error::UnknownAccount(format!("#{} of {}", self.0, accounts.len()))
        })
    }
}

/// Picks the account with a specific address.
#[derive(Debug, Clone, Copy)]
pub struct ByAddress(pub eth::Address);

impl Selection for ByAddress {
    fn select(&self, accounts: &Accounts) -> Result<Account, Error> {
        if accounts.is_empty() {
            return Err(Error::NoAccountAvailable);
        }
        accounts
            .find(self.0)
            .ok_or_else(|| Error::UnknownAccount(self.0.to_string()))
    }
}

/// Returns the first account, the conventional default signer.
pub fn select_default(accounts: &Accounts) -> Result<Account, Error> {
    accounts.first().ok_or(Error::NoAccountAvailable)
}

/// Resolves the account a deployment is sent from.
pub struct Resolver<'a> {
    signer: &'a dyn boundary::Signer,
    selection: &'a dyn Selection,
}

impl<'a> Resolver<'a> {
    pub fn new(signer: &'a dyn boundary::Signer, selection: &'a dyn Selection) -> Self {
        Self { signer, selection }
    }

    /// Asks the signing capability for its accounts.
    pub async fn list_accounts(&self) -> Result<Accounts, boundary::Error> {
        observe::listing_accounts();
        let accounts = Accounts::new(self.signer.accounts().await?);
        observe::accounts(&accounts);
        Ok(accounts)
    }

    /// Picks one of `accounts` with the configured strategy.
    pub fn select(&self, accounts: &Accounts) -> Result<Account, Error> {
        let account = self.selection.select(accounts)?;
        observe::selected_account(&account, self.selection);
        Ok(account)
    }
}

//! The deployment of a single contract.
//!
//! A deployment moves through `Built -> Submitted -> Confirmed`, any step may
//! end it in a [`Failure`] instead. Each state is its own type and every
//! transition consumes the previous state, so a request can't be submitted
//! twice and confirmation can't be awaited before submission.

use {
    crate::{
        boundary,
        domain::{
            account::{self, Account},
            artifact::{self, Artifact},
            eth,
        },
        infra::observe,
    },
    alloy::{
        dyn_abi::{DynSolValue, JsonAbiExt, Specifier},
        json_abi::JsonAbi,
    },
};

mod error;

pub use error::{Error, Fate, Failure, Phase, Rejection};

/// Everything needed to deploy one contract.
#[derive(Debug, Clone)]
pub struct Params {
    pub artifact: Artifact,
    /// Constructor arguments in their textual form, they are coerced into the
    /// types the constructor declares.
    pub arguments: Vec<String>,
    pub gas_limit: eth::Gas,
    /// Abort unless the node is connected to this chain.
    pub chain_id: Option<u64>,
}

/// A deployment that was built but not yet sent.
#[derive(Debug, Clone)]
pub struct Request {
    arguments: Vec<DynSolValue>,
    from: Account,
    gas_limit: eth::Gas,
    input: eth::Bytes,
}

impl Request {
    /// Builds the contract creation request. Doesn't touch the network.
    pub fn build(
        artifact: &Artifact,
        arguments: &[String],
        from: Account,
        gas_limit: eth::Gas,
    ) -> Result<Self, Error> {
        if gas_limit.0 == 0 {
            return Err(Error::InvalidGasLimit);
        }
        let abi = artifact.abi()?;
        let code = artifact.code()?;
        let arguments = coerce_arguments(&abi, arguments)?;
        let encoded = match &abi.constructor {
            Some(constructor) => constructor
                .abi_encode_input(&arguments)
                .map_err(|err| Error::InvalidArguments(err.to_string()))?,
            None => Vec::new(),
        };
        let input = [&code[..], encoded.as_slice()].concat().into();

        Ok(Self {
            arguments,
            from,
            gas_limit,
            input,
        })
    }

    pub fn arguments(&self) -> &[DynSolValue] {
        &self.arguments
    }

    pub fn from(&self) -> Account {
        self.from
    }

    pub fn gas_limit(&self) -> eth::Gas {
        self.gas_limit
    }

    /// The transaction that deploys the contract.
    pub fn tx(&self) -> eth::Tx {
        eth::Tx {
            from: self.from.address(),
            input: self.input.clone(),
            gas_limit: self.gas_limit,
        }
    }

    /// Sends the request to the network. This is the only irreversible step
    /// of a deployment and it is attempted exactly once.
    pub async fn submit(self, chain: &dyn boundary::Chain) -> Result<Pending, Failure> {
        observe::submitting(&self);
        let tx = chain
            .submit(self.tx())
            .await
            .map_err(|err| Failure::new(Phase::Submit, err).with_from(self.from))?;
        observe::submitted(tx);
        Ok(Pending {
            tx,
            from: self.from,
            gas_limit: self.gas_limit,
        })
    }
}

/// Converts the textual arguments into the types of the constructor inputs.
fn coerce_arguments(abi: &JsonAbi, arguments: &[String]) -> Result<Vec<DynSolValue>, Error> {
    let inputs = abi
        .constructor
        .as_ref()
        .map(|constructor| constructor.inputs.as_slice())
        .unwrap_or_default();
    if inputs.len() != arguments.len() {
        return Err(Error::InvalidArguments(format!(
            "the constructor takes {} arguments but {} were given",
            inputs.len(),
            arguments.len()
        )));
    }

    inputs
        .iter()
        .zip(arguments)
        .enumerate()
        .map(|(i, (param, argument))| -> Result<DynSolValue, Error> {
            let ty = param
                .resolve()
                .map_err(|err| artifact::Error::Interface(err.to_string()))?;
            ty.coerce_str(argument).map_err(|err| {
                Error::InvalidArguments(format!("argument {i} is not a valid {}: {err}", param.ty))
            })
        })
        .collect()
}

/// A submitted deployment waiting to be included.
#[derive(Debug, Clone, Copy)]
pub struct Pending {
    tx: eth::TxHash,
    from: Account,
    gas_limit: eth::Gas,
}

impl Pending {
    pub fn tx(&self) -> eth::TxHash {
        self.tx
    }

    /// Waits for the network to include the transaction.
    pub async fn confirm(self, chain: &dyn boundary::Chain) -> Result<Deployment, Failure> {
        observe::awaiting_confirmation(self.tx);
        let failure = |error: Error| {
            Failure::new(Phase::Confirm, error)
                .with_from(self.from)
                .with_tx(self.tx)
        };

        let receipt = chain
            .confirm(self.tx)
            .await
            .map_err(|err| failure(Error::lookup(err)))?;
        if !receipt.success {
            // Running out of gas consumes the whole gas limit.
            let rejection = if receipt.gas_used >= self.gas_limit {
                Rejection::OutOfGas(receipt.gas_used)
            } else {
                Rejection::Reverted
            };
            return Err(failure(Error::Rejected(rejection)));
        }
        let address = receipt
            .contract_address
            .ok_or_else(|| failure(Error::Rejected(Rejection::NoContractCreated)))?;

        let deployment = Deployment {
            address,
            from: self.from,
            receipt,
        };
        observe::confirmed(&deployment);
        Ok(deployment)
    }
}

/// A confirmed deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub address: eth::Address,
    pub from: Account,
    pub receipt: eth::Receipt,
}

impl Deployment {
    /// The address of the deployed contract as EIP-55 checksummed hex.
    pub fn extract_address(&self) -> String {
        self.address.to_checksum(None)
    }
}

/// Deploys a contract: resolves the deploying account, builds the request,
/// submits it and waits for its confirmation. Stops at the first failure.
pub async fn deploy(
    signer: &dyn boundary::Signer,
    chain: &dyn boundary::Chain,
    selection: &dyn account::Selection,
    params: &Params,
) -> Result<Deployment, Failure> {
    let resolution = |err: Error| Failure::new(Phase::Resolution, err);

    if let Some(expected) = params.chain_id {
        let actual = chain
            .chain_id()
            .await
            .map_err(|err| resolution(Error::lookup(err)))?;
        if actual != expected {
            return Err(resolution(Error::ChainMismatch { expected, actual }));
        }
    }

    let resolver = account::Resolver::new(signer, selection);
    let accounts = resolver
        .list_accounts()
        .await
        .map_err(|err| resolution(Error::lookup(err)))?;
    let from = resolver
        .select(&accounts)
        .map_err(|err| resolution(err.into()))?;

    let request = Request::build(&params.artifact, &params.arguments, from, params.gas_limit)
        .map_err(|err| Failure::new(Phase::Build, err).with_from(from))?;
    observe::built(&request);

    let pending = request.submit(chain).await?;
    pending.confirm(chain).await
}

//! Deployment and binding: one configurable mode covers both the eager
//! "deploy now" flow and binding to an address that is already live.

use crate::{error::ShellError, instance::BoundContract};
use ethers_core::{
    abi::{Abi, Token},
    types::{Address, Bytes},
};
use ethers_contract::ContractFactory;
use ethers_providers::Middleware;
use std::sync::Arc;

/// How the contract comes to life.
#[derive(Debug, Clone)]
pub enum DeployMode {
    /// Submit a deployment transaction and block for its receipt. The sender
    /// is explicit; there is no hidden default account.
    Deploy {
        /// Account the deployment transaction is sent from.
        from: Address,
        /// Constructor arguments, already tokenized.
        args: Vec<Token>,
    },
    /// Bind to a contract that is already deployed. No transaction is sent.
    Attach {
        /// The deployed contract address.
        address: Address,
    },
}

/// A pending binding of ABI + bytecode to a live address.
///
/// [`resolve`](Self::resolve) consumes it and returns a fully usable
/// [`BoundContract`]; no partially constructed state is ever handed out.
/// Client failures propagate unmodified and nothing is retried.
#[derive(Debug)]
pub struct ContractDeployment<M> {
    abi: Abi,
    bytecode: Bytes,
    client: Arc<M>,
    mode: DeployMode,
}

impl<M: Middleware> ContractDeployment<M> {
    /// Stages a deployment (or attachment) of the given interface.
    pub fn new(abi: Abi, bytecode: Bytes, client: Arc<M>, mode: DeployMode) -> Self {
        Self { abi, bytecode, client, mode }
    }

    /// Resolves the configured mode to a deployed address and returns the
    /// live handle bound to it.
    pub async fn resolve(self) -> Result<BoundContract<M>, ShellError<M>> {
        let address = match self.mode {
            DeployMode::Attach { address } => address,
            DeployMode::Deploy { from, args } => {
                let factory = ContractFactory::new(
                    self.abi.clone(),
                    self.bytecode.clone(),
                    Arc::clone(&self.client),
                );
                // dev-chain endpoints are happiest with legacy transactions,
                // which is also what the unlocked-account flow produces
                let mut deployer = factory.deploy_tokens(args)?.legacy();
                deployer.tx.set_from(from);
                let (contract, receipt) = deployer.send_with_receipt().await?;
                tracing::debug!(
                    tx = ?receipt.transaction_hash,
                    address = ?contract.address(),
                    "deployment mined"
                );
                contract.address()
            }
        };
        Ok(BoundContract::new(address, self.abi, self.client))
    }
}

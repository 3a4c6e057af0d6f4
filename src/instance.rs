//! A live contract handle that dispatches method calls at runtime through a
//! lookup table built once from the ABI, instead of through generated code.

use crate::{error::ShellError, util::normalize_name};
use ethers_core::{
    abi::{Abi, Function, StateMutability, Token},
    types::{
        transaction::eip2718::TypedTransaction, Address, Bytes, TransactionReceipt,
        TransactionRequest, U256,
    },
};
use ethers_providers::Middleware;
use std::{collections::HashMap, sync::Arc};

/// Options applied to a state-changing transaction. Unset fields are left for
/// the node to fill in.
#[derive(Debug, Clone, Default)]
pub struct TxOptions {
    /// Sender account.
    pub from: Option<Address>,
    /// Ether value attached to the transaction.
    pub value: Option<U256>,
    /// Gas limit override.
    pub gas: Option<U256>,
    /// Gas price override.
    pub gas_price: Option<U256>,
}

impl TxOptions {
    /// Writes the set fields into the transaction.
    pub fn apply(&self, tx: &mut TypedTransaction) {
        if let Some(from) = self.from {
            tx.set_from(from);
        }
        if let Some(value) = self.value {
            tx.set_value(value);
        }
        if let Some(gas) = self.gas {
            tx.set_gas(gas);
        }
        if let Some(gas_price) = self.gas_price {
            tx.set_gas_price(gas_price);
        }
    }
}

/// A contract bound to a deployed address.
///
/// Methods are resolved by their normalized name against a mapping built once
/// at construction, and dispatched as a read-only call or as a transaction
/// depending on the ABI entry's mutability. Valid for as long as the
/// underlying endpoint is reachable; every operation blocks until the client
/// resolves it.
#[derive(Debug)]
pub struct BoundContract<M> {
    address: Address,
    abi: Abi,
    client: Arc<M>,
    /// A mapping from normalized method name to a name-index pair for
    /// accessing functions in the contract ABI.
    methods: HashMap<String, (String, usize)>,
}

impl<M> BoundContract<M> {
    /// Binds the client to the contract at `address`.
    pub fn new(address: Address, abi: Abi, client: Arc<M>) -> Self {
        let methods = abi
            .functions
            .iter()
            .flat_map(|(name, overloads)| {
                (0..overloads.len()).map(move |index| {
                    (normalize_name(name), (name.clone(), index))
                })
            })
            .collect();
        Self { address, abi, client, methods }
    }

    /// The deployed address this handle is bound to.
    pub fn address(&self) -> Address {
        self.address
    }

    /// A pointer to the contract's client.
    pub fn client(&self) -> Arc<M> {
        self.client.clone()
    }

    /// Resolves a method by normalized or original name.
    fn function<E>(&self, name: &str) -> Result<&Function, ShellError<E>>
    where
        E: Middleware,
    {
        self.methods
            .get(name)
            .or_else(|| self.methods.get(&normalize_name(name)))
            .map(|(name, index)| &self.abi.functions[name][*index])
            .ok_or_else(|| ShellError::MethodNotFound(name.to_string()))
    }

    // only `view` is dispatched as a read-only call; `pure` transacts like
    // any other mutability
    fn is_view(function: &Function) -> bool {
        matches!(function.state_mutability, StateMutability::View)
    }
}

impl<M: Middleware> BoundContract<M> {
    /// Dispatches a read-only method: encodes the arguments, issues an
    /// `eth_call` and returns the decoded outputs.
    pub async fn call(&self, name: &str, args: &[Token]) -> Result<Vec<Token>, ShellError<M>> {
        let function = self.function::<M>(name)?;
        if !Self::is_view(function) {
            return Err(ShellError::NotViewFunction(name.to_string()))
        }

        let data = function.encode_input(args)?;
        let tx: TypedTransaction =
            TransactionRequest::new().to(self.address).data(Bytes::from(data)).into();
        let output =
            self.client.call(&tx, None).await.map_err(ShellError::MiddlewareError)?;
        Ok(function.decode_output(&output)?)
    }

    /// Dispatches a state-changing method: encodes the arguments, submits the
    /// transaction and blocks for its receipt.
    pub async fn transact(
        &self,
        name: &str,
        args: &[Token],
        options: TxOptions,
    ) -> Result<TransactionReceipt, ShellError<M>> {
        let function = self.function::<M>(name)?;
        if Self::is_view(function) {
            return Err(ShellError::NotTransactFunction(name.to_string()))
        }

        let data = function.encode_input(args)?;
        let mut tx: TypedTransaction =
            TransactionRequest::new().to(self.address).data(Bytes::from(data)).into();
        options.apply(&mut tx);

        let pending = self
            .client
            .send_transaction(tx, None)
            .await
            .map_err(ShellError::MiddlewareError)?;
        pending
            .await
            .map_err(ShellError::ProviderError)?
            .ok_or(ShellError::TransactionDropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers_providers::{Http, Provider};

    fn token_abi() -> Abi {
        serde_json::from_str(
            r#"[
                {"type": "function", "name": "balanceOf", "stateMutability": "view",
                 "inputs": [{"type": "address", "name": "who"}],
                 "outputs": [{"type": "uint256", "name": ""}]},
                {"type": "function", "name": "transfer", "stateMutability": "nonpayable",
                 "inputs": [{"type": "address", "name": "to"}, {"type": "uint256", "name": "amount"}],
                 "outputs": [{"type": "bool", "name": ""}]},
                {"type": "function", "name": "compute", "stateMutability": "pure",
                 "inputs": [], "outputs": [{"type": "uint256", "name": ""}]}
            ]"#,
        )
        .unwrap()
    }

    fn bound() -> BoundContract<Provider<Http>> {
        let client = Provider::<Http>::try_from("http://127.0.0.1:7545").unwrap();
        BoundContract::new(Address::zero(), token_abi(), Arc::new(client))
    }

    #[test]
    fn resolves_methods_by_name() {
        let contract = bound();
        assert!(contract.function::<Provider<Http>>("balanceOf").is_ok());
        assert!(contract.function::<Provider<Http>>("transfer").is_ok());
        assert!(matches!(
            contract.function::<Provider<Http>>("mint"),
            Err(ShellError::MethodNotFound(_))
        ));
    }

    // mutability is checked before any network traffic, so these resolve
    // without a node listening
    #[tokio::test]
    async fn rejects_transacting_a_view_function() {
        let contract = bound();
        let result = contract
            .transact("balanceOf", &[Token::Address(Address::zero())], TxOptions::default())
            .await;
        assert!(matches!(result, Err(ShellError::NotTransactFunction(_))));
    }

    #[tokio::test]
    async fn rejects_calling_a_transact_function() {
        let contract = bound();
        let args = [Token::Address(Address::zero()), Token::Uint(U256::one())];
        let result = contract.call("transfer", &args).await;
        assert!(matches!(result, Err(ShellError::NotViewFunction(_))));
    }

    // `pure` is not read-only here: it goes down the transaction path like
    // any non-view mutability
    #[tokio::test]
    async fn pure_functions_are_not_read_only() {
        let contract = bound();
        let result = contract.call("compute", &[]).await;
        assert!(matches!(result, Err(ShellError::NotViewFunction(_))));
    }
}

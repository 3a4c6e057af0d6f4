//! Error taxonomy: artifact (input) errors, and everything thrown while
//! driving a live contract. Client failures are passed through unmodified,
//! never retried.

use ethers_contract::ContractError;
use ethers_providers::{Middleware, ProviderError};
use thiserror::Error;

/// Errors produced while loading a compiler artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// The artifact file could not be read.
    #[error("failed to read artifact: {0}")]
    Io(#[from] std::io::Error),

    /// The artifact JSON is malformed or misses a required field.
    #[error("malformed artifact: {0}")]
    Json(#[from] serde_json::Error),
}

/// An error thrown while deploying or exercising a live contract.
#[derive(Debug, Error)]
pub enum ShellError<M: Middleware> {
    /// Thrown when ABI encoding or decoding fails
    #[error(transparent)]
    AbiError(#[from] ethers_core::abi::Error),

    /// Thrown by the client's contract machinery (deployment, encoding)
    #[error(transparent)]
    ContractError(#[from] ContractError<M>),

    /// Thrown when a middleware call fails
    #[error("{0}")]
    MiddlewareError(M::Error),

    /// Thrown when a provider call fails
    #[error("{0}")]
    ProviderError(ProviderError),

    /// The requested method does not exist in the ABI
    #[error("no method `{0}` in the contract ABI")]
    MethodNotFound(String),

    /// A state-changing method was dispatched as a read-only call
    #[error("`{0}` is not a view function, send it as a transaction")]
    NotViewFunction(String),

    /// A view method was dispatched as a transaction
    #[error("`{0}` is a view function, dispatch it as a call")]
    NotTransactFunction(String),

    /// The transaction was broadcast but never produced a receipt
    #[error("transaction dropped from the mempool")]
    TransactionDropped,
}

#![deny(rustdoc::broken_intra_doc_links)]

//! Turn a compiled smart-contract artifact (ABI + bytecode + name, as emitted
//! by the contract compiler) into something you can poke at without writing
//! boilerplate:
//!
//! - [`Bindgen`] reads the artifact and emits a typed Rust source file ahead
//!   of compilation, one method per ABI entry.
//! - [`BoundContract`] dispatches calls at runtime through a lookup table
//!   built once from the ABI, for the interactive path where no generated
//!   code exists.
//! - [`ContractDeployment`] deploys the bytecode (or attaches to an existing
//!   address) and returns the live handle; [`Session`] wraps it in a
//!   read-eval loop.
//!
//! Everything network-shaped is delegated to the `ethers` client crates.

pub mod artifact;
pub mod bindgen;
pub mod deploy;
mod error;
pub mod instance;
pub mod repl;
pub mod signature;
mod util;

pub use artifact::{AbiEntry, AbiParam, ContractArtifact};
pub use bindgen::{Bindgen, Bindings};
pub use deploy::{ContractDeployment, DeployMode};
pub use error::{ArtifactError, ShellError};
pub use instance::{BoundContract, TxOptions};
pub use repl::Session;
pub use signature::render_signature;
pub use util::normalize_name;

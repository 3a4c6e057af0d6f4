//! Generation of typed Rust bindings from a compiler artifact.
//!
//! This is the build-time replacement for the runtime class synthesis the
//! interactive path avoids: a generator program reads the artifact JSON and
//! emits one source file per normalized contract name, ready to be compiled
//! into the caller's project.

mod methods;
mod types;

use crate::{
    artifact::ContractArtifact,
    signature::render_signature,
    util::{expand_input_name, safe_ident},
};
use eyre::{Result, WrapErr};
use proc_macro2::TokenStream;
use quote::quote;
use std::{
    fs,
    io::Write,
    path::Path,
};

/// Builder for generating typed bindings from a contract artifact.
///
/// # Example
///
/// ```no_run
/// # use contract_shell::Bindgen;
/// # fn run() -> eyre::Result<()> {
/// Bindgen::from_file("artifacts/Token.json")?.generate()?.write_module_in_dir("src/gen")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Bindgen {
    artifact: ContractArtifact,
    /// Override for the contract name the artifact carries.
    name: Option<String>,
}

impl Bindgen {
    /// Creates a builder for the given artifact.
    pub fn new(artifact: ContractArtifact) -> Self {
        Self { artifact, name: None }
    }

    /// Loads the artifact from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let artifact = ContractArtifact::load(path)
            .wrap_err_with(|| format!("failed to load artifact {}", path.display()))?;
        Ok(Self::new(artifact))
    }

    /// Overrides the contract name used for the generated struct.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Generates the bindings. Output is deterministic: the same artifact
    /// produces byte-identical source on every run.
    pub fn generate(self) -> Result<Bindings> {
        let raw_name =
            self.name.clone().unwrap_or_else(|| self.artifact.contract_name.clone());
        let name = crate::normalize_name(&raw_name);
        let tokens = expand(&self.artifact, &name)
            .wrap_err_with(|| format!("error expanding bindings for `{raw_name}`"))?;
        let file = syn::parse2(tokens).wrap_err("generated bindings are not valid Rust")?;
        Ok(Bindings { source: prettyplease::unparse(&file), name })
    }
}

/// Generated bindings, ready to be written out. The file name is keyed by the
/// normalized contract name, so regenerating overwrites the previous artifact.
pub struct Bindings {
    source: String,
    name: String,
}

impl Bindings {
    /// The generated source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The normalized contract name the bindings are keyed by.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The file name the bindings are written to.
    pub fn module_filename(&self) -> String {
        format!("{}.rs", self.name)
    }

    /// Writes the bindings to the given writer.
    pub fn write<W: Write>(&self, mut w: W) -> Result<()> {
        w.write_all(self.source.as_bytes())?;
        Ok(())
    }

    /// Writes the bindings to `<dir>/<NormalizedName>.rs`, creating the
    /// directory if needed and overwriting any previous file of that name.
    /// Nothing is ever cleaned up.
    pub fn write_module_in_dir(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .wrap_err_with(|| format!("failed to create output dir {}", dir.display()))?;
        self.write(fs::File::create(dir.join(self.module_filename()))?)
    }
}

/// Expands the whole artifact into the contract struct, its statics, the
/// deployment entry point and one method per function entry in ABI order.
fn expand(artifact: &ContractArtifact, name: &str) -> Result<TokenStream> {
    let class = safe_ident(name);
    let abi_static = safe_ident(&format!("{}_ABI", name.to_uppercase()));
    let bytecode_static = safe_ident(&format!("{}_BYTECODE", name.to_uppercase()));

    let header = format!(
        " {name} was auto-generated by contract-shell from `{}`. Do not edit manually.",
        artifact.contract_name
    );
    let abi_str = serde_json::to_string(&artifact.entries)?;
    let bytecode_str = format!("0x{}", hex::encode(&artifact.bytecode));

    let deploy = expand_deploy(artifact, &class, &abi_static, &bytecode_static)?;
    let methods = artifact
        .functions()
        .map(|function| {
            methods::expand_function(function).wrap_err_with(|| {
                format!("error expanding `{}`", render_signature(function))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(quote! {
        #![doc = #header]
        #![allow(non_snake_case, non_camel_case_types, non_upper_case_globals)]
        #![allow(clippy::too_many_arguments, dead_code, unused_imports)]

        use contract_shell::TxOptions;
        use ethers_contract::{
            builders::ContractCall, Contract, ContractDeployer, ContractError,
            ContractFactory, Lazy,
        };
        use ethers_core::abi::Abi;
        use ethers_providers::Middleware;
        use std::sync::Arc;

        pub static #abi_static: Lazy<Abi> =
            Lazy::new(|| serde_json::from_str(#abi_str).expect("invalid abi"));

        pub static #bytecode_static: Lazy<ethers_core::types::Bytes> =
            Lazy::new(|| #bytecode_str.parse().expect("invalid bytecode"));

        #[derive(Clone)]
        pub struct #class<M>(Contract<M>);

        impl<M> ::std::ops::Deref for #class<M> {
            type Target = Contract<M>;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl<M> From<Contract<M>> for #class<M> {
            fn from(contract: Contract<M>) -> Self {
                Self(contract)
            }
        }

        impl<M: Middleware> ::std::fmt::Debug for #class<M> {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                f.debug_tuple(stringify!(#class)).field(&self.address()).finish()
            }
        }

        impl<M: Middleware> #class<M> {
            /// Binds the client to an already-deployed instance at `address`.
            pub fn new<T: Into<ethers_core::types::Address>>(
                address: T,
                client: Arc<M>,
            ) -> Self {
                Self(Contract::new(address.into(), #abi_static.clone(), client))
            }

            #deploy

            #(#methods)*
        }
    })
}

/// Expands the constructor-style deployment entry point. Contracts without a
/// constructor entry get the empty-argument default.
fn expand_deploy(
    artifact: &ContractArtifact,
    class: &proc_macro2::Ident,
    abi_static: &proc_macro2::Ident,
    bytecode_static: &proc_macro2::Ident,
) -> Result<TokenStream> {
    let inputs = artifact.constructor().map(|c| c.inputs.as_slice()).unwrap_or_default();

    let mut params = Vec::with_capacity(inputs.len());
    let mut args = Vec::with_capacity(inputs.len());
    for (index, input) in inputs.iter().enumerate() {
        let arg = expand_input_name(index, &input.name);
        let ty = types::expand(&input.param_type()?)?;
        params.push(quote!(#arg: #ty));
        args.push(arg);
    }

    let doc = format!(
        " Submits a deployment of `{}` and returns a deployer whose `send()` \
         resolves to an instance of [`{class}`] bound at the mined address.",
        artifact.contract_name
    );

    Ok(quote! {
        #[doc = #doc]
        pub fn deploy(
            client: Arc<M>,
            #(#params),*
        ) -> ::std::result::Result<ContractDeployer<M, Self>, ContractError<M>> {
            let factory = ContractFactory::new(
                #abi_static.clone(),
                #bytecode_static.clone(),
                client,
            );
            let deployer = factory.deploy((#(#args,)*))?;
            Ok(ContractDeployer::new(deployer))
        }
    })
}

//! Command line entry point: `shell` deploys (or attaches) and drops into the
//! interactive session, `bindgen` writes typed bindings ahead of compilation.

use clap::{Args, Parser, Subcommand};
use contract_shell::{
    repl, Bindgen, ContractArtifact, ContractDeployment, DeployMode, Session,
};
use ethers_core::types::Address;
use ethers_providers::{Http, Middleware, Provider};
use eyre::{eyre, Result, WrapErr};
use std::{path::PathBuf, sync::Arc};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "contract-shell", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Deploy a contract (or attach to one) and exercise it interactively.
    Shell(ShellArgs),
    /// Generate typed Rust bindings from a contract artifact.
    Bindgen(BindgenArgs),
}

#[derive(Args)]
struct ShellArgs {
    /// Path to the artifact JSON (`contractName`, `abi`, `bytecode`).
    artifact: PathBuf,

    /// Constructor arguments for the deployment. Meaningless when attaching.
    #[arg(conflicts_with = "address")]
    args: Vec<String>,

    /// HTTP JSON-RPC endpoint of the node.
    #[arg(short, long, default_value = "http://127.0.0.1:7545")]
    endpoint: String,

    /// Account the deployment is sent from; defaults to the node's first
    /// account.
    #[arg(short, long)]
    creator: Option<Address>,

    /// Attach to an already-deployed contract instead of deploying.
    #[arg(short, long, conflicts_with = "creator")]
    address: Option<Address>,
}

#[derive(Args)]
struct BindgenArgs {
    /// Path to the artifact JSON (`contractName`, `abi`, `bytecode`).
    artifact: PathBuf,

    /// Directory the generated module is written into.
    #[arg(short, long)]
    out_dir: PathBuf,

    /// Override the contract name the artifact carries.
    #[arg(short, long)]
    name: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Bindgen(args) => run_bindgen(args),
        Command::Shell(args) => {
            let status = run_shell(args).await?;
            std::process::exit(status)
        }
    }
}

fn run_bindgen(args: BindgenArgs) -> Result<()> {
    let mut bindgen = Bindgen::from_file(&args.artifact)?;
    if let Some(name) = args.name {
        bindgen = bindgen.with_name(name);
    }
    let bindings = bindgen.generate()?;
    bindings.write_module_in_dir(&args.out_dir)?;
    info!(
        file = %args.out_dir.join(bindings.module_filename()).display(),
        "bindings written"
    );
    Ok(())
}

async fn run_shell(args: ShellArgs) -> Result<i32> {
    let artifact = ContractArtifact::load(&args.artifact)
        .wrap_err_with(|| format!("failed to load artifact {}", args.artifact.display()))?;

    let provider = Provider::<Http>::try_from(args.endpoint.as_str())
        .wrap_err_with(|| format!("invalid endpoint {}", args.endpoint))?;
    let client = Arc::new(provider);

    let accounts = client
        .get_accounts()
        .await
        .wrap_err_with(|| format!("endpoint {} is unreachable", args.endpoint))?;
    let creator = args
        .creator
        .or_else(|| accounts.first().copied())
        .ok_or_else(|| eyre!("node reports no accounts; pass --creator"))?;

    let mode = match args.address {
        Some(address) => DeployMode::Attach { address },
        None => {
            let params = artifact
                .constructor()
                .map(|c| c.inputs.clone())
                .unwrap_or_default();
            let raw: Vec<&str> = args.args.iter().map(String::as_str).collect();
            let tokens = repl::parse_tokens(&params, &raw)
                .wrap_err("invalid constructor arguments")?;
            DeployMode::Deploy { from: creator, args: tokens }
        }
    };

    let contract = ContractDeployment::new(
        artifact.abi.clone(),
        artifact.bytecode.clone(),
        Arc::clone(&client),
        mode,
    )
    .resolve()
    .await?;
    info!(address = ?contract.address(), "contract bound");

    let session = Session::new(contract, artifact, accounts, creator);
    Ok(session.run().await)
}

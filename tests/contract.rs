//! Tests against a live dev node (Ganache-style, unlocked accounts).

use contract_shell::{ContractArtifact, ContractDeployment, DeployMode};
use ethers_core::abi::Token;
use ethers_providers::{Http, Middleware, Provider};
use std::sync::Arc;

const ENDPOINT: &str = "http://127.0.0.1:7545";

fn artifact() -> ContractArtifact {
    ContractArtifact::load(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/testdata/my_token.json"
    ))
    .unwrap()
}

#[tokio::test]
#[ignore = "requires a dev node on 127.0.0.1:7545"]
async fn deploys_and_binds() {
    let client = Arc::new(Provider::<Http>::try_from(ENDPOINT).unwrap());
    let accounts = client.get_accounts().await.unwrap();
    let artifact = artifact();

    let contract = ContractDeployment::new(
        artifact.abi.clone(),
        artifact.bytecode.clone(),
        Arc::clone(&client),
        DeployMode::Deploy {
            from: accounts[0],
            args: vec![Token::Uint(1000u64.into())],
        },
    )
    .resolve()
    .await
    .unwrap();

    // the handle is fully bound: methods resolve and the address is live
    assert_ne!(contract.address(), Default::default());
    let code = client.get_code(contract.address(), None).await.unwrap();
    assert!(code.len() <= artifact.bytecode.len());
}

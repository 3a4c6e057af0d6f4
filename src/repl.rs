//! The interactive session: a read-eval loop bound to a live contract, the
//! endpoint client, the node's account list and a receipt-lookup helper.
//!
//! Single-threaded and blocking throughout: each command runs to completion
//! (receipt included) before the next prompt. Command failures are printed
//! and the session stays alive; `quit` or end of input ends it.

use crate::{
    artifact::{AbiParam, ContractArtifact},
    instance::{BoundContract, TxOptions},
    signature::render_signature,
};
use dialoguer::Input;
use ethers_core::abi::{
    token::{LenientTokenizer, Tokenizer},
    Token,
};
use ethers_core::types::{Address, TxHash, U256};
use ethers_providers::Middleware;
use eyre::{bail, eyre, Result, WrapErr};

const BANNER: &str = "*** contract-shell: type `help` for the contract's methods ***";

/// The interactive session state.
pub struct Session<M> {
    contract: BoundContract<M>,
    artifact: ContractArtifact,
    accounts: Vec<Address>,
    /// Sender used for `send` when no `--from` is given.
    default_sender: Address,
}

impl<M> Session<M>
where
    M: Middleware + 'static,
    M::Error: 'static,
{
    /// Wires a session around a live contract handle.
    pub fn new(
        contract: BoundContract<M>,
        artifact: ContractArtifact,
        accounts: Vec<Address>,
        default_sender: Address,
    ) -> Self {
        Self { contract, artifact, accounts, default_sender }
    }

    /// Runs the read-eval loop and returns the session's exit status.
    pub async fn run(&self) -> i32 {
        println!("{BANNER}");
        println!("{} bound at {:?}", self.artifact.contract_name, self.contract.address());

        loop {
            let line: String = match Input::new().with_prompt(">>").interact_text() {
                Ok(line) => line,
                // end of input closes the session cleanly
                Err(_) => return 0,
            };
            match self.execute(line.trim()).await {
                Ok(true) => {}
                Ok(false) => return 0,
                Err(err) => eprintln!("error: {err:#}"),
            }
        }
    }

    /// Executes a single command line. `Ok(false)` ends the session.
    pub async fn execute(&self, line: &str) -> Result<bool> {
        let mut words = line.split_whitespace();
        let command = match words.next() {
            Some(command) => command,
            None => return Ok(true),
        };
        let rest: Vec<&str> = words.collect();

        match command {
            "help" | "?" => self.help(),
            "accounts" => {
                for (index, account) in self.accounts.iter().enumerate() {
                    println!("[{index}] {account:?}");
                }
            }
            "address" => println!("{:?}", self.contract.address()),
            "receipt" => {
                let hash: TxHash = rest
                    .first()
                    .ok_or_else(|| eyre!("usage: receipt <txhash>"))?
                    .parse()
                    .wrap_err("not a transaction hash")?;
                let receipt = self
                    .contract
                    .client()
                    .get_transaction_receipt(hash)
                    .await
                    .map_err(|e| eyre!(e.to_string()))?;
                match receipt {
                    Some(receipt) => println!("{receipt:#?}"),
                    None => println!("no receipt (pending or unknown)"),
                }
            }
            "call" => {
                let (name, entry, args) = self.method_args(&rest)?;
                let tokens = self.contract.call(&name, &args).await?;
                print_tokens(&tokens, &entry.outputs);
            }
            "send" => {
                let (positional, mut options) = split_tx_options(&rest)?;
                if options.from.is_none() {
                    options.from = Some(self.default_sender);
                }
                let (name, _, args) = self.method_args(&positional)?;
                let receipt = self.contract.transact(&name, &args, options).await?;
                println!(
                    "mined in block {} (tx {:?}, status {:?})",
                    receipt.block_number.map(|n| n.to_string()).unwrap_or_default(),
                    receipt.transaction_hash,
                    receipt.status,
                );
            }
            "quit" | "exit" => return Ok(false),
            other => bail!("unknown command `{other}`; type `help`"),
        }
        Ok(true)
    }

    fn help(&self) {
        println!("commands: call <fn> [args..] | send <fn> [args..] [--from A] [--value V] [--gas G] [--gas-price P]");
        println!("          accounts | address | receipt <txhash> | quit");
        println!();
        for entry in self.artifact.functions() {
            let kind = if entry.is_view() { "call" } else { "send" };
            println!("  [{kind}] {}", render_signature(entry));
        }
    }

    /// Resolves a method name and tokenizes its arguments.
    fn method_args<'a>(
        &'a self,
        words: &[&str],
    ) -> Result<(String, &'a crate::artifact::AbiEntry, Vec<Token>)> {
        let name = *words.first().ok_or_else(|| eyre!("usage: call|send <fn> [args..]"))?;
        let entry = self
            .artifact
            .function(name)
            .ok_or_else(|| eyre!("no method `{name}` in the contract ABI"))?;
        let args = parse_tokens(&entry.inputs, &words[1..])?;
        Ok((name.to_string(), entry, args))
    }
}

/// Parses raw argument strings against the expected ABI parameters.
pub fn parse_tokens(params: &[AbiParam], raw: &[&str]) -> Result<Vec<Token>> {
    if params.len() != raw.len() {
        bail!("expected {} argument(s), got {}", params.len(), raw.len());
    }
    params
        .iter()
        .zip(raw)
        .map(|(param, value)| {
            let kind = param.param_type()?;
            LenientTokenizer::tokenize(&kind, value)
                .wrap_err_with(|| format!("invalid `{}` value {value:?}", param.kind))
        })
        .collect()
}

/// Splits `--from/--value/--gas/--gas-price` flags out of a `send` command,
/// returning the remaining positional words and the parsed options.
pub fn split_tx_options<'a>(words: &[&'a str]) -> Result<(Vec<&'a str>, TxOptions)> {
    let mut positional = Vec::with_capacity(words.len());
    let mut options = TxOptions::default();

    let mut iter = words.iter();
    while let Some(&word) = iter.next() {
        if !word.starts_with("--") {
            positional.push(word);
            continue;
        }
        let value = *iter.next().ok_or_else(|| eyre!("{word} requires a value"))?;
        match word {
            "--from" => options.from = Some(value.parse::<Address>()?),
            "--value" => options.value = Some(parse_units(value)?),
            "--gas" => options.gas = Some(parse_units(value)?),
            "--gas-price" => options.gas_price = Some(parse_units(value)?),
            other => bail!("unknown option {other}"),
        }
    }
    Ok((positional, options))
}

fn parse_units(value: &str) -> Result<U256> {
    U256::from_dec_str(value).wrap_err_with(|| format!("invalid amount {value:?}"))
}

/// Pretty-prints decoded output tokens next to their declared types.
fn print_tokens(tokens: &[Token], outputs: &[AbiParam]) {
    if tokens.is_empty() {
        println!("()");
        return;
    }
    for (index, token) in tokens.iter().enumerate() {
        match outputs.get(index) {
            Some(output) if !output.name.is_empty() => {
                println!("{}: {token:?}", output.name)
            }
            _ => println!("{token:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers_core::abi::ParamType;

    fn param(kind: &str) -> AbiParam {
        AbiParam { name: String::new(), kind: kind.to_string(), components: Vec::new() }
    }

    #[test]
    fn tokenizes_arguments_against_the_abi() {
        let tokens = parse_tokens(
            &[param("address"), param("uint256"), param("bool")],
            &["0x00000000000000000000000000000000000000aa", "1000", "true"],
        )
        .unwrap();
        assert_eq!(tokens[1], Token::Uint(1000u64.into()));
        assert_eq!(tokens[2], Token::Bool(true));
        assert!(matches!(tokens[0], Token::Address(_)));
    }

    #[test]
    fn rejects_arity_mismatch() {
        assert!(parse_tokens(&[param("uint256")], &[]).is_err());
        assert!(parse_tokens(&[], &["1"]).is_err());
    }

    #[test]
    fn rejects_garbage_values() {
        assert!(parse_tokens(&[param("uint256")], &["not-a-number"]).is_err());
    }

    #[test]
    fn splits_tx_options_from_positional_args() {
        let (positional, options) = split_tx_options(&[
            "transfer",
            "0x00000000000000000000000000000000000000aa",
            "--value",
            "7",
            "--gas",
            "21000",
        ])
        .unwrap();
        assert_eq!(positional, ["transfer", "0x00000000000000000000000000000000000000aa"]);
        assert_eq!(options.value, Some(7u64.into()));
        assert_eq!(options.gas, Some(21000u64.into()));
        assert_eq!(options.from, None);
    }

    #[test]
    fn rejects_dangling_option() {
        assert!(split_tx_options(&["transfer", "--from"]).is_err());
        assert!(split_tx_options(&["--nope", "1"]).is_err());
    }

    #[test]
    fn tokenizer_handles_arrays() {
        let kind = ParamType::Array(Box::new(ParamType::Uint(256)));
        let token = LenientTokenizer::tokenize(&kind, "[1,2,3]").unwrap();
        assert_eq!(
            token,
            Token::Array(vec![
                Token::Uint(1u64.into()),
                Token::Uint(2u64.into()),
                Token::Uint(3u64.into())
            ])
        );
    }
}

//! Per-entry method synthesis: one bound method per ABI function, dispatched
//! as a read-only call or a transaction depending on the entry's mutability.

use super::types;
use crate::{
    artifact::AbiEntry,
    signature::render_signature,
    util::{expand_input_name, normalize_name, safe_ident},
};
use eyre::Result;
use proc_macro2::TokenStream;
use quote::quote;

/// Expands one function entry into a method bound to the inner contract
/// handle, forwarding the normalized arguments positionally.
///
/// `view` entries become plain calls; any other mutability (`pure` included)
/// takes a trailing transaction-options argument and resolves to the
/// transaction hash.
pub(crate) fn expand_function(entry: &AbiEntry) -> Result<TokenStream> {
    let raw_name = entry.name.as_deref().unwrap_or_default();
    let name = safe_ident(&normalize_name(raw_name));
    let doc = format!(" {}", render_signature(entry));

    let mut params = Vec::with_capacity(entry.inputs.len());
    let mut args = Vec::with_capacity(entry.inputs.len());
    for (index, input) in entry.inputs.iter().enumerate() {
        let arg = expand_input_name(index, &input.name);
        let ty = types::expand(&input.param_type()?)?;
        params.push(quote!(#arg: #ty));
        args.push(arg);
    }

    let expanded = if entry.is_view() {
        let ret = expand_outputs(entry)?;
        quote! {
            #[doc = #doc]
            pub fn #name(&self, #(#params),*) -> ContractCall<M, #ret> {
                self.0
                    .method(#raw_name, (#(#args,)*))
                    .expect("method not found (this should never happen)")
            }
        }
    } else {
        quote! {
            #[doc = #doc]
            pub fn #name(
                &self,
                #(#params,)*
                tx_options: TxOptions,
            ) -> ContractCall<M, ethers_core::types::H256> {
                let mut call = self.0
                    .method(#raw_name, (#(#args,)*))
                    .expect("method not found (this should never happen)");
                tx_options.apply(&mut call.tx);
                call
            }
        }
    };
    Ok(expanded)
}

/// Expands the decoded return type of a view entry: unit for none, the bare
/// type for one output, a tuple otherwise.
fn expand_outputs(entry: &AbiEntry) -> Result<TokenStream> {
    let mut outputs = Vec::with_capacity(entry.outputs.len());
    for output in &entry.outputs {
        outputs.push(types::expand(&output.param_type()?)?);
    }
    match outputs.len() {
        0 => Ok(quote!(())),
        1 => Ok(outputs.pop().unwrap()),
        _ => Ok(quote!(( #( #outputs ),* ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::AbiParam;

    fn entry(mutability: &str, outputs: Vec<AbiParam>) -> AbiEntry {
        AbiEntry {
            kind: "function".to_string(),
            name: Some("poke".to_string()),
            inputs: vec![AbiParam {
                name: "target".to_string(),
                kind: "address".to_string(),
                components: Vec::new(),
            }],
            outputs,
            state_mutability: Some(mutability.to_string()),
        }
    }

    #[test]
    fn view_methods_call_without_options() {
        let tokens = expand_function(&entry("view", vec![])).unwrap().to_string();
        assert!(!tokens.contains("tx_options"));
        assert!(tokens.contains("ContractCall < M , () >"));
    }

    #[test]
    fn pure_entries_take_options() {
        let tokens = expand_function(&entry("pure", vec![])).unwrap().to_string();
        assert!(tokens.contains("tx_options : TxOptions"));
        assert!(tokens.contains("H256"));
    }

    #[test]
    fn state_changing_methods_take_options() {
        for mutability in ["nonpayable", "payable"] {
            let tokens = expand_function(&entry(mutability, vec![])).unwrap().to_string();
            assert!(tokens.contains("tx_options : TxOptions"));
            assert!(tokens.contains("H256"));
        }
    }

    #[test]
    fn single_output_is_unwrapped() {
        let output = AbiParam {
            name: String::new(),
            kind: "uint256".to_string(),
            components: Vec::new(),
        };
        let tokens = expand_function(&entry("view", vec![output])).unwrap().to_string();
        assert!(tokens.contains("ContractCall < M , ethers_core :: types :: U256 >"));
    }

    #[test]
    fn keyword_arguments_are_escaped() {
        let mut e = entry("view", vec![]);
        e.inputs[0].name = "type".to_string();
        let tokens = expand_function(&e).unwrap().to_string();
        assert!(tokens.contains("type_ : ethers_core :: types :: Address"));
    }
}

//! Expansion of ABI parameter types to their Rust equivalents.

use eyre::{bail, ensure, Result};
use ethers_core::abi::ParamType;
use proc_macro2::{Literal, TokenStream};
use quote::quote;

/// Expands an ABI type to the Rust type used in generated method signatures.
pub(crate) fn expand(kind: &ParamType) -> Result<TokenStream> {
    match kind {
        ParamType::Address => Ok(quote!(ethers_core::types::Address)),
        ParamType::Bytes => Ok(quote!(ethers_core::types::Bytes)),
        ParamType::Int(n) => match n / 8 {
            1 => Ok(quote!(i8)),
            2 => Ok(quote!(i16)),
            3..=4 => Ok(quote!(i32)),
            5..=8 => Ok(quote!(i64)),
            9..=16 => Ok(quote!(i128)),
            17..=32 => Ok(quote!(ethers_core::types::I256)),
            _ => bail!("unsupported solidity type int{n}"),
        },
        ParamType::Uint(n) => match n / 8 {
            1 => Ok(quote!(u8)),
            2 => Ok(quote!(u16)),
            3..=4 => Ok(quote!(u32)),
            5..=8 => Ok(quote!(u64)),
            9..=16 => Ok(quote!(u128)),
            17..=32 => Ok(quote!(ethers_core::types::U256)),
            _ => bail!("unsupported solidity type uint{n}"),
        },
        ParamType::Bool => Ok(quote!(bool)),
        ParamType::String => Ok(quote!(::std::string::String)),
        ParamType::Array(ty) => Ok(array(expand(ty)?, None)),
        ParamType::FixedBytes(n) => Ok(array(quote!(u8), Some(*n))),
        ParamType::FixedArray(ty, n) => Ok(array(expand(ty)?, Some(*n))),
        ParamType::Tuple(members) => {
            ensure!(!members.is_empty(), "tuple must have at least 1 member");
            let members = members.iter().map(expand).collect::<Result<Vec<_>>>()?;
            Ok(quote!(( #( #members ),* )))
        }
    }
}

fn array(ty: TokenStream, size: Option<usize>) -> TokenStream {
    match size {
        None => quote!(::std::vec::Vec<#ty>),
        Some(size) => {
            let size = Literal::usize_unsuffixed(size);
            quote!([#ty; #size])
        }
    }
}

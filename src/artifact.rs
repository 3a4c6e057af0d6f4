//! Loading of compiler artifacts: the `contractName` + `abi` + `bytecode`
//! JSON document that the contract compiler writes out.

use crate::{error::ArtifactError, util::normalize_name};
use ethers_core::{
    abi::{param_type::Reader, Abi, ParamType},
    types::Bytes,
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// A parsed compiler artifact.
///
/// Immutable once loaded; the source of truth for binding generation and
/// deployment. The ABI is kept twice: parsed into [`Abi`] for encoding and
/// dispatch, and as raw [`AbiEntry`] items because `ethabi` groups functions
/// by name and loses the declaration order the generator preserves.
#[derive(Debug, Clone)]
pub struct ContractArtifact {
    /// Human readable contract name, as emitted by the compiler.
    pub contract_name: String,
    /// The parsed contract ABI.
    pub abi: Abi,
    /// The raw ABI items in their original order.
    pub entries: Vec<AbiEntry>,
    /// Deployable creation bytecode.
    pub bytecode: Bytes,
}

/// One raw ABI item, kept in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbiEntry {
    /// The item kind: `function`, `constructor`, `event`, ...
    #[serde(rename = "type")]
    pub kind: String,
    /// Item name; constructors have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub inputs: Vec<AbiParam>,
    #[serde(default)]
    pub outputs: Vec<AbiParam>,
    /// `view` entries are read-only; anything else transacts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_mutability: Option<String>,
}

/// An input/output of an ABI item, or a nested tuple component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbiParam {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<AbiParam>,
}

/// The artifact fields before the ABI value is parsed twice.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    contract_name: String,
    abi: serde_json::Value,
    bytecode: Bytes,
}

impl ContractArtifact {
    /// Reads and parses an artifact file. Malformed or missing fields are
    /// fatal; there is no recovery path.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Parses an artifact from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, ArtifactError> {
        let raw: RawArtifact = serde_json::from_str(json)?;
        let abi: Abi = serde_json::from_value(raw.abi.clone())?;
        let entries: Vec<AbiEntry> = serde_json::from_value(raw.abi)?;
        Ok(Self { contract_name: raw.contract_name, abi, entries, bytecode: raw.bytecode })
    }

    /// The normalized name used for the generated struct and its file.
    pub fn class_name(&self) -> String {
        normalize_name(&self.contract_name)
    }

    /// All function entries, in ABI-list order.
    pub fn functions(&self) -> impl Iterator<Item = &AbiEntry> {
        self.entries.iter().filter(|e| e.kind == "function")
    }

    /// The constructor entry, if the contract declares one. The ABI format
    /// allows at most one.
    pub fn constructor(&self) -> Option<&AbiEntry> {
        self.entries.iter().find(|e| e.kind == "constructor")
    }

    /// Looks a function entry up by its normalized or original name.
    pub fn function(&self, name: &str) -> Option<&AbiEntry> {
        self.functions().find(|e| {
            e.name.as_deref().map_or(false, |n| n == name || normalize_name(n) == name)
        })
    }
}

impl AbiEntry {
    /// Whether the entry is read-only and can be dispatched as an `eth_call`.
    /// Only `view` qualifies; `pure` and every other mutability transacts.
    pub fn is_view(&self) -> bool {
        self.state_mutability.as_deref() == Some("view")
    }
}

impl AbiParam {
    /// Resolves the textual type to an `ethabi` [`ParamType`]. Tuples are
    /// described by their `components` rather than the type string.
    pub fn param_type(&self) -> Result<ParamType, ethers_core::abi::Error> {
        if let Some(suffix) = self.kind.strip_prefix("tuple") {
            let members = self
                .components
                .iter()
                .map(AbiParam::param_type)
                .collect::<Result<Vec<_>, _>>()?;
            let mut ty = ParamType::Tuple(members);
            // apply array suffixes like `[]` or `[2][]` outside-in
            for part in parse_array_suffix(suffix)? {
                ty = match part {
                    Some(len) => ParamType::FixedArray(Box::new(ty), len),
                    None => ParamType::Array(Box::new(ty)),
                };
            }
            return Ok(ty)
        }
        Reader::read(&self.kind)
    }
}

/// Parses the trailing `[]`/`[N]` pairs of a tuple type declaration.
fn parse_array_suffix(mut s: &str) -> Result<Vec<Option<usize>>, ethers_core::abi::Error> {
    let mut parts = Vec::new();
    while !s.is_empty() {
        let rest = s
            .strip_prefix('[')
            .ok_or_else(|| ethers_core::abi::Error::InvalidName(s.to_string()))?;
        let close = rest
            .find(']')
            .ok_or_else(|| ethers_core::abi::Error::InvalidName(s.to_string()))?;
        let inner = &rest[..close];
        if inner.is_empty() {
            parts.push(None);
        } else {
            let len = inner
                .parse::<usize>()
                .map_err(|_| ethers_core::abi::Error::InvalidName(s.to_string()))?;
            parts.push(Some(len));
        }
        s = &rest[close + 1..];
    }
    Ok(parts)
}

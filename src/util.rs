//! Identifier sanitization for generated bindings and method dispatch.

use proc_macro2::{Ident, Span};

/// Creates a new Ident with the given string at [`Span::call_site`].
///
/// # Panics
///
/// If the input string is neither a keyword nor a legal variable name.
pub(crate) fn ident(name: &str) -> Ident {
    Ident::new(name, Span::call_site())
}

/// Expands an identifier string into a token, appending `_` if the identifier
/// is a reserved keyword.
///
/// Parsing keywords like `self` can fail, in this case we add an underscore.
pub(crate) fn safe_ident(name: &str) -> Ident {
    syn::parse_str::<Ident>(name).unwrap_or_else(|_| ident(&format!("{name}_")))
}

/// Maps an arbitrary contract, function or argument name to a valid Rust
/// identifier.
///
/// Every character outside the ASCII letter set becomes an underscore, and a
/// result that collides with a reserved keyword gets a trailing underscore.
/// Distinct inputs may normalize to the same identifier; callers accept that
/// collision risk.
pub fn normalize_name(name: &str) -> String {
    let mapped: String =
        name.chars().map(|c| if c.is_ascii_alphabetic() { c } else { '_' }).collect();
    if mapped.is_empty() {
        return "_".to_string()
    }
    safe_ident(&mapped).to_string()
}

/// Expands a positional parameter name that may be empty.
pub(crate) fn expand_input_name(index: usize, name: &str) -> Ident {
    match name {
        "" => ident(&format!("p{index}")),
        n => safe_ident(&normalize_name(n)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_to_letters_and_underscores() {
        for name in ["My Token!", "a-b.c", "1337", "weird名前", "ok"] {
            let normalized = normalize_name(name);
            assert!(
                normalized.chars().all(|c| c.is_ascii_alphabetic() || c == '_'),
                "{normalized:?} contains more than letters and underscores"
            );
        }
    }

    #[test]
    fn normalizes_contract_name() {
        assert_eq!(normalize_name("My Token!"), "My_Token_");
        assert_eq!(normalize_name("ERC20"), "ERC__");
        assert_eq!(normalize_name("plain"), "plain");
    }

    #[test]
    fn keywords_get_trailing_underscore() {
        assert_eq!(normalize_name("fn"), "fn_");
        assert_eq!(normalize_name("self"), "self_");
        assert_eq!(normalize_name("move"), "move_");
    }

    #[test]
    fn empty_input_names_are_positional() {
        assert_eq!(expand_input_name(0, "").to_string(), "p0");
        assert_eq!(expand_input_name(2, "who").to_string(), "who");
        assert_eq!(expand_input_name(1, "type").to_string(), "type_");
    }
}

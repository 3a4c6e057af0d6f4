//! Rendering of human readable method signatures, used as the doc string of
//! every generated method and as the interactive session's `help` output.

use crate::artifact::AbiEntry;

/// Renders a one-line signature for an ABI entry:
/// `name(type: argname, ...) -> (type: outname, ...)`.
///
/// Entries without outputs get no `->` segment at all, and an output with an
/// empty name renders as its bare type.
pub fn render_signature(entry: &AbiEntry) -> String {
    let args = entry
        .inputs
        .iter()
        .map(|p| format!("{}: {}", p.kind, p.name))
        .collect::<Vec<_>>()
        .join(", ");

    let mut rendered = format!("{}({args})", entry.name.as_deref().unwrap_or_default());

    if !entry.outputs.is_empty() {
        let returns = entry
            .outputs
            .iter()
            .map(|p| {
                if p.name.is_empty() {
                    p.kind.clone()
                } else {
                    format!("{}: {}", p.kind, p.name)
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        rendered.push_str(&format!(" -> ({returns})"));
    }

    rendered
}

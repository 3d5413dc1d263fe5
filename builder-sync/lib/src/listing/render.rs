use std::fmt::Write;

use num_format::{Locale, ToFormattedString};

use crate::regenerate::Regenerated;
use crate::registry::RegistryEntry;

const HEADER: &str = "use crate::{Builder, Signing};";
const MATCHED_DOC: &str = "/// List of known builders with their details, ordered by block production.";
const MATCHED_STATIC: &str = "BUILDERS";
const UNMATCHED_DOC: &str = "/// Other builders without recent block production data.";
const UNMATCHED_STATIC: &str = "OTHER_BUILDERS";
const NO_DATA_COMMENT: &str = "// No recent block data";
const INDENT: &str = "    ";

/// Renders one entry as a `Builder { .. }` literal indented for an array.
///
/// Strings are written as Rust string literals with escapes, so any value
/// read from the listing is written back unchanged.
pub fn render_entry(entry: &RegistryEntry) -> String {
    let mut out = String::new();
    let field = format!("{INDENT}{INDENT}");

    let _ = writeln!(out, "{INDENT}Builder {{");
    let _ = writeln!(out, "{field}name: {:?},", entry.name);
    let _ = writeln!(out, "{field}identifier: {:?},", entry.identifier);
    let _ = writeln!(out, "{field}website: {:?},", entry.website);
    let _ = writeln!(out, "{field}searcher_rpc: {:?},", entry.searcher_rpc);
    let _ = writeln!(out, "{field}mev_share_rpc: {},", optional(entry.mev_share_rpc.as_deref()));
    let _ = writeln!(out, "{field}extra_data: {},", optional(entry.key()));
    let _ = writeln!(out, "{field}signing: Signing::{},", entry.signing.as_str());
    let _ = writeln!(out, "{field}account_required: {},", entry.account_required);
    let _ = writeln!(out, "{INDENT}}},");

    out
}

fn optional(value: Option<&str>) -> String {
    match value {
        Some(value) if !value.is_empty() => format!("Some({value:?})"),
        _ => "None".to_string(),
    }
}

/// Renders the whole listing: ranked builders in `BUILDERS`, each preceded
/// by its block count, then the rest in `OTHER_BUILDERS`.
pub fn render_listing(regenerated: &Regenerated) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{HEADER}");
    let _ = writeln!(out);
    let _ = writeln!(out, "{MATCHED_DOC}");
    let _ = writeln!(out, "pub static {MATCHED_STATIC}: &[Builder] = &[");
    for ranked in &regenerated.matched {
        let _ = writeln!(
            out,
            "{INDENT}// Blocks: {}",
            ranked.blocks.to_formatted_string(&Locale::en)
        );
        out.push_str(&render_entry(&ranked.entry));
    }
    let _ = writeln!(out, "];");
    let _ = writeln!(out);
    let _ = writeln!(out, "{UNMATCHED_DOC}");
    let _ = writeln!(out, "pub static {UNMATCHED_STATIC}: &[Builder] = &[");
    for entry in &regenerated.unmatched {
        let _ = writeln!(out, "{INDENT}{NO_DATA_COMMENT}");
        out.push_str(&render_entry(entry));
    }
    let _ = writeln!(out, "];");

    out
}

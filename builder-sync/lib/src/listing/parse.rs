use syn::{Expr, ExprStruct, Item, Lit, Member};
use tracing::{debug, warn};

use super::{OptionalText, ParsedEntry};

const ENTRY_TYPE: &str = "Builder";

/// Parses every `Builder { .. }` literal in the listing, in source order.
///
/// Literals are collected from the array initialisers of `static` and
/// `const` items. Other items are ignored.
///
/// ## Errors
///
/// Returns the `syn` error when `source` is not valid Rust.
pub fn parse_listing(source: &str) -> Result<Vec<ParsedEntry>, syn::Error> {
    let file = syn::parse_file(source)?;
    let mut entries = Vec::new();

    for item in &file.items {
        let (ident, expr) = match item {
            Item::Static(item) => (&item.ident, item.expr.as_ref()),
            Item::Const(item) => (&item.ident, item.expr.as_ref()),
            _ => continue,
        };

        let before = entries.len();
        collect_entries(expr, &mut entries);
        debug!(item = %ident, entries = entries.len() - before, "Parsed listing item");
    }

    Ok(entries)
}

fn collect_entries(expr: &Expr, entries: &mut Vec<ParsedEntry>) {
    match expr {
        Expr::Reference(reference) => collect_entries(&reference.expr, entries),
        Expr::Paren(paren) => collect_entries(&paren.expr, entries),
        Expr::Array(array) => {
            for elem in &array.elems {
                collect_entries(elem, entries);
            }
        }
        Expr::Struct(literal) if is_entry_literal(literal) => entries.push(parse_entry(literal)),
        _ => {}
    }
}

fn is_entry_literal(literal: &ExprStruct) -> bool {
    literal
        .path
        .segments
        .last()
        .is_some_and(|segment| segment.ident == ENTRY_TYPE)
}

fn parse_entry(literal: &ExprStruct) -> ParsedEntry {
    let mut entry = ParsedEntry::default();

    for field in &literal.fields {
        let Member::Named(ident) = &field.member else {
            continue;
        };
        let name = ident.to_string();
        let expr = &field.expr;

        match name.as_str() {
            "name" => entry.name = string_literal(expr),
            "identifier" => entry.identifier = string_literal(expr),
            "website" => entry.website = string_literal(expr),
            "searcher_rpc" => entry.searcher_rpc = string_literal(expr),
            "mev_share_rpc" => entry.mev_share_rpc = optional_text(&name, expr),
            "extra_data" => entry.extra_data = optional_text(&name, expr),
            "signing" => entry.signing = last_path_segment(expr),
            "account_required" => entry.account_required = bool_literal(expr),
            other => debug!(field = other, "Ignoring unknown builder field"),
        }
    }

    entry
}

fn string_literal(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Lit(lit) => match &lit.lit {
            Lit::Str(s) => Some(s.value()),
            _ => None,
        },
        _ => None,
    }
}

fn bool_literal(expr: &Expr) -> Option<bool> {
    match expr {
        Expr::Lit(lit) => match &lit.lit {
            Lit::Bool(b) => Some(b.value),
            _ => None,
        },
        _ => None,
    }
}

fn last_path_segment(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Path(path) => path.path.segments.last().map(|s| s.ident.to_string()),
        _ => None,
    }
}

/// `None`, `Some("..")` or an unrecognised form (read as absent).
fn optional_text(field: &str, expr: &Expr) -> OptionalText {
    match expr {
        Expr::Path(path) if path.path.is_ident("None") => OptionalText::Empty,
        Expr::Call(call) if matches!(call.func.as_ref(), Expr::Path(p) if p.path.is_ident("Some")) => {
            match call.args.first().and_then(string_literal) {
                Some(value) if value.is_empty() => OptionalText::Empty,
                Some(value) => OptionalText::Value(value),
                None => {
                    warn!(field, "Unrecognised Some(..) argument; treating as absent");
                    OptionalText::Absent
                }
            }
        }
        _ => {
            warn!(field, "Unrecognised optional field value; treating as absent");
            OptionalText::Absent
        }
    }
}

use tracing::warn;

use super::ParsedEntry;
use crate::error::RegistryError;
use crate::registry::{RegistryEntry, Signing};

/// Converts parsed literals into registry entries.
///
/// Every required field (`name`, `identifier`, `website`, `searcher_rpc`,
/// `signing`, `account_required`) must be present and, for text fields,
/// non-empty. Missing optional fields become `None`.
///
/// ## Errors
///
/// [`RegistryError::IncompleteEntry`] for the first entry with missing
/// required fields, or [`RegistryError::InvalidSigning`] for an unknown
/// `Signing` variant. Entry indexes are 1-based in listing order.
pub fn validate_entries(parsed: Vec<ParsedEntry>) -> Result<Vec<RegistryEntry>, RegistryError> {
    parsed
        .into_iter()
        .enumerate()
        .map(|(i, entry)| validate_entry(i + 1, entry))
        .collect()
}

fn validate_entry(index: usize, entry: ParsedEntry) -> Result<RegistryEntry, RegistryError> {
    let mut missing = Vec::new();
    let text = |value: Option<String>, field: &'static str, missing: &mut Vec<&'static str>| {
        match value.filter(|v| !v.is_empty()) {
            Some(v) => v,
            None => {
                missing.push(field);
                String::new()
            }
        }
    };

    let label = entry
        .name
        .clone()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "<unnamed>".to_string());

    let name = text(entry.name, "name", &mut missing);
    let identifier = text(entry.identifier, "identifier", &mut missing);
    let website = text(entry.website, "website", &mut missing);
    let searcher_rpc = text(entry.searcher_rpc, "searcher_rpc", &mut missing);
    if entry.signing.is_none() {
        missing.push("signing");
    }
    if entry.account_required.is_none() {
        missing.push("account_required");
    }

    let (Some(signing), Some(account_required), true) =
        (entry.signing, entry.account_required, missing.is_empty())
    else {
        return Err(RegistryError::IncompleteEntry {
            index,
            name: label,
            missing: missing.join(", "),
        });
    };

    let signing: Signing = signing
        .parse()
        .map_err(|value| RegistryError::InvalidSigning { index, value })?;

    if entry.extra_data.is_absent() {
        warn!(index, name = %name, "Builder has no extra_data field; it cannot be matched");
    }

    Ok(RegistryEntry {
        name,
        identifier,
        website,
        searcher_rpc,
        mev_share_rpc: entry.mev_share_rpc.into_option(),
        extra_data: entry.extra_data.into_option(),
        signing,
        account_required,
    })
}

//! Re-ranks the registry listing by observed block production.
//!
//! The listing is parsed, each entry is matched against the aggregated
//! counts with the lenient candidates in [`crate::registry::matching`],
//! and the file is rewritten with ranked builders in `BUILDERS` and the
//! rest in `OTHER_BUILDERS`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::error::RegistryError;
use crate::listing::{parse_listing, render_listing, validate_entries};
use crate::persist::write_atomic;
use crate::registry::{RegistryEntry, match_count};
use crate::stats::{FlatCountTable, read_counts};

/// A registry entry with a non-zero block count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub entry: RegistryEntry,
    pub blocks: u64,
}

/// The registry split by whether any blocks were attributed to an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Regenerated {
    /// Highest block count first, ties by name.
    pub matched: Vec<RankedEntry>,
    /// In their original relative order.
    pub unmatched: Vec<RegistryEntry>,
}

impl Regenerated {
    /// Number of entries across both groups.
    pub fn len(&self) -> usize {
        self.matched.len() + self.unmatched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Matches every entry against `counts` and orders the result.
///
/// Entries without a key, or whose key has no count under any candidate,
/// are unmatched. Entries sharing a key are each matched on their own.
///
/// ## Examples
///
/// ```
/// use builder_sync::{FlatCountTable, RegistryEntry, Signing, rank_entries};
///
/// let entry = |name: &str, key: &str| RegistryEntry {
///     name: name.into(),
///     identifier: name.to_lowercase(),
///     website: format!("https://{name}.example"),
///     searcher_rpc: format!("https://rpc.{name}.example"),
///     mev_share_rpc: None,
///     extra_data: Some(key.into()),
///     signing: Signing::NotSupported,
///     account_required: false,
/// };
/// let counts = FlatCountTable::from([("foo".to_string(), 5), ("bar".to_string(), 9)]);
///
/// let ranked = rank_entries(
///     vec![entry("Foo", "HTTPS://Foo"), entry("Bar", "bar"), entry("Baz", "baz")],
///     &counts,
/// );
///
/// assert_eq!(ranked.matched[0].entry.name, "Bar");
/// assert_eq!(ranked.matched[1].blocks, 5);
/// assert_eq!(ranked.unmatched[0].name, "Baz");
/// ```
pub fn rank_entries(entries: Vec<RegistryEntry>, counts: &FlatCountTable) -> Regenerated {
    warn_duplicate_keys(&entries);

    let mut regenerated = Regenerated::default();
    for entry in entries {
        let blocks = entry.key().map_or(0, |key| match_count(key, counts));
        if blocks > 0 {
            regenerated.matched.push(RankedEntry { entry, blocks });
        } else {
            regenerated.unmatched.push(entry);
        }
    }

    regenerated.matched.sort_by(|a, b| {
        b.blocks
            .cmp(&a.blocks)
            .then_with(|| a.entry.name.cmp(&b.entry.name))
    });

    regenerated
}

fn warn_duplicate_keys(entries: &[RegistryEntry]) {
    let mut by_key: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for entry in entries {
        if let Some(key) = entry.key() {
            by_key.entry(key).or_default().push(entry.name.as_str());
        }
    }

    for (key, names) in by_key.into_iter().filter(|(_, names)| names.len() > 1) {
        warn!(key, builders = %names.join(", "), "Builders share an extra_data key");
    }
}

/// Rewrites the listing at `listing_path` ranked by the counts in
/// `counts_path`.
///
/// The listing is replaced atomically and only after the rendered text
/// parses back to the same number of entries; on any error the listing is
/// left as it was.
///
/// ## Errors
///
/// - [`RegistryError::Counts`] if the counts file is missing or invalid
/// - [`RegistryError::EmptyCounts`] if it holds no keys
/// - [`RegistryError::Read`] / [`RegistryError::Syntax`] for an unreadable listing
/// - [`RegistryError::NoEntries`] if the listing has no `Builder` literals
/// - [`RegistryError::IncompleteEntry`] / [`RegistryError::InvalidSigning`]
/// - [`RegistryError::GeneratedInvalid`] if the rendered text fails to re-parse
#[instrument(fields(listing = %listing_path.display(), counts = %counts_path.display()))]
pub fn regenerate_listing(listing_path: &Path, counts_path: &Path) -> Result<Regenerated, RegistryError> {
    let counts = read_counts(counts_path)?;
    if counts.is_empty() {
        return Err(RegistryError::EmptyCounts {
            path: counts_path.display().to_string(),
        });
    }
    info!(keys = counts.len(), "Loaded aggregated counts");

    let listing = listing_path.display().to_string();
    let source = fs::read_to_string(listing_path).map_err(|source| RegistryError::Read {
        path: listing.clone(),
        source,
    })?;

    let parsed = parse_listing(&source).map_err(|e| RegistryError::Syntax {
        path: listing.clone(),
        message: e.to_string(),
    })?;
    if parsed.is_empty() {
        return Err(RegistryError::NoEntries { path: listing });
    }
    debug!(entries = parsed.len(), "Parsed listing");

    let entries = validate_entries(parsed)?;
    let expected = entries.len();

    let regenerated = rank_entries(entries, &counts);
    let rendered = render_listing(&regenerated);
    verify_rendered(&rendered, expected)?;

    write_atomic(listing_path, &rendered).map_err(|source| RegistryError::Write {
        path: listing,
        source,
    })?;

    info!(
        matched = regenerated.matched.len(),
        unmatched = regenerated.unmatched.len(),
        "Regenerated listing"
    );
    Ok(regenerated)
}

fn verify_rendered(rendered: &str, expected: usize) -> Result<(), RegistryError> {
    let reparsed = parse_listing(rendered).map_err(|e| RegistryError::GeneratedInvalid {
        message: e.to_string(),
    })?;
    let entries = validate_entries(reparsed).map_err(|e| RegistryError::GeneratedInvalid {
        message: e.to_string(),
    })?;

    if entries.len() != expected {
        return Err(RegistryError::GeneratedInvalid {
            message: format!("expected {expected} entries, found {}", entries.len()),
        });
    }
    Ok(())
}

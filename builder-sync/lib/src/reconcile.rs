//! Strict consistency check between the registry and a stats snapshot.
//!
//! Keys are compared byte for byte. Lenient matching only applies when the
//! listing is regenerated; here a near miss is reported so it gets fixed in
//! the registry data.

use std::collections::HashSet;
use std::fmt::Write;
use std::path::Path;

use num_format::{Locale, ToFormattedString};
use tracing::{info, instrument};

use crate::error::RegistryError;
use crate::registry::{RegistryEntry, load_registry_json};
use crate::stats::{FlatCountTable, read_counts};

const RULE_WIDTH: usize = 50;

/// Differences between the registry and a counts table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Stats keys no registry entry claims, sorted by key.
    pub stats_only: Vec<(String, u64)>,
    /// Registry entries whose key is absent from the stats, sorted by name.
    pub registry_only: Vec<RegistryEntry>,
    /// Registry entries with no key, sorted by name. Informational.
    pub without_key: Vec<RegistryEntry>,
}

impl ReconcileReport {
    /// True when either actionable section is non-empty.
    pub fn has_issues(&self) -> bool {
        !self.stats_only.is_empty() || !self.registry_only.is_empty()
    }

    /// Human-readable report, one section per non-empty category.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let rule = "=".repeat(RULE_WIDTH);

        if !self.stats_only.is_empty() {
            let _ = writeln!(out, "❌ Stats entries not found in builders.json:");
            let _ = writeln!(out, "{rule}");
            for (key, blocks) in &self.stats_only {
                let _ = writeln!(
                    out,
                    "  - '{key}' ({} blocks)",
                    blocks.to_formatted_string(&Locale::en)
                );
            }
            let _ = writeln!(out);
        }

        if !self.registry_only.is_empty() {
            let _ = writeln!(out, "❌ Builders with extra_data not found in builders_stats.json:");
            let _ = writeln!(out, "{rule}");
            for entry in &self.registry_only {
                let _ = writeln!(
                    out,
                    "  - {} (identifier: {}, extra_data: '{}')",
                    entry.name,
                    entry.identifier,
                    entry.key().unwrap_or_default()
                );
            }
            let _ = writeln!(out);
        }

        if !self.without_key.is_empty() {
            let _ = writeln!(out, "⚠️  Builders without extra_data (cannot be matched with stats):");
            let _ = writeln!(out, "{rule}");
            for entry in &self.without_key {
                let _ = writeln!(out, "  - {} (identifier: {})", entry.name, entry.identifier);
            }
            let _ = writeln!(out);
        }

        if !self.has_issues() && self.without_key.is_empty() {
            let _ = writeln!(out, "✅ All builders and stats are properly matched!");
        }

        out
    }
}

/// Compares registry keys with table keys by exact equality.
///
/// ## Examples
///
/// ```
/// use builder_sync::{FlatCountTable, RegistryEntry, Signing, reconcile};
///
/// let entry = |name: &str, key: &str| RegistryEntry {
///     name: name.into(),
///     identifier: name.to_lowercase(),
///     website: "https://example.org".into(),
///     searcher_rpc: "https://rpc.example.org".into(),
///     mev_share_rpc: None,
///     extra_data: Some(key.into()),
///     signing: Signing::NotSupported,
///     account_required: false,
/// };
/// let counts = FlatCountTable::from([("Y".to_string(), 1), ("Z".to_string(), 2)]);
///
/// let report = reconcile(&[entry("x", "X"), entry("y", "Y")], &counts);
///
/// assert_eq!(report.stats_only, [("Z".to_string(), 2)]);
/// assert_eq!(report.registry_only[0].name, "x");
/// assert!(report.has_issues());
/// ```
pub fn reconcile(entries: &[RegistryEntry], counts: &FlatCountTable) -> ReconcileReport {
    let registry_keys: HashSet<&str> = entries.iter().filter_map(RegistryEntry::key).collect();

    let stats_only: Vec<(String, u64)> = counts
        .iter()
        .filter(|(key, _)| !registry_keys.contains(key.as_str()))
        .map(|(key, blocks)| (key.clone(), *blocks))
        .collect();

    let (keyed, without_key): (Vec<&RegistryEntry>, Vec<&RegistryEntry>) =
        entries.iter().partition(|entry| entry.key().is_some());

    let mut registry_only: Vec<RegistryEntry> = keyed
        .into_iter()
        .filter(|entry| entry.key().is_some_and(|key| !counts.contains_key(key)))
        .cloned()
        .collect();
    registry_only.sort_by(|a, b| a.name.cmp(&b.name));

    let mut without_key: Vec<RegistryEntry> = without_key.into_iter().cloned().collect();
    without_key.sort_by(|a, b| a.name.cmp(&b.name));

    ReconcileReport {
        stats_only,
        registry_only,
        without_key,
    }
}

/// Loads the JSON registry and the stats snapshot and reconciles them.
#[instrument(fields(registry = %registry_path.display(), stats = %stats_path.display()))]
pub fn check_consistency(registry_path: &Path, stats_path: &Path) -> Result<ReconcileReport, RegistryError> {
    let entries = load_registry_json(registry_path)?;
    let counts = read_counts(stats_path)?;

    let report = reconcile(&entries, &counts);
    info!(
        stats_only = report.stats_only.len(),
        registry_only = report.registry_only.len(),
        without_key = report.without_key.len(),
        "Reconciled registry"
    );
    Ok(report)
}

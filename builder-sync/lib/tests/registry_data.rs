//! Checks the committed `mev-builders` data against the listing tools.

use std::fs;
use std::path::PathBuf;

use builder_sync::listing::{parse_listing, validate_entries};
use builder_sync::registry::load_registry_json;
use builder_sync::stats::read_counts;
use builder_sync::{RegistryEntry, check_consistency, regenerate_listing};
use tempfile::TempDir;

fn data_crate() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../mev-builders")
}

fn listing_entries() -> Vec<RegistryEntry> {
    let source = fs::read_to_string(data_crate().join("src/builders.rs")).unwrap();
    validate_entries(parse_listing(&source).unwrap()).unwrap()
}

fn by_name(mut entries: Vec<RegistryEntry>) -> Vec<RegistryEntry> {
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}

#[test]
fn listing_parses_completely() {
    let entries = listing_entries();
    assert!(entries.len() >= 5);
}

#[test]
fn listing_matches_registry_json() {
    let json = load_registry_json(&data_crate().join("data/builders.json")).unwrap();
    assert_eq!(by_name(listing_entries()), by_name(json));
}

#[test]
fn registry_json_is_consistent_with_snapshot() {
    let report = check_consistency(
        &data_crate().join("data/builders.json"),
        &data_crate().join("data/builders_stats.json"),
    )
    .unwrap();

    assert!(!report.has_issues(), "{}", report.render());
}

#[test]
fn regenerating_from_snapshot_keeps_listing() {
    let dir = TempDir::new().unwrap();
    let listing = dir.path().join("builders.rs");
    let original = fs::read_to_string(data_crate().join("src/builders.rs")).unwrap();
    fs::write(&listing, &original).unwrap();

    let counts = data_crate().join("data/builders_stats.json");
    let regenerated = regenerate_listing(&listing, &counts).unwrap();

    assert_eq!(regenerated.len(), listing_entries().len());
    assert_eq!(regenerated.matched.len(), read_counts(&counts).unwrap().len());
    assert_eq!(fs::read_to_string(&listing).unwrap(), original);
}

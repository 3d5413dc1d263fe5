//! The aggregated `{ key: blocks }` JSON file.
//!
//! The same shape is used for the aggregated output of the stats command and
//! for the stats snapshot read by the consistency check.

use std::fs;
use std::path::Path;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{debug, info, instrument};

use super::FlatCountTable;
use crate::error::StatsError;
use crate::persist::write_atomic;

/// Entries ordered by block count, highest first, with ties by key.
pub fn sorted_counts(table: &FlatCountTable) -> Vec<(&str, u64)> {
    let mut entries: Vec<(&str, u64)> = table.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries
}

/// Serializes as a JSON object whose keys follow [`sorted_counts`] order.
struct OrderedCounts<'a>(Vec<(&'a str, u64)>);

impl Serialize for OrderedCounts<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, blocks) in &self.0 {
            map.serialize_entry(key, blocks)?;
        }
        map.end()
    }
}

/// Writes `table` as pretty JSON, sorted descending by count.
///
/// The file is replaced atomically; on error any previous content is kept.
#[instrument(skip(table), fields(path = %path.display(), keys = table.len()))]
pub fn write_counts(path: &Path, table: &FlatCountTable) -> Result<(), StatsError> {
    let mut json = serde_json::to_string_pretty(&OrderedCounts(sorted_counts(table))).map_err(
        |source| StatsError::Json {
            path: path.display().to_string(),
            source,
        },
    )?;
    json.push('\n');

    write_atomic(path, &json).map_err(|source| StatsError::Write {
        path: path.display().to_string(),
        source,
    })?;

    info!("Wrote aggregated counts");
    Ok(())
}

/// Reads a `{ key: blocks }` JSON object.
#[instrument(fields(path = %path.display()))]
pub fn read_counts(path: &Path) -> Result<FlatCountTable, StatsError> {
    let content = fs::read_to_string(path).map_err(|source| StatsError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let table: FlatCountTable =
        serde_json::from_str(&content).map_err(|source| StatsError::Json {
            path: path.display().to_string(),
            source,
        })?;

    debug!(keys = table.len(), "Loaded counts");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn table(pairs: &[(&str, u64)]) -> FlatCountTable {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn sorted_by_count_then_key() {
        let counts = table(&[("b", 5), ("a", 5), ("c", 9), ("d", 0)]);
        assert_eq!(sorted_counts(&counts), [("c", 9), ("a", 5), ("b", 5), ("d", 0)]);
    }

    #[test]
    fn written_file_is_ordered_by_count() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("builder_aggregated.json");

        write_counts(&path, &table(&[("alpha", 1), ("beta", 30), ("", 4)])).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let beta = text.find("\"beta\"").unwrap();
        let empty = text.find("\"\"").unwrap();
        let alpha = text.find("\"alpha\"").unwrap();
        assert!(beta < empty && empty < alpha, "unexpected order:\n{text}");
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn read_back_what_was_written() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("counts.json");
        let counts = table(&[("Titan", 120), ("rsync", 3)]);

        write_counts(&path, &counts).unwrap();

        assert_eq!(read_counts(&path).unwrap(), counts);
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let err = read_counts(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, StatsError::Read { .. }));
    }

    #[test]
    fn non_object_json_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("counts.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let err = read_counts(&path).unwrap_err();
        assert!(matches!(err, StatsError::Json { .. }));
    }
}

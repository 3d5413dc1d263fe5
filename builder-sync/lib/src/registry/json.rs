use std::fs;
use std::path::Path;

use tracing::{debug, instrument};

use super::RegistryEntry;
use crate::error::RegistryError;

/// Loads the registry from its JSON form (an array of entries).
///
/// An empty `extra_data` string is read as no key.
#[instrument(fields(path = %path.display()))]
pub fn load_registry_json(path: &Path) -> Result<Vec<RegistryEntry>, RegistryError> {
    let content = fs::read_to_string(path).map_err(|source| RegistryError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let entries: Vec<RegistryEntry> =
        serde_json::from_str(&content).map_err(|source| RegistryError::Json {
            path: path.display().to_string(),
            source,
        })?;

    debug!(entries = entries.len(), "Loaded registry");
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Signing;
    use tempfile::TempDir;

    #[test]
    fn loads_entries_with_optional_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("builders.json");
        fs::write(
            &path,
            r#"[
                {
                    "name": "Titan Builder",
                    "identifier": "titan",
                    "website": "https://titanbuilder.xyz",
                    "searcher_rpc": "https://rpc.titanbuilder.xyz",
                    "mev_share_rpc": "https://rpc.titanbuilder.xyz",
                    "extra_data": "Titan (titanbuilder.xyz)",
                    "signing": "Optional",
                    "account_required": false
                },
                {
                    "name": "Flashbots",
                    "identifier": "flashbots",
                    "website": "https://flashbots.net",
                    "searcher_rpc": "https://relay.flashbots.net",
                    "extra_data": "",
                    "signing": "Required",
                    "account_required": false
                }
            ]"#,
        )
        .unwrap();

        let entries = load_registry_json(&path).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].key(), Some("Titan (titanbuilder.xyz)"));
        assert_eq!(entries[0].signing, Signing::Optional);
        assert_eq!(entries[1].mev_share_rpc, None);
        assert_eq!(entries[1].extra_data, None);
    }

    #[test]
    fn unknown_signing_is_json_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("builders.json");
        fs::write(
            &path,
            r#"[{"name":"X","identifier":"x","website":"https://x","searcher_rpc":"https://x",
                "signing":"Sometimes","account_required":false}]"#,
        )
        .unwrap();

        assert!(matches!(
            load_registry_json(&path),
            Err(RegistryError::Json { .. })
        ));
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            load_registry_json(&dir.path().join("nope.json")),
            Err(RegistryError::Read { .. })
        ));
    }
}

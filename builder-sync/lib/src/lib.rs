//! Builder registry synchronisation.
//!
//! Keeps the canonical list of known block builders (the `mev-builders`
//! crate) in step with observed block production:
//!
//! 1. daily builder statistics are fetched from a relay statistics service
//!    and folded into a parent/child hierarchy plus a flat `key -> blocks`
//!    table ([`stats`]);
//! 2. the flat table is compared against the registry to report keys that
//!    exist on only one side ([`reconcile`]);
//! 3. the registry listing is re-ordered by block production and rewritten
//!    in place ([`regenerate`]).
//!
//! ## Modules
//!
//! - [`config`] - Defaults, environment overrides and fixed file locations
//! - [`dates`] - Inclusive ISO date ranges for the stats window
//! - [`stats`] - Stats source adapter, aggregation, merging and output
//! - [`registry`] - Registry entry types, JSON loading and key matching
//! - [`listing`] - Parsing, validation and rendering of the Rust listing
//! - [`reconcile`] - Strict consistency check between registry and stats
//! - [`regenerate`] - Ranking and rewriting of the registry listing
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```
//! use builder_sync::stats::{BuilderRecord, ChildRecord, aggregate_day, merge_days};
//!
//! let day = aggregate_day(vec![BuilderRecord {
//!     key: " Titan ".to_string(),
//!     blocks: 10,
//!     children: vec![ChildRecord { key: "titan-child".to_string(), blocks: 3 }],
//! }]);
//! let merged = merge_days(vec![day.clone(), day]);
//!
//! assert_eq!(merged.counts["Titan"], 20);
//! assert_eq!(merged.counts["titan-child"], 6);
//! ```

pub mod config;
pub mod dates;
pub mod error;
pub mod listing;
mod persist;
pub mod reconcile;
pub mod regenerate;
pub mod registry;
pub mod stats;

pub use config::StatsConfig;
pub use error::{RegistryError, StatsError};
pub use reconcile::{ReconcileReport, check_consistency, reconcile};
pub use regenerate::{RankedEntry, Regenerated, rank_entries, regenerate_listing};
pub use registry::{RegistryEntry, Signing};
pub use stats::{Aggregate, FlatCountTable};

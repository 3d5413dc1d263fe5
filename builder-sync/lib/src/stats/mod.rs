//! Builder block-production statistics.
//!
//! One day of raw [`BuilderRecord`]s is folded by [`aggregate_day`] into an
//! [`Aggregate`]: a hierarchy of parent builders with their sub-builders,
//! plus a flat table of block counts per key. [`merge_days`] combines any
//! number of those into a single multi-day [`Aggregate`].
//!
//! Keys are the builder's block `extra_data`, trimmed of surrounding
//! whitespace. An empty key is kept (shown as `(empty)`) so its blocks are
//! still counted.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::dates::format_date;
use crate::error::StatsError;

mod aggregate;
mod merge;
pub mod output;
pub mod report;
pub mod source;

pub use aggregate::{aggregate_day, normalize_key};
pub use merge::merge_days;
pub use output::{read_counts, sorted_counts, write_counts};
pub use report::render_hierarchy;
pub use source::{RelayscanSource, StatsSource};

/// Display label for builders that publish no `extra_data`.
pub const EMPTY_KEY_LABEL: &str = "(empty)";

/// Cumulative block count per normalized key.
pub type FlatCountTable = BTreeMap<String, u64>;

/// One parent builder as reported for a day, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderRecord {
    pub key: String,
    pub blocks: u64,
    pub children: Vec<ChildRecord>,
}

/// A sub-builder reported under a parent, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildRecord {
    pub key: String,
    pub blocks: u64,
}

/// A parent builder in an aggregated hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuilderNode {
    pub key: String,
    pub blocks: u64,
    /// Sub-builders, highest block count first.
    pub children: Vec<ChildNode>,
}

/// A sub-builder in an aggregated hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChildNode {
    pub key: String,
    pub blocks: u64,
}

impl BuilderNode {
    /// Key for display, with empty keys shown as [`EMPTY_KEY_LABEL`].
    pub fn label(&self) -> &str {
        display_key(&self.key)
    }
}

impl ChildNode {
    /// Key for display, with empty keys shown as [`EMPTY_KEY_LABEL`].
    pub fn label(&self) -> &str {
        display_key(&self.key)
    }
}

pub(crate) fn display_key(key: &str) -> &str {
    if key.is_empty() { EMPTY_KEY_LABEL } else { key }
}

/// Hierarchy plus flat count table for one or more days.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregate {
    /// Parent builders, highest block count first.
    pub hierarchy: Vec<BuilderNode>,
    /// Blocks per key, counting parents and children alike.
    pub counts: FlatCountTable,
}

impl Aggregate {
    /// True when no builder was observed.
    pub fn is_empty(&self) -> bool {
        self.hierarchy.is_empty() && self.counts.is_empty()
    }

    /// Sum of parent block counts.
    ///
    /// Children are sub-identities of their parent, so they are not added again.
    pub fn total_blocks(&self) -> u64 {
        self.hierarchy
            .iter()
            .fold(0u64, |total, node| total.saturating_add(node.blocks))
    }

    /// Sum of the flat table, i.e. of the aggregated file as written.
    ///
    /// A key seen both as parent and child is counted for each occurrence.
    pub fn flat_total(&self) -> u64 {
        self.counts
            .values()
            .fold(0u64, |total, blocks| total.saturating_add(*blocks))
    }
}

/// Fetches every day in `dates` in order and merges what was retrieved.
///
/// A day that fails to fetch is logged and skipped; it does not abort the
/// remaining days.
///
/// ## Errors
///
/// Returns [`StatsError::NoData`] when no day could be fetched.
pub async fn collect_days<S: StatsSource>(
    source: &S,
    dates: &[NaiveDate],
) -> Result<Aggregate, StatsError> {
    let mut days = Vec::with_capacity(dates.len());

    for date in dates {
        let day = format_date(*date);
        info!(date = %day, "Fetching builder stats");

        match source.fetch_day(*date).await {
            Ok(records) => {
                let aggregate = aggregate_day(records);
                info!(date = %day, parents = aggregate.hierarchy.len(), "Aggregated day");
                days.push(aggregate);
            }
            Err(err) => warn!(date = %day, error = %err, "Skipping day"),
        }
    }

    if days.is_empty() {
        return Err(StatsError::NoData);
    }

    Ok(merge_days(days))
}

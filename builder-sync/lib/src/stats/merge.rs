use std::collections::HashMap;

use super::aggregate::add_blocks;
use super::{Aggregate, BuilderNode, ChildNode, FlatCountTable};

/// Merges per-day aggregates into a single multi-day aggregate.
///
/// Parents are merged by key, and children are merged by key within their
/// parent. The flat table is the per-key sum over all days; a key missing on
/// a day simply contributes nothing for it. Ordering is by merged block count,
/// highest first, with ties kept in order of first appearance.
///
/// ## Examples
///
/// ```
/// use builder_sync::stats::{BuilderRecord, aggregate_day, merge_days};
///
/// let record = |key: &str, blocks| BuilderRecord { key: key.into(), blocks, children: vec![] };
/// let merged = merge_days(vec![
///     aggregate_day(vec![record("A", 10)]),
///     aggregate_day(vec![record("A", 5), record("B", 2)]),
/// ]);
///
/// assert_eq!(merged.counts["A"], 15);
/// assert_eq!(merged.counts["B"], 2);
/// assert_eq!(merged.hierarchy[0].key, "A");
/// ```
pub fn merge_days(days: Vec<Aggregate>) -> Aggregate {
    days.into_iter()
        .fold(MergeAccumulator::default(), MergeAccumulator::absorb)
        .finish()
}

#[derive(Debug, Default)]
struct MergeAccumulator {
    parents: Vec<MergedParent>,
    parent_index: HashMap<String, usize>,
    counts: FlatCountTable,
}

#[derive(Debug)]
struct MergedParent {
    key: String,
    blocks: u64,
    children: Vec<ChildNode>,
    child_index: HashMap<String, usize>,
}

impl MergedParent {
    fn new(key: String) -> Self {
        Self {
            key,
            blocks: 0,
            children: Vec::new(),
            child_index: HashMap::new(),
        }
    }

    fn add_child(&mut self, child: ChildNode) {
        match self.child_index.get(&child.key) {
            Some(&idx) => {
                let merged = &mut self.children[idx];
                merged.blocks = merged.blocks.saturating_add(child.blocks);
            }
            None => {
                self.child_index.insert(child.key.clone(), self.children.len());
                self.children.push(child);
            }
        }
    }
}

impl MergeAccumulator {
    fn absorb(mut self, day: Aggregate) -> Self {
        for (key, blocks) in day.counts {
            add_blocks(&mut self.counts, key, blocks);
        }

        for node in day.hierarchy {
            let idx = match self.parent_index.get(&node.key) {
                Some(&idx) => idx,
                None => {
                    let idx = self.parents.len();
                    self.parent_index.insert(node.key.clone(), idx);
                    self.parents.push(MergedParent::new(node.key.clone()));
                    idx
                }
            };

            let parent = &mut self.parents[idx];
            parent.blocks = parent.blocks.saturating_add(node.blocks);
            for child in node.children {
                parent.add_child(child);
            }
        }

        self
    }

    fn finish(self) -> Aggregate {
        let mut hierarchy: Vec<BuilderNode> = self
            .parents
            .into_iter()
            .map(|parent| {
                let mut children = parent.children;
                children.sort_by(|a, b| b.blocks.cmp(&a.blocks));
                BuilderNode {
                    key: parent.key,
                    blocks: parent.blocks,
                    children,
                }
            })
            .collect();

        hierarchy.sort_by(|a, b| b.blocks.cmp(&a.blocks));

        Aggregate {
            hierarchy,
            counts: self.counts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{BuilderRecord, ChildRecord, aggregate_day};

    fn day(records: &[(&str, u64, &[(&str, u64)])]) -> Aggregate {
        aggregate_day(
            records
                .iter()
                .map(|(key, blocks, children)| BuilderRecord {
                    key: key.to_string(),
                    blocks: *blocks,
                    children: children
                        .iter()
                        .map(|(key, blocks)| ChildRecord {
                            key: key.to_string(),
                            blocks: *blocks,
                        })
                        .collect(),
                })
                .collect(),
        )
    }

    #[test]
    fn merging_nothing_is_empty() {
        assert!(merge_days(Vec::new()).is_empty());
    }

    #[test]
    fn two_days_sum_by_key() {
        let merged = merge_days(vec![day(&[("A", 10, &[])]), day(&[("A", 5, &[]), ("B", 2, &[])])]);

        assert_eq!(
            merged.counts,
            FlatCountTable::from([("A".into(), 15), ("B".into(), 2)])
        );
        let parents: Vec<&str> = merged.hierarchy.iter().map(|n| n.key.as_str()).collect();
        assert_eq!(parents, ["A", "B"]);
        assert_eq!(merged.hierarchy[0].blocks, 15);
    }

    #[test]
    fn children_merge_within_their_parent() {
        let merged = merge_days(vec![
            day(&[("P", 10, &[("c1", 4), ("c2", 1)])]),
            day(&[("P", 10, &[("c2", 6)])]),
        ]);

        let parent = &merged.hierarchy[0];
        assert_eq!(parent.blocks, 20);
        let children: Vec<(&str, u64)> = parent
            .children
            .iter()
            .map(|c| (c.key.as_str(), c.blocks))
            .collect();
        assert_eq!(children, [("c2", 7), ("c1", 4)]);
    }

    #[test]
    fn key_that_is_parent_one_day_and_child_the_next() {
        let merged = merge_days(vec![
            day(&[("X", 3, &[])]),
            day(&[("P", 9, &[("X", 4)])]),
        ]);

        assert_eq!(merged.counts["X"], 7);
        assert_eq!(merged.counts["P"], 9);
        let x = merged.hierarchy.iter().find(|n| n.key == "X").unwrap();
        assert_eq!(x.blocks, 3);
        assert_eq!(merged.hierarchy[0].children[0].key, "X");
    }

    #[test]
    fn ties_keep_first_appearance_order() {
        let merged = merge_days(vec![
            day(&[("late", 1, &[]), ("first", 5, &[])]),
            day(&[("second", 5, &[]), ("late", 1, &[])]),
        ]);

        let parents: Vec<&str> = merged.hierarchy.iter().map(|n| n.key.as_str()).collect();
        assert_eq!(parents, ["first", "second", "late"]);
    }

    #[test]
    fn sums_saturate_across_days() {
        let merged = merge_days(vec![
            day(&[("P", u64::MAX, &[("c", u64::MAX)])]),
            day(&[("P", 2, &[("c", 3)])]),
        ]);

        assert_eq!(merged.counts["P"], u64::MAX);
        assert_eq!(merged.counts["c"], u64::MAX);
        assert_eq!(merged.hierarchy[0].blocks, u64::MAX);
        assert_eq!(merged.hierarchy[0].children[0].blocks, u64::MAX);
        assert_eq!(merged.total_blocks(), u64::MAX);
    }
}

use super::{Aggregate, BuilderNode, BuilderRecord, ChildNode, FlatCountTable};

/// Normalizes an `extra_data` key: surrounding whitespace is trimmed, case
/// and any URL scheme are kept.
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_string()
}

/// Folds one day's raw builder records into a hierarchy and a flat table.
///
/// Every occurrence of a key contributes to its flat count, whether it was
/// reported as a parent or nested under another parent. Parents and each
/// parent's children are ordered by block count, highest first; equal counts
/// keep their input order.
///
/// ## Examples
///
/// ```
/// use builder_sync::stats::{BuilderRecord, ChildRecord, aggregate_day};
///
/// let day = aggregate_day(vec![BuilderRecord {
///     key: "A".to_string(),
///     blocks: 10,
///     children: vec![ChildRecord { key: "B".to_string(), blocks: 3 }],
/// }]);
///
/// assert_eq!(day.counts["A"], 10);
/// assert_eq!(day.counts["B"], 3);
/// assert_eq!(day.hierarchy[0].children[0].key, "B");
/// ```
pub fn aggregate_day(records: Vec<BuilderRecord>) -> Aggregate {
    let (mut hierarchy, counts) = records.into_iter().fold(
        (Vec::<BuilderNode>::new(), FlatCountTable::new()),
        |(mut hierarchy, counts), record| {
            let (node, counts) = fold_record(record, counts);
            hierarchy.push(node);
            (hierarchy, counts)
        },
    );

    hierarchy.sort_by(|a, b| b.blocks.cmp(&a.blocks));

    Aggregate { hierarchy, counts }
}

fn fold_record(record: BuilderRecord, mut counts: FlatCountTable) -> (BuilderNode, FlatCountTable) {
    let key = normalize_key(&record.key);
    add_blocks(&mut counts, key.clone(), record.blocks);

    let mut children: Vec<ChildNode> = Vec::with_capacity(record.children.len());
    for child in record.children {
        let child_key = normalize_key(&child.key);
        add_blocks(&mut counts, child_key.clone(), child.blocks);
        children.push(ChildNode {
            key: child_key,
            blocks: child.blocks,
        });
    }
    children.sort_by(|a, b| b.blocks.cmp(&a.blocks));

    let node = BuilderNode {
        key,
        blocks: record.blocks,
        children,
    };
    (node, counts)
}

/// Adds `blocks` to the count for `key`, saturating at `u64::MAX`.
pub(crate) fn add_blocks(counts: &mut FlatCountTable, key: String, blocks: u64) {
    let count = counts.entry(key).or_default();
    *count = count.saturating_add(blocks);
}

//! Plain-text report of a merged builder hierarchy.

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table, presets};
use num_format::{Locale, ToFormattedString};

use super::Aggregate;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";

/// Renders parents and their sub-builders with block counts and share of
/// the total.
///
/// The total is the sum of parent counts, so a child's percentage is its
/// share of all blocks, not of its parent.
pub fn render_hierarchy(aggregate: &Aggregate) -> String {
    let total = aggregate.total_blocks();

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_BORDERS_ONLY)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(vec![
            Cell::new("Builder Name").add_attribute(Attribute::Bold),
            Cell::new("Blocks")
                .add_attribute(Attribute::Bold)
                .set_alignment(CellAlignment::Right),
            Cell::new("Percentage")
                .add_attribute(Attribute::Bold)
                .set_alignment(CellAlignment::Right),
        ]);

    for node in &aggregate.hierarchy {
        table.add_row(row(node.label().to_string(), node.blocks, total));

        let last = node.children.len().saturating_sub(1);
        for (i, child) in node.children.iter().enumerate() {
            let prefix = if i == last { LAST_BRANCH } else { BRANCH };
            table.add_row(row(format!("{prefix}{}", child.label()), child.blocks, total));
        }
    }

    table.add_row(vec![
        Cell::new("TOTAL").add_attribute(Attribute::Bold),
        Cell::new(total.to_formatted_string(&Locale::en)).set_alignment(CellAlignment::Right),
        Cell::new(if total > 0 { "100.00%" } else { "0.00%" }).set_alignment(CellAlignment::Right),
    ]);

    table.to_string()
}

fn row(name: String, blocks: u64, total: u64) -> Vec<Cell> {
    vec![
        Cell::new(name),
        Cell::new(blocks.to_formatted_string(&Locale::en)).set_alignment(CellAlignment::Right),
        Cell::new(percentage(blocks, total)).set_alignment(CellAlignment::Right),
    ]
}

fn percentage(blocks: u64, total: u64) -> String {
    if total == 0 {
        return "0.00%".to_string();
    }
    format!("{:.2}%", blocks as f64 * 100.0 / total as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{BuilderRecord, ChildRecord, aggregate_day};

    fn sample() -> Aggregate {
        aggregate_day(vec![
            BuilderRecord {
                key: "Titan".into(),
                blocks: 3000,
                children: vec![
                    ChildRecord { key: "titan-a".into(), blocks: 200 },
                    ChildRecord { key: "".into(), blocks: 100 },
                ],
            },
            BuilderRecord {
                key: "rsync".into(),
                blocks: 1000,
                children: Vec::new(),
            },
        ])
    }

    #[test]
    fn percentages_use_parent_total() {
        assert_eq!(percentage(1, 4), "25.00%");
        assert_eq!(percentage(0, 0), "0.00%");
    }

    #[test]
    fn report_lists_tree_and_total() {
        let report = render_hierarchy(&sample());

        assert!(report.contains("Builder Name"));
        assert!(report.contains("Titan"));
        assert!(report.contains("├── titan-a"));
        assert!(report.contains("└── (empty)"));
        assert!(report.contains("3,000"));
        assert!(report.contains("75.00%"));
        assert!(report.contains("TOTAL"));
        assert!(report.contains("4,000"));
    }

    #[test]
    fn children_follow_their_parent() {
        let report = render_hierarchy(&sample());
        let titan = report.find("Titan").unwrap();
        let child = report.find("titan-a").unwrap();
        let rsync = report.find("rsync").unwrap();
        assert!(titan < child && child < rsync);
    }

    #[test]
    fn empty_aggregate_renders_zero_total() {
        let report = render_hierarchy(&Aggregate::default());
        assert!(report.contains("TOTAL"));
        assert!(report.contains("0.00%"));
    }
}

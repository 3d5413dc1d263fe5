//! Terminal summaries for the stats and regen commands.

use std::path::Path;

use builder_sync::{Aggregate, Regenerated};
use num_format::{Locale, ToFormattedString};

const TOP_BUILDERS: usize = 10;

pub fn print_stats_summary(aggregate: &Aggregate, output: &Path) {
    println!();
    println!(
        "Saved {} builder keys ({} blocks) to {}",
        aggregate.counts.len().to_formatted_string(&Locale::en),
        aggregate.flat_total().to_formatted_string(&Locale::en),
        output.display()
    );
}

pub fn print_regen_summary(regenerated: &Regenerated, listing: &Path) {
    println!("Matching results:");
    println!("  ✓ Matched builders: {}", regenerated.matched.len());
    println!("  ✗ Unmatched builders: {}", regenerated.unmatched.len());
    println!();

    println!("Matched builders:");
    for ranked in &regenerated.matched {
        println!(
            "  ✓ {} ({}): {} blocks",
            ranked.entry.name,
            ranked.entry.key().unwrap_or("None"),
            ranked.blocks.to_formatted_string(&Locale::en)
        );
    }

    if !regenerated.unmatched.is_empty() {
        println!();
        println!("Unmatched builders (placed in OTHER_BUILDERS):");
        for entry in &regenerated.unmatched {
            println!("  ✗ {} ({}): No match", entry.name, entry.key().unwrap_or("None"));
        }
    }

    println!();
    println!("✓ Successfully updated {}", listing.display());
    println!("  - BUILDERS: {} builders (with block data)", regenerated.matched.len());
    println!("  - OTHER_BUILDERS: {} builders (without block data)", regenerated.unmatched.len());
    println!("  - Total builders: {}", regenerated.len());

    if !regenerated.matched.is_empty() {
        println!();
        println!("Top builders by block count:");
        for (i, ranked) in regenerated.matched.iter().take(TOP_BUILDERS).enumerate() {
            println!(
                "  {:2}. {:20} - {} blocks",
                i + 1,
                ranked.entry.name,
                ranked.blocks.to_formatted_string(&Locale::en)
            );
        }
    }
}

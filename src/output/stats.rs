//! Run statistics
//!
//! Counters collected while walking seasons, printed once the CSV is written.

use crate::crawler::SkipReason;
use std::collections::BTreeMap;
use std::time::Duration;

/// Scrape run statistics summary
#[derive(Debug, Clone, Default)]
pub struct RunStatistics {
    /// Number of standings pages processed
    pub seasons_walked: u64,

    /// Teams found across all standings pages
    pub teams_seen: u64,

    /// Teams that contributed a merged row set
    pub teams_merged: u64,

    /// Skipped teams by reason kind
    pub skipped: BTreeMap<&'static str, u64>,

    /// Merged rows collected before export
    pub rows_collected: u64,

    /// Data rows written to the CSV file
    pub rows_written: u64,

    /// HTTP requests issued
    pub requests: u64,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl RunStatistics {
    /// Creates empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a skipped team under its reason kind
    pub fn record_skip(&mut self, reason: &SkipReason) {
        *self.skipped.entry(reason.kind()).or_insert(0) += 1;
    }

    /// Total number of skipped teams
    pub fn teams_skipped(&self) -> u64 {
        self.skipped.values().sum()
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &RunStatistics) {
    println!("=== Scrape Statistics ===\n");

    println!("Overview:");
    println!("  Seasons walked: {}", stats.seasons_walked);
    println!("  Teams seen: {}", stats.teams_seen);
    println!("  Teams merged: {}", stats.teams_merged);
    println!("  Teams skipped: {}", stats.teams_skipped());
    println!("  HTTP requests: {}", stats.requests);
    println!("  Elapsed: {:.1}s", stats.elapsed.as_secs_f64());
    println!();

    if !stats.skipped.is_empty() {
        println!("Skipped Teams:");
        let mut counts: Vec<_> = stats.skipped.iter().collect();
        counts.sort_by(|a, b| b.1.cmp(a.1));

        for (kind, count) in counts {
            println!("  {}: {}", kind, count);
        }
        println!();
    }

    println!(
        "Rows: {} collected, {} written",
        stats.rows_collected, stats.rows_written
    );
}

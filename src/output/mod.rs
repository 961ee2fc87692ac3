//! Output module for exporting merged rows and reporting on a run
//!
//! This module handles:
//! - Concatenating per-team row sets and writing them as CSV
//! - Recording and printing run statistics

mod csv_output;
pub mod stats;

pub use csv_output::{concat_row_sets, write_csv, write_csv_to};
pub use stats::{print_statistics, RunStatistics};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

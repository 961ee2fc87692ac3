//! CSV export of the merged result set

use crate::crawler::Table;
use crate::output::OutputResult;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Concatenates row sets into one table with lower-case column names
///
/// Columns are the union of all sets' columns in first-appearance order;
/// a set lacking a column gets empty cells there. Rows keep insertion order.
pub fn concat_row_sets(sets: &[Table]) -> Table {
    let mut columns: Vec<String> = Vec::new();
    for set in sets {
        for column in set.columns() {
            if !columns.contains(column) {
                columns.push(column.clone());
            }
        }
    }

    let mut rows = Vec::with_capacity(sets.iter().map(Table::len).sum());
    for set in sets {
        let positions: Vec<Option<usize>> = columns.iter().map(|c| set.column(c)).collect();
        for row in set.rows() {
            rows.push(
                positions
                    .iter()
                    .map(|position| position.map(|i| row[i].clone()).unwrap_or_default())
                    .collect(),
            );
        }
    }

    let lowered = columns.iter().map(|c| c.to_lowercase()).collect();
    Table::new(lowered, rows)
}

/// Writes the concatenated row sets as CSV to `writer`
///
/// The header row is followed by one record per merged row; there is no
/// index column. An empty `sets` slice writes nothing at all.
///
/// # Returns
///
/// The number of data rows written
pub fn write_csv_to<W: Write>(sets: &[Table], writer: W) -> OutputResult<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    if sets.is_empty() {
        csv_writer.flush()?;
        return Ok(0);
    }

    let combined = concat_row_sets(sets);
    csv_writer.write_record(combined.columns())?;
    for row in combined.rows() {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;

    Ok(combined.len())
}

/// Writes the concatenated row sets as CSV to the file at `path`
///
/// # Example
///
/// ```no_run
/// use match_stats::output::write_csv;
/// use match_stats::Table;
/// use std::path::Path;
///
/// let set = Table::new(vec!["Date".into()], vec![vec!["2024-01-01".into()]]);
/// let rows = write_csv(&[set], Path::new("matches.csv")).unwrap();
/// assert_eq!(rows, 1);
/// ```
pub fn write_csv(sets: &[Table], path: &Path) -> OutputResult<usize> {
    let file = File::create(path)?;
    write_csv_to(sets, BufWriter::new(file))
}

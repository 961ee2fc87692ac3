//! HTML table location and extraction
//!
//! Tables are found either by CSS selector (the standings table) or by a
//! piece of text they contain (fixtures and shooting tables, which are only
//! reliably identified by their caption). Both strategies produce the same
//! row-oriented [`Table`].

use crate::TableError;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::fmt;

/// Strategy for picking one table out of a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableLocator {
    /// First table matching a CSS selector (or the first table inside the
    /// first matching element)
    Selector(String),

    /// First table whose text content contains the given string
    Containing(String),
}

impl TableLocator {
    /// Locator for a CSS selector, e.g. `table.stats_table`
    pub fn selector(css: impl Into<String>) -> Self {
        Self::Selector(css.into())
    }

    /// Locator for a table containing `text`, e.g. `Scores & Fixtures`
    pub fn containing(text: impl Into<String>) -> Self {
        Self::Containing(text.into())
    }

    /// Returns the first `<table>` element in `document` matching this locator
    ///
    /// # Returns
    ///
    /// * `Ok(ElementRef)` - The matching table element
    /// * `Err(TableError::NotFound)` - No table matched
    /// * `Err(TableError::InvalidSelector)` - The CSS selector did not parse
    pub fn locate<'a>(&self, document: &'a Html) -> Result<ElementRef<'a>, TableError> {
        let tables = parse_selector("table")?;

        let found = match self {
            Self::Selector(css) => {
                let selector = parse_selector(css)?;
                document.select(&selector).find_map(|element| {
                    if element.value().name() == "table" {
                        Some(element)
                    } else {
                        element.select(&tables).next()
                    }
                })
            }
            Self::Containing(needle) => document
                .select(&tables)
                .find(|table| table.text().collect::<String>().contains(needle.as_str())),
        };

        found.ok_or_else(|| TableError::NotFound(self.to_string()))
    }

    /// Locates and extracts the matching table
    pub fn read(&self, document: &Html) -> Result<Table, TableError> {
        self.locate(document).map(Table::from_element)
    }
}

impl fmt::Display for TableLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Selector(css) => write!(f, "selector `{}`", css),
            Self::Containing(text) => write!(f, "text \"{}\"", text),
        }
    }
}

fn parse_selector(css: &str) -> Result<Selector, TableError> {
    Selector::parse(css).map_err(|_| TableError::InvalidSelector(css.to_string()))
}

/// Row-oriented table with one or more header levels and string cells
///
/// Every row holds exactly one cell per column of the last header level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    header_levels: Vec<Vec<String>>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates a single-level table
    ///
    /// Duplicate column names are disambiguated as `name`, `name.1`, ...
    /// and rows are padded or truncated to the column count.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self::with_header_levels(vec![dedup_names(columns)], rows)
    }

    /// Creates a table with several header levels, outermost first
    pub fn with_header_levels(header_levels: Vec<Vec<String>>, rows: Vec<Vec<String>>) -> Self {
        let mut table = Self {
            header_levels,
            rows,
        };
        table.normalize_rows();
        table
    }

    /// Extracts a table element into rows and header levels
    ///
    /// Header levels come from `thead` rows. Without a `thead`, leading rows
    /// made only of `th` cells are header levels. Repeated header rows inside
    /// the body and rows with only empty cells are skipped. `colspan` cells
    /// are repeated across the columns they span.
    pub fn from_element(table: ElementRef<'_>) -> Self {
        let has_thead = table
            .children()
            .filter_map(ElementRef::wrap)
            .any(|child| child.value().name() == "thead");

        let mut header_levels: Vec<Vec<String>> = Vec::new();
        let mut rows: Vec<Vec<String>> = Vec::new();

        for row in table_rows(table) {
            let cells = read_cells(row);
            if cells.is_empty() {
                continue;
            }

            let all_header_cells = cells.iter().all(|cell| cell.is_header);
            let texts: Vec<String> = cells.into_iter().map(|cell| cell.text).collect();

            let in_thead = row
                .parent()
                .and_then(ElementRef::wrap)
                .is_some_and(|parent| parent.value().name() == "thead");

            if in_thead || (!has_thead && rows.is_empty() && all_header_cells) {
                header_levels.push(texts);
                continue;
            }

            if is_separator_row(row) || (all_header_cells && !header_levels.is_empty()) {
                continue;
            }

            if texts.iter().all(|text| text.is_empty()) {
                continue;
            }

            rows.push(texts);
        }

        if header_levels.len() == 1 {
            if let Some(level) = header_levels.pop() {
                header_levels.push(dedup_names(level));
            }
        }

        Self::with_header_levels(header_levels, rows)
    }

    /// All header levels, outermost first
    pub fn header_levels(&self) -> &[Vec<String>] {
        &self.header_levels
    }

    /// Column names (the innermost header level)
    pub fn columns(&self) -> &[String] {
        self.header_levels
            .last()
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Index of the named column
    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns().iter().position(|column| column == name)
    }

    /// All body rows
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of body rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when the table has no body rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell value of `row` in the named column
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column(column)?;
        self.rows.get(row)?.get(index).map(String::as_str)
    }

    /// Drops every header level except the innermost one
    ///
    /// Fails with [`TableError::FlatHeader`] when there is only one level.
    pub fn collapse_header(mut self) -> Result<Self, TableError> {
        if self.header_levels.len() < 2 {
            return Err(TableError::FlatHeader);
        }

        let innermost = self.header_levels.pop().unwrap_or_default();
        Ok(Self::new(innermost, self.rows))
    }

    /// Restricts the table to the named columns, in the given order
    pub fn select_columns(&self, names: &[&str]) -> Result<Self, TableError> {
        let mut indices = Vec::with_capacity(names.len());
        let mut missing = Vec::new();

        for name in names {
            match self.column(name) {
                Some(index) => indices.push(index),
                None => missing.push((*name).to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(TableError::MissingColumns(missing));
        }

        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();

        Ok(Self::new(
            names.iter().map(|name| (*name).to_string()).collect(),
            rows,
        ))
    }

    /// Keeps only the rows for which `keep` returns true
    pub fn retain_rows(&mut self, mut keep: impl FnMut(&[String]) -> bool) {
        self.rows.retain(|row| keep(row));
    }

    /// Appends a column holding the same value in every row
    pub fn push_constant_column(&mut self, name: &str, value: &str) {
        match self.header_levels.last_mut() {
            Some(level) => level.push(name.to_string()),
            None => self.header_levels.push(vec![name.to_string()]),
        }
        for row in &mut self.rows {
            row.push(value.to_string());
        }
    }

    fn normalize_rows(&mut self) {
        let width = self.columns().len();
        if width == 0 {
            return;
        }
        for row in &mut self.rows {
            row.resize(width, String::new());
        }
    }
}

/// Largest `colspan` browsers honour
const MAX_COLSPAN: usize = 1000;

struct Cell {
    text: String,
    is_header: bool,
}

/// Rows belonging to `table` itself, skipping rows of nested tables
fn table_rows<'a>(table: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    let mut rows = Vec::new();
    for child in table.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "tr" => rows.push(child),
            "thead" | "tbody" | "tfoot" => rows.extend(
                child
                    .children()
                    .filter_map(ElementRef::wrap)
                    .filter(|row| row.value().name() == "tr"),
            ),
            _ => {}
        }
    }
    rows
}

fn read_cells(row: ElementRef<'_>) -> Vec<Cell> {
    let mut cells = Vec::new();
    for cell in row.children().filter_map(ElementRef::wrap) {
        let is_header = match cell.value().name() {
            "th" => true,
            "td" => false,
            _ => continue,
        };

        let span = cell
            .value()
            .attr("colspan")
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(1)
            .clamp(1, MAX_COLSPAN);

        let text = cell.text().collect::<String>().trim().to_string();
        for _ in 0..span {
            cells.push(Cell {
                text: text.clone(),
                is_header,
            });
        }
    }
    cells
}

fn is_separator_row(row: ElementRef<'_>) -> bool {
    row.value()
        .classes()
        .any(|class| class == "thead" || class == "spacer" || class == "over_header")
}

/// Renames repeated names to `name.1`, `name.2`, ...
fn dedup_names(names: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    names
        .into_iter()
        .map(|name| {
            let count = seen.entry(name.clone()).or_insert(0);
            let unique = if *count == 0 {
                name
            } else {
                format!("{}.{}", name, count)
            };
            *count += 1;
            unique
        })
        .collect()
}

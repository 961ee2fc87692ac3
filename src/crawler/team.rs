//! Per-team processing: fixtures joined with shooting statistics
//!
//! A team contributes rows only when both its fixtures table and its
//! shooting match log can be read and joined. Everything that can go wrong
//! with the shooting side is reported as a [`SkipReason`] instead of an
//! error so that one odd team never stops the season walk.

use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::{first_link, LinkMatcher};
use crate::crawler::table::{Table, TableLocator};
use crate::season::Season;
use crate::url::TeamReference;
use crate::{ScrapeError, TableError};
use scraper::Html;
use std::collections::{HashMap, HashSet};
use std::fmt;
use thiserror::Error;
use url::Url;

/// Text identifying a team's fixtures table
pub const FIXTURES_TABLE_TEXT: &str = "Scores & Fixtures";

/// Text identifying the shooting match-log table
pub const SHOOTING_TABLE_TEXT: &str = "Shooting";

/// Href fragment of the all-competitions shooting match-log link
pub const SHOOTING_LINK_PATTERN: &str = "all_comps/shooting/";

/// Shooting columns carried into the merged rows
pub const SHOOTING_COLUMNS: [&str; 7] = ["Date", "Sh", "SoT", "Dist", "FK", "PK", "PKatt"];

const DATE_COLUMN: &str = "Date";
const COMPETITION_COLUMN: &str = "Comp";
const SEASON_COLUMN: &str = "Season";
const TEAM_COLUMN: &str = "Team";

/// Which table a join failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinSide {
    Fixtures,
    Shooting,
    Merged,
}

impl fmt::Display for JoinSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fixtures => "fixtures",
            Self::Shooting => "shooting",
            Self::Merged => "merged",
        };
        f.write_str(name)
    }
}

/// Reasons the fixtures/shooting join cannot produce rows
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    /// A required column is absent (schema mismatch)
    #[error("{side} table has no {column} column")]
    MissingKey { side: JoinSide, column: String },

    /// A joined date occurs more than once on one side (ambiguous key)
    #[error("date {date} appears more than once in the {side} table")]
    DuplicateDate { side: JoinSide, date: String },
}

/// Why a team contributed no rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The team page has no all-competitions shooting link
    ShootingLinkMissing,

    /// The shooting page has no usable shooting table
    ShootingTable(TableError),

    /// Fixtures and shooting rows could not be joined
    Join(JoinError),

    /// Fixtures and shooting tables share no date
    NoCommonDates,
}

impl SkipReason {
    /// Short stable label used in run statistics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ShootingLinkMissing => "shooting link missing",
            Self::ShootingTable(TableError::NotFound(_)) => "shooting table missing",
            Self::ShootingTable(_) => "shooting table malformed",
            Self::Join(JoinError::MissingKey { .. }) => "schema mismatch",
            Self::Join(JoinError::DuplicateDate { .. }) => "duplicate date",
            Self::NoCommonDates => "no common dates",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShootingLinkMissing => f.write_str("no shooting link on team page"),
            Self::ShootingTable(e) => write!(f, "shooting table unusable: {}", e),
            Self::Join(e) => write!(f, "join failed: {}", e),
            Self::NoCommonDates => f.write_str("fixtures and shooting share no date"),
        }
    }
}

/// Result of processing one team for one season
#[derive(Debug, Clone, PartialEq)]
pub enum TeamOutcome {
    /// Joined, filtered and stamped rows (possibly empty after filtering)
    Merged(Table),

    /// The team contributes nothing this season
    Skipped(SkipReason),
}

/// Processes one team's pages into merged rows
///
/// # Request Flow
///
/// 1. Fetch the team page and read its fixtures table
/// 2. Find the shooting match-log link
/// 3. Fetch the shooting page and read its shooting table
/// 4. Collapse the two-level header and keep [`SHOOTING_COLUMNS`]
/// 5. Join on Date, keep `competition` rows, stamp season and team
///
/// # Returns
///
/// * `Ok(TeamOutcome::Merged)` - Rows for this team
/// * `Ok(TeamOutcome::Skipped)` - Shooting data missing or not joinable
/// * `Err(ScrapeError)` - Transport failure or missing fixtures table
pub async fn process_team(
    fetcher: &mut Fetcher,
    team: &TeamReference,
    season: Season,
    competition: &str,
) -> Result<TeamOutcome, ScrapeError> {
    let body = fetcher.fetch_page(&team.url).await?;
    let (fixtures, shooting_url) = read_team_page(&body, &team.url)?;

    let Some(shooting_url) = shooting_url else {
        return Ok(TeamOutcome::Skipped(SkipReason::ShootingLinkMissing));
    };

    let body = fetcher.fetch_page(&shooting_url).await?;
    let shooting = match read_shooting_table(&body) {
        Ok(table) => table,
        Err(e) => return Ok(TeamOutcome::Skipped(SkipReason::ShootingTable(e))),
    };

    let joined = match join_on_date(&fixtures, &shooting) {
        Ok(table) => table,
        Err(e) => return Ok(TeamOutcome::Skipped(SkipReason::Join(e))),
    };

    if joined.is_empty() {
        return Ok(TeamOutcome::Skipped(SkipReason::NoCommonDates));
    }

    match filter_and_stamp(joined, season, &team.name, competition) {
        Ok(table) => Ok(TeamOutcome::Merged(table)),
        Err(e) => Ok(TeamOutcome::Skipped(SkipReason::Join(e))),
    }
}

/// Reads the fixtures table and the shooting link from a team page
fn read_team_page(body: &str, page_url: &Url) -> Result<(Table, Option<Url>), ScrapeError> {
    let document = Html::parse_document(body);

    let fixtures = TableLocator::containing(FIXTURES_TABLE_TEXT)
        .read(&document)
        .map_err(|e| ScrapeError::from_table(page_url, e))?;

    let shooting_url = first_link(
        document.root_element(),
        &LinkMatcher::path_contains(SHOOTING_LINK_PATTERN),
        page_url,
    )?;

    Ok((fixtures, shooting_url))
}

/// Reads the shooting table, collapsed to one header level and restricted
/// to [`SHOOTING_COLUMNS`]
pub fn read_shooting_table(body: &str) -> Result<Table, TableError> {
    let document = Html::parse_document(body);
    TableLocator::containing(SHOOTING_TABLE_TEXT)
        .read(&document)?
        .collapse_header()?
        .select_columns(&SHOOTING_COLUMNS)
}

/// Joins, filters and stamps one team's tables
///
/// The result holds every fixture column, then the shooting columns other
/// than Date, then `Season` and `Team`. Only rows whose dates appear in both
/// tables and whose `Comp` equals `competition` survive. Tables with no date
/// in common give an empty result, not an error.
///
/// # Example
///
/// ```
/// use match_stats::crawler::merge_team_tables;
/// use match_stats::{Season, Table};
///
/// let fixtures = Table::new(
///     vec!["Date".into(), "Comp".into()],
///     vec![vec!["2024-01-01".into(), "Premier League".into()]],
/// );
/// let shooting = Table::new(
///     vec!["Date".into(), "Sh".into()],
///     vec![vec!["2024-01-01".into(), "14".into()]],
/// );
/// let merged =
///     merge_team_tables(&fixtures, &shooting, Season(2024), "Team One", "Premier League").unwrap();
/// assert_eq!(merged.value(0, "Sh"), Some("14"));
/// assert_eq!(merged.value(0, "Team"), Some("Team One"));
/// ```
pub fn merge_team_tables(
    fixtures: &Table,
    shooting: &Table,
    season: Season,
    team_name: &str,
    competition: &str,
) -> Result<Table, JoinError> {
    let joined = join_on_date(fixtures, shooting)?;
    if joined.is_empty() {
        return Ok(joined);
    }
    filter_and_stamp(joined, season, team_name, competition)
}

/// Inner join on the Date column, in fixture row order
///
/// Rows with an empty date never join. A date shared by both tables must be
/// unique on each side. Shooting columns whose names clash with fixture
/// columns are suffixed `_y`, the fixture columns `_x`.
pub fn join_on_date(fixtures: &Table, shooting: &Table) -> Result<Table, JoinError> {
    let left_key = fixtures.column(DATE_COLUMN).ok_or(JoinError::MissingKey {
        side: JoinSide::Fixtures,
        column: DATE_COLUMN.to_string(),
    })?;
    let right_key = shooting.column(DATE_COLUMN).ok_or(JoinError::MissingKey {
        side: JoinSide::Shooting,
        column: DATE_COLUMN.to_string(),
    })?;

    let mut right_index: HashMap<&str, usize> = HashMap::new();
    let mut right_repeated: HashSet<&str> = HashSet::new();
    for (i, row) in shooting.rows().iter().enumerate() {
        let date = row[right_key].as_str();
        if date.is_empty() {
            continue;
        }
        if right_index.insert(date, i).is_some() {
            right_repeated.insert(date);
        }
    }

    let mut left_seen: HashSet<&str> = HashSet::new();
    for row in fixtures.rows() {
        let date = row[left_key].as_str();
        if !right_index.contains_key(date) {
            continue;
        }
        if !left_seen.insert(date) {
            return Err(JoinError::DuplicateDate {
                side: JoinSide::Fixtures,
                date: date.to_string(),
            });
        }
        if right_repeated.contains(date) {
            return Err(JoinError::DuplicateDate {
                side: JoinSide::Shooting,
                date: date.to_string(),
            });
        }
    }

    let left_columns = fixtures.columns();
    let right_columns: Vec<usize> = (0..shooting.columns().len())
        .filter(|&i| i != right_key)
        .collect();
    let clashes = |name: &str| {
        name != DATE_COLUMN
            && left_columns.iter().any(|left| left == name)
            && right_columns
                .iter()
                .any(|&i| shooting.columns()[i] == name)
    };

    let mut columns: Vec<String> = left_columns
        .iter()
        .map(|name| {
            if clashes(name) {
                format!("{}_x", name)
            } else {
                name.clone()
            }
        })
        .collect();
    columns.extend(right_columns.iter().map(|&i| {
        let name = &shooting.columns()[i];
        if clashes(name) {
            format!("{}_y", name)
        } else {
            name.clone()
        }
    }));

    let rows = fixtures
        .rows()
        .iter()
        .filter_map(|row| {
            let right_row = &shooting.rows()[*right_index.get(row[left_key].as_str())?];
            let mut merged = row.clone();
            merged.extend(right_columns.iter().map(|&i| right_row[i].clone()));
            Some(merged)
        })
        .collect();

    Ok(Table::new(columns, rows))
}

fn filter_and_stamp(
    mut joined: Table,
    season: Season,
    team_name: &str,
    competition: &str,
) -> Result<Table, JoinError> {
    let comp = joined
        .column(COMPETITION_COLUMN)
        .ok_or(JoinError::MissingKey {
            side: JoinSide::Merged,
            column: COMPETITION_COLUMN.to_string(),
        })?;

    joined.retain_rows(|row| row[comp] == competition);
    joined.push_constant_column(SEASON_COLUMN, &season.to_string());
    joined.push_constant_column(TEAM_COLUMN, team_name);
    Ok(joined)
}

//! Crawler module for page fetching and table extraction
//!
//! This module contains the core scraping logic, including:
//! - Throttled HTTP fetching
//! - HTML table location and link extraction
//! - Per-team fixtures/shooting merging
//! - The season walk and overall run coordination

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;
mod table;
mod team;
mod walker;

pub use coordinator::{run_scrape, Coordinator};
pub use fetcher::{build_http_client, Fetcher};
pub use parser::{extract_links, first_link, LinkMatcher};
pub use scheduler::Throttle;
pub use table::{Table, TableLocator};
pub use team::{
    join_on_date, merge_team_tables, process_team, read_shooting_table, JoinError, JoinSide,
    SkipReason, TeamOutcome, SHOOTING_COLUMNS,
};
pub use walker::{read_standings_page, SeasonPage, SeasonWalk};

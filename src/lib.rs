//! match-stats: a patient football match statistics scraper
//!
//! This crate walks a competition's standings pages season by season, joins
//! each team's fixtures with its per-match shooting statistics, and exports
//! the merged rows to a flat CSV file. Requests are strictly sequential and
//! paced to stay under the site's rate limit.

pub mod config;
pub mod crawler;
pub mod output;
pub mod season;
pub mod url;

use thiserror::Error;

/// Main error type for match-stats operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("No table matching {locator} found at {url}")]
    TableNotFound { url: String, locator: String },

    #[error("Unusable table at {url}: {source}")]
    Table { url: String, source: TableError },

    #[error("No team links found in standings table at {url}")]
    NoTeamLinks { url: String },

    #[error("Invalid CSS selector '{0}'")]
    InvalidSelector(String),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

impl ScrapeError {
    /// Attaches the page URL to a table error
    pub fn from_table(url: &::url::Url, error: TableError) -> Self {
        match error {
            TableError::NotFound(locator) => ScrapeError::TableNotFound {
                url: url.to_string(),
                locator,
            },
            TableError::InvalidSelector(css) => ScrapeError::InvalidSelector(css),
            other => ScrapeError::Table {
                url: url.to_string(),
                source: other,
            },
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while locating or reshaping an HTML table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("no table matching {0}")]
    NotFound(String),

    #[error("invalid CSS selector '{0}'")]
    InvalidSelector(String),

    #[error("table has a single header level, nothing to collapse")]
    FlatHeader,

    #[error("table is missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// Result type alias for match-stats operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, Table, TableLocator};
pub use season::Season;
pub use crate::url::{team_name_from_url, TeamReference};

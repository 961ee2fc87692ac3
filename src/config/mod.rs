//! Configuration module for match-stats
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Running without a file uses [`Config::default`].
//!
//! # Example
//!
//! ```no_run
//! use match_stats::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Walking back {} seasons", config.scraper.seasons);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, OutputConfig, ScraperConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;

//! Scrape coordinator - main orchestration logic
//!
//! This module drives the whole run:
//! - Resolving the starting standings page and season label
//! - Walking back through seasons
//! - Processing every team of every season
//! - Exporting the result set and reporting statistics

use crate::config::{validate, Config};
use crate::crawler::fetcher::Fetcher;
use crate::crawler::table::Table;
use crate::crawler::team::{process_team, TeamOutcome};
use crate::crawler::walker::SeasonWalk;
use crate::output::{write_csv, RunStatistics};
use crate::season::Season;
use crate::ScrapeError;
use std::path::Path;
use std::time::Instant;
use url::Url;

/// Main scrape coordinator structure
pub struct Coordinator {
    config: Config,
    fetcher: Fetcher,
    start_url: Url,
    season: Season,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// The starting season is `scraper.season` when configured, otherwise the
    /// season that is current today.
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(ScrapeError)` - Invalid config or HTTP client construction failed
    pub fn new(config: Config) -> Result<Self, ScrapeError> {
        validate(&config)?;

        let base = Url::parse(&config.scraper.base_url)?;
        let start_url = base.join(&config.scraper.standings_path)?;
        let season = config
            .scraper
            .season
            .map(Season)
            .unwrap_or_else(Season::current);
        let fetcher = Fetcher::from_config(&config)?;

        Ok(Self {
            config,
            fetcher,
            start_url,
            season,
        })
    }

    /// Season label of the starting standings page
    pub fn season(&self) -> Season {
        self.season
    }

    /// URL of the starting standings page
    pub fn start_url(&self) -> &Url {
        &self.start_url
    }

    /// Walks the configured seasons and returns every team's merged rows
    ///
    /// Row sets are ordered by season (newest first), then by standings
    /// order. Skipped teams are logged and counted in `stats`.
    pub async fn collect(
        &mut self,
        stats: &mut RunStatistics,
    ) -> Result<Vec<Table>, ScrapeError> {
        let scraper = &self.config.scraper;
        let mut walk = SeasonWalk::new(self.start_url.clone(), self.season, scraper.seasons)
            .with_max_teams(scraper.max_teams);
        let mut result_set = Vec::new();

        while let Some(page) = walk.next_page(&mut self.fetcher).await? {
            tracing::info!(
                "Season {}: {} teams from {}",
                page.season,
                page.teams.len(),
                page.url
            );
            stats.seasons_walked += 1;

            for team in &page.teams {
                stats.teams_seen += 1;

                match process_team(&mut self.fetcher, team, page.season, &scraper.competition)
                    .await?
                {
                    TeamOutcome::Merged(rows) => {
                        tracing::info!("Processed: {} - {}", page.season, team.name);
                        stats.teams_merged += 1;
                        stats.rows_collected += rows.len() as u64;
                        result_set.push(rows);
                    }
                    TeamOutcome::Skipped(reason) => {
                        tracing::warn!("Skipped: {} - {}: {}", page.season, team.name, reason);
                        stats.record_skip(&reason);
                    }
                }
            }
        }

        stats.requests = self.fetcher.requests_made();
        Ok(result_set)
    }

    /// Runs the full scrape and writes the CSV file
    ///
    /// Nothing is written until every season has been processed; a fatal
    /// error part way through discards the rows collected so far.
    pub async fn run(&mut self) -> Result<RunStatistics, ScrapeError> {
        let start_time = Instant::now();
        let mut stats = RunStatistics::new();

        tracing::info!(
            "Starting scrape at {} (season {}, {} season(s))",
            self.start_url,
            self.season,
            self.config.scraper.seasons
        );

        let result_set = self.collect(&mut stats).await?;

        let path = Path::new(&self.config.output.csv_path);
        let written = write_csv(&result_set, path)?;
        stats.rows_written = written as u64;
        stats.elapsed = start_time.elapsed();

        tracing::info!("Data saved to {} ({} rows)", path.display(), written);
        Ok(stats)
    }
}

/// Runs the main scrape operation
///
/// # Example
///
/// ```no_run
/// use match_stats::config::Config;
/// use match_stats::crawler::run_scrape;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let stats = run_scrape(Config::default()).await?;
/// println!("{} rows written", stats.rows_written);
/// # Ok(())
/// # }
/// ```
pub async fn run_scrape(config: Config) -> Result<RunStatistics, ScrapeError> {
    let mut coordinator = Coordinator::new(config)?;
    coordinator.run().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinator_start_url_and_season() {
        let mut config = Config::default();
        config.scraper.season = Some(2024);

        let coordinator = Coordinator::new(config).unwrap();
        assert_eq!(
            coordinator.start_url().as_str(),
            "https://fbref.com/en/comps/9/Premier-League-Stats"
        );
        assert_eq!(coordinator.season(), Season(2024));
    }

    #[test]
    fn test_coordinator_defaults_to_current_season() {
        let coordinator = Coordinator::new(Config::default()).unwrap();
        assert_eq!(coordinator.season(), Season::current());
    }

    #[test]
    fn test_coordinator_rejects_bad_base_url() {
        let mut config = Config::default();
        config.scraper.base_url = "::not a url".to_string();
        assert!(matches!(
            Coordinator::new(config),
            Err(ScrapeError::Config(_))
        ));
    }

    #[test]
    fn test_coordinator_rejects_zero_seasons() {
        let mut config = Config::default();
        config.scraper.seasons = 0;
        assert!(Coordinator::new(config).is_err());
    }
}

//! Season walk over standings pages
//!
//! Standings pages link to the previous season's standings, so seasons are
//! discovered one page at a time. [`SeasonWalk`] yields those pages lazily
//! and stops after a fixed number of seasons or when a page has no
//! "previous season" link, whichever comes first.

use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::{extract_links, first_link, LinkMatcher};
use crate::crawler::table::TableLocator;
use crate::season::Season;
use crate::url::TeamReference;
use crate::ScrapeError;
use scraper::Html;
use url::Url;

/// CSS selector of the standings table
pub const STANDINGS_TABLE_SELECTOR: &str = "table.stats_table";

/// Href fragment of team squad links
pub const TEAM_LINK_PATTERN: &str = "/squads/";

/// CSS selector of the previous-season link
pub const PREVIOUS_SEASON_SELECTOR: &str = "a.prev";

/// One season's standings page, read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonPage {
    /// Season label of this page
    pub season: Season,

    /// URL the page was fetched from
    pub url: Url,

    /// Teams in standings-table order
    pub teams: Vec<TeamReference>,

    /// Standings page of the season before, if linked
    pub previous: Option<Url>,
}

/// Bounded, lazily fetched sequence of standings pages
#[derive(Debug, Clone)]
pub struct SeasonWalk {
    /// Next page to fetch and its season label
    pending: Option<(Season, Url)>,

    /// Pages still allowed to be yielded
    remaining: usize,

    /// Per-season team cap
    max_teams: Option<usize>,
}

impl SeasonWalk {
    /// Creates a walk starting at `start` (labelled `season`) that yields at
    /// most `limit` pages
    pub fn new(start: Url, season: Season, limit: usize) -> Self {
        Self {
            pending: Some((season, start)),
            remaining: limit,
            max_teams: None,
        }
    }

    /// Caps the number of teams kept from each standings page
    pub fn with_max_teams(mut self, max_teams: Option<usize>) -> Self {
        self.max_teams = max_teams;
        self
    }

    /// Pages the walk may still yield
    pub fn remaining(&self) -> usize {
        if self.pending.is_some() {
            self.remaining
        } else {
            0
        }
    }

    /// Fetches and reads the next standings page
    ///
    /// # Returns
    ///
    /// * `Ok(Some(SeasonPage))` - The next season
    /// * `Ok(None)` - The walk is over (cap reached or no previous link)
    /// * `Err(ScrapeError)` - Fetch failed, or the page has no standings
    ///   table or no team links
    pub async fn next_page(
        &mut self,
        fetcher: &mut Fetcher,
    ) -> Result<Option<SeasonPage>, ScrapeError> {
        if self.remaining == 0 {
            return Ok(None);
        }
        let Some((season, url)) = self.pending.take() else {
            return Ok(None);
        };

        let body = fetcher.fetch_page(&url).await?;
        let mut page = read_standings_page(&body, &url, season)?;

        if let Some(max_teams) = self.max_teams {
            page.teams.truncate(max_teams);
        }

        self.remaining -= 1;
        self.pending = page
            .previous
            .clone()
            .map(|previous| (season.previous(), previous));

        if self.remaining > 0 && self.pending.is_none() {
            tracing::warn!(
                "No previous-season link on {}; stopping after season {}",
                url,
                season
            );
        }

        Ok(Some(page))
    }
}

/// Reads team links and the previous-season link from a standings page
pub fn read_standings_page(
    body: &str,
    url: &Url,
    season: Season,
) -> Result<SeasonPage, ScrapeError> {
    let document = Html::parse_document(body);

    let standings = TableLocator::selector(STANDINGS_TABLE_SELECTOR)
        .locate(&document)
        .map_err(|e| ScrapeError::from_table(url, e))?;

    let teams: Vec<TeamReference> = extract_links(
        standings,
        &LinkMatcher::path_contains(TEAM_LINK_PATTERN),
        url,
    )?
    .into_iter()
    .map(TeamReference::from_url)
    .collect();

    if teams.is_empty() {
        return Err(ScrapeError::NoTeamLinks {
            url: url.to_string(),
        });
    }

    let previous = first_link(
        document.root_element(),
        &LinkMatcher::selector(PREVIOUS_SEASON_SELECTOR),
        url,
    )?;

    Ok(SeasonPage {
        season,
        url: url.clone(),
        teams,
        previous,
    })
}

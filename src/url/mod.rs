//! URL handling module for match-stats
//!
//! This module resolves scraped hrefs against the site origin and derives
//! team references from squad page URLs.

mod resolve;
mod slug;

use url::Url;

// Re-export main functions
pub use resolve::{resolve_href, same_origin};
pub use slug::team_name_from_url;

/// A team's squad page and the display name derived from its URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamReference {
    /// Absolute URL of the team's squad page
    pub url: Url,

    /// Human-readable team name, e.g. "Manchester United"
    pub name: String,
}

impl TeamReference {
    /// Builds a reference from a squad page URL
    ///
    /// # Examples
    ///
    /// ```
    /// use match_stats::url::TeamReference;
    /// use url::Url;
    ///
    /// let url = Url::parse("https://fbref.com/en/squads/19538871/Manchester-United-Stats").unwrap();
    /// let team = TeamReference::from_url(url);
    /// assert_eq!(team.name, "Manchester United");
    /// ```
    pub fn from_url(url: Url) -> Self {
        let name = team_name_from_url(url.as_str());
        Self { url, name }
    }
}

use serde::Deserialize;

/// Main configuration structure for match-stats
///
/// Every section and key is optional; missing values fall back to the
/// defaults that scrape the last two Premier League seasons from fbref.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scraper: ScraperConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Scrape target and pacing configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Site origin every scraped href is resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path of the current season's standings page
    #[serde(rename = "standings-path")]
    pub standings_path: String,

    /// Competition name kept by the `Comp` filter
    pub competition: String,

    /// Number of seasons to walk back through, current one included
    pub seasons: usize,

    /// Cap on teams processed per season (all teams when unset)
    #[serde(rename = "max-teams")]
    pub max_teams: Option<usize>,

    /// Season label of the starting standings page (computed from today when unset)
    pub season: Option<i32>,

    /// Minimum time between two requests to the site (milliseconds)
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: "https://fbref.com".to_string(),
            standings_path: "/en/comps/9/Premier-League-Stats".to_string(),
            competition: "Premier League".to_string(),
            seasons: 2,
            max_teams: None,
            season: None,
            request_delay_ms: 30_000,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the scraper
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the scraper
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the scraper
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,

    /// Email address for scraper-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "match-stats".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
            contact_email: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    ///
    /// `Name/Version`, followed by `(+ContactURL; ContactEmail)` when either
    /// contact is configured.
    pub fn header_value(&self) -> String {
        let contacts: Vec<String> = [
            self.contact_url.as_ref().map(|u| format!("+{}", u)),
            self.contact_email.clone(),
        ]
        .into_iter()
        .flatten()
        .collect();

        if contacts.is_empty() {
            format!("{}/{}", self.crawler_name, self.crawler_version)
        } else {
            format!(
                "{}/{} ({})",
                self.crawler_name,
                self.crawler_version,
                contacts.join("; ")
            )
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the merged CSV file
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "matches.csv".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_target_premier_league() {
        let config = Config::default();
        assert_eq!(config.scraper.base_url, "https://fbref.com");
        assert_eq!(config.scraper.competition, "Premier League");
        assert_eq!(config.scraper.seasons, 2);
        assert_eq!(config.scraper.max_teams, None);
        assert_eq!(config.output.csv_path, "matches.csv");
    }

    #[test]
    fn test_user_agent_without_contacts() {
        let ua = UserAgentConfig {
            crawler_name: "Bot".to_string(),
            crawler_version: "2.1".to_string(),
            contact_url: None,
            contact_email: None,
        };
        assert_eq!(ua.header_value(), "Bot/2.1");
    }

    #[test]
    fn test_user_agent_with_contacts() {
        let ua = UserAgentConfig {
            crawler_name: "Bot".to_string(),
            crawler_version: "2.1".to_string(),
            contact_url: Some("https://example.com/about".to_string()),
            contact_email: Some("admin@example.com".to_string()),
        };
        assert_eq!(
            ua.header_value(),
            "Bot/2.1 (+https://example.com/about; admin@example.com)"
        );
    }
}

//! End-to-end scrape tests against a mock stats site

use crate::pages::{shooting_page, standings_page, team_page};
use match_stats::config::Config;
use match_stats::crawler::Coordinator;
use match_stats::ScrapeError;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const STANDINGS_PATH: &str = "/en/comps/9/Premier-League-Stats";
const TEAM_ONE_PATH: &str = "/squads/abc/Team-One-Stats";
const TEAM_TWO_PATH: &str = "/squads/def/Team-Two-Stats";
const TEAM_ONE_SHOOTING_PATH: &str =
    "/en/squads/abc/2023-2024/matchlogs/all_comps/shooting/Team-One-Match-Logs-All-Competitions";

/// Config pointing at the mock server with no request delay
fn test_config(server: &MockServer, dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.scraper.base_url = server.uri();
    config.scraper.standings_path = STANDINGS_PATH.to_string();
    config.scraper.season = Some(2024);
    config.scraper.request_delay_ms = 0;
    config.output.csv_path = dir.path().join("matches.csv").display().to_string();
    config
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_unreachable(server: &MockServer, route: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .expect(0)
        .mount(server)
        .await;
}

/// Team One: a league match and a cup match, both with shooting rows
async fn mount_team_one(server: &MockServer) {
    mount_page(
        server,
        TEAM_ONE_PATH,
        team_page(
            &[
                ("2024-01-01", "Premier League", "Arsenal"),
                ("2024-01-08", "FA Cup", "Chelsea"),
            ],
            Some(TEAM_ONE_SHOOTING_PATH),
        ),
    )
    .await;
    mount_page(
        server,
        TEAM_ONE_SHOOTING_PATH,
        shooting_page(&[("2024-01-01", "14", "6"), ("2024-01-08", "9", "2")]),
    )
    .await;
}

fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let headers = reader
        .headers()
        .unwrap()
        .iter()
        .map(String::from)
        .collect();
    let rows = reader
        .records()
        .map(|record| record.unwrap().iter().map(String::from).collect())
        .collect();
    (headers, rows)
}

fn cell<'a>(headers: &[String], row: &'a [String], name: &str) -> &'a str {
    let index = headers.iter().position(|h| h == name).unwrap();
    &row[index]
}

#[tokio::test]
async fn test_scrape_end_to_end() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(
        &server,
        STANDINGS_PATH,
        standings_page(&[TEAM_ONE_PATH, TEAM_TWO_PATH], None),
    )
    .await;
    mount_team_one(&server).await;
    mount_page(
        &server,
        TEAM_TWO_PATH,
        team_page(&[("2024-01-01", "Premier League", "Everton")], None),
    )
    .await;

    let config = test_config(&server, &dir);
    let csv_path = config.output.csv_path.clone();
    let mut coordinator = Coordinator::new(config).unwrap();
    let stats = coordinator.run().await.unwrap();

    assert_eq!(stats.seasons_walked, 1);
    assert_eq!(stats.teams_seen, 2);
    assert_eq!(stats.teams_merged, 1);
    assert_eq!(stats.skipped.get("shooting link missing"), Some(&1));
    assert_eq!(stats.rows_written, 1);
    assert_eq!(stats.requests, 4);

    let (headers, rows) = read_csv(Path::new(&csv_path));
    assert_eq!(
        headers,
        [
            "date",
            "time",
            "comp",
            "round",
            "venue",
            "result",
            "gf",
            "ga",
            "opponent",
            "match report",
            "sh",
            "sot",
            "dist",
            "fk",
            "pk",
            "pkatt",
            "season",
            "team"
        ]
    );
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert_eq!(cell(&headers, row, "date"), "2024-01-01");
    assert_eq!(cell(&headers, row, "comp"), "Premier League");
    assert_eq!(cell(&headers, row, "sh"), "14");
    assert_eq!(cell(&headers, row, "sot"), "6");
    assert_eq!(cell(&headers, row, "season"), "2024");
    assert_eq!(cell(&headers, row, "team"), "Team One");
}

#[tokio::test]
async fn test_walk_stops_at_season_cap() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let second = "/en/comps/9/2023-2024/2023-2024-Premier-League-Stats";
    let third = "/en/comps/9/2022-2023/2022-2023-Premier-League-Stats";

    mount_page(
        &server,
        STANDINGS_PATH,
        standings_page(&[TEAM_ONE_PATH], Some(second)),
    )
    .await;
    mount_page(&server, second, standings_page(&[TEAM_ONE_PATH], Some(third))).await;
    mount_unreachable(&server, third).await;
    mount_team_one(&server).await;

    let mut config = test_config(&server, &dir);
    config.scraper.season = Some(2025);
    config.scraper.seasons = 2;
    let csv_path = config.output.csv_path.clone();

    let stats = Coordinator::new(config).unwrap().run().await.unwrap();
    assert_eq!(stats.seasons_walked, 2);
    assert_eq!(stats.teams_merged, 2);

    let (headers, rows) = read_csv(Path::new(&csv_path));
    let seasons: Vec<&str> = rows
        .iter()
        .map(|row| cell(&headers, row, "season"))
        .collect();
    assert_eq!(seasons, ["2025", "2024"]);
}

#[tokio::test]
async fn test_walk_stops_without_previous_link() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(&server, STANDINGS_PATH, standings_page(&[TEAM_ONE_PATH], None)).await;
    mount_team_one(&server).await;

    let mut config = test_config(&server, &dir);
    config.scraper.seasons = 3;

    let stats = Coordinator::new(config).unwrap().run().await.unwrap();
    assert_eq!(stats.seasons_walked, 1);
    assert_eq!(stats.rows_written, 1);
}

#[tokio::test]
async fn test_max_teams_truncates_standings() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(
        &server,
        STANDINGS_PATH,
        standings_page(&[TEAM_ONE_PATH, TEAM_TWO_PATH], None),
    )
    .await;
    mount_team_one(&server).await;
    mount_unreachable(&server, TEAM_TWO_PATH).await;

    let mut config = test_config(&server, &dir);
    config.scraper.max_teams = Some(1);

    let stats = Coordinator::new(config).unwrap().run().await.unwrap();
    assert_eq!(stats.teams_seen, 1);
    assert_eq!(stats.teams_merged, 1);
}

#[tokio::test]
async fn test_error_status_shooting_page_skips_team() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(&server, STANDINGS_PATH, standings_page(&[TEAM_ONE_PATH], None)).await;
    mount_page(
        &server,
        TEAM_ONE_PATH,
        team_page(
            &[("2024-01-01", "Premier League", "Arsenal")],
            Some(TEAM_ONE_SHOOTING_PATH),
        ),
    )
    .await;
    Mock::given(method("GET"))
        .and(path(TEAM_ONE_SHOOTING_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
        .mount(&server)
        .await;

    let config = test_config(&server, &dir);
    let csv_path = config.output.csv_path.clone();

    let stats = Coordinator::new(config).unwrap().run().await.unwrap();
    assert_eq!(stats.teams_merged, 0);
    assert_eq!(stats.skipped.get("shooting table missing"), Some(&1));

    // Nothing collected: the file exists but is empty
    let written = std::fs::metadata(&csv_path).unwrap();
    assert_eq!(written.len(), 0);
}

#[tokio::test]
async fn test_duplicate_shooting_dates_skip_team() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(&server, STANDINGS_PATH, standings_page(&[TEAM_ONE_PATH], None)).await;
    mount_page(
        &server,
        TEAM_ONE_PATH,
        team_page(
            &[("2024-01-01", "Premier League", "Arsenal")],
            Some(TEAM_ONE_SHOOTING_PATH),
        ),
    )
    .await;
    mount_page(
        &server,
        TEAM_ONE_SHOOTING_PATH,
        shooting_page(&[("2024-01-01", "14", "6"), ("2024-01-01", "3", "1")]),
    )
    .await;

    let config = test_config(&server, &dir);
    let stats = Coordinator::new(config).unwrap().run().await.unwrap();
    assert_eq!(stats.skipped.get("duplicate date"), Some(&1));
}

#[tokio::test]
async fn test_missing_fixtures_table_is_fatal() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(&server, STANDINGS_PATH, standings_page(&[TEAM_ONE_PATH], None)).await;
    mount_page(
        &server,
        TEAM_ONE_PATH,
        "<html><body><p>Squad page under maintenance</p></body></html>".to_string(),
    )
    .await;

    let config = test_config(&server, &dir);
    let csv_path = config.output.csv_path.clone();

    let result = Coordinator::new(config).unwrap().run().await;
    assert!(matches!(result, Err(ScrapeError::TableNotFound { .. })));
    assert!(!Path::new(&csv_path).exists());
}

#[tokio::test]
async fn test_missing_standings_table_is_fatal() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(
        &server,
        STANDINGS_PATH,
        "<html><body>No tables here</body></html>".to_string(),
    )
    .await;

    let config = test_config(&server, &dir);
    let result = Coordinator::new(config).unwrap().run().await;
    assert!(matches!(result, Err(ScrapeError::TableNotFound { .. })));
}

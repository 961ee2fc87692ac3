//! Integration tests for the scraper
//!
//! These tests use wiremock to stand in for the stats site and run full
//! season walks end-to-end.

mod pages;
mod scrape_tests;

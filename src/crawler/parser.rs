//! HTML link extraction
//!
//! Navigation on the stats site happens through three kinds of anchors:
//! squad links in the standings table, the shooting match-log link on a
//! team page, and the "previous season" arrow on a standings page. All
//! three go through [`extract_links`] with a different [`LinkMatcher`].

use crate::url::resolve_href;
use crate::ScrapeError;
use scraper::{ElementRef, Selector};
use url::Url;

/// Predicate selecting which anchors to keep
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkMatcher {
    /// `a[href]` elements whose raw href contains the substring
    PathContains(String),

    /// Elements matching a CSS selector that carry an `href`
    Selector(String),
}

impl LinkMatcher {
    /// Matcher for hrefs containing `needle`, e.g. `/squads/`
    pub fn path_contains(needle: impl Into<String>) -> Self {
        Self::PathContains(needle.into())
    }

    /// Matcher for a CSS selector, e.g. `a.prev`
    pub fn selector(css: impl Into<String>) -> Self {
        Self::Selector(css.into())
    }
}

/// Extracts matching links inside `scope` as absolute URLs
///
/// Links are returned in document order without duplicates. Each href is
/// resolved against `base`; hrefs that resolve to another origin or use a
/// non-navigational scheme are dropped.
///
/// # Arguments
///
/// * `scope` - The element to search in (use `Html::root_element` for a whole page)
/// * `matcher` - Which anchors to keep
/// * `base` - The URL relative hrefs are resolved against
///
/// # Returns
///
/// * `Ok(Vec<Url>)` - Matching links, possibly empty
/// * `Err(ScrapeError::InvalidSelector)` - The matcher's CSS selector did not parse
///
/// # Example
///
/// ```
/// use match_stats::crawler::{extract_links, LinkMatcher};
/// use scraper::Html;
/// use url::Url;
///
/// let html = r#"<a href="/squads/abc/Team-One-Stats">One</a><a href="/about">About</a>"#;
/// let document = Html::parse_document(html);
/// let base = Url::parse("https://fbref.com").unwrap();
/// let links = extract_links(
///     document.root_element(),
///     &LinkMatcher::path_contains("/squads/"),
///     &base,
/// )
/// .unwrap();
/// assert_eq!(links.len(), 1);
/// ```
pub fn extract_links(
    scope: ElementRef<'_>,
    matcher: &LinkMatcher,
    base: &Url,
) -> Result<Vec<Url>, ScrapeError> {
    let (css, needle) = match matcher {
        LinkMatcher::PathContains(needle) => ("a[href]", Some(needle.as_str())),
        LinkMatcher::Selector(css) => (css.as_str(), None),
    };

    let selector =
        Selector::parse(css).map_err(|_| ScrapeError::InvalidSelector(css.to_string()))?;

    let mut links: Vec<Url> = Vec::new();
    for element in scope.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        if let Some(needle) = needle {
            if !href.contains(needle) {
                continue;
            }
        }

        if let Some(url) = resolve_href(href, base) {
            if !links.contains(&url) {
                links.push(url);
            }
        }
    }

    Ok(links)
}

/// Returns the first link matching `matcher`, if any
pub fn first_link(
    scope: ElementRef<'_>,
    matcher: &LinkMatcher,
    base: &Url,
) -> Result<Option<Url>, ScrapeError> {
    Ok(extract_links(scope, matcher, base)?.into_iter().next())
}

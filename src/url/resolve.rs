use url::Url;

/// Resolves a link href to an absolute URL on the base origin
///
/// Returns None if the link should be excluded:
/// - empty and fragment-only hrefs
/// - javascript:, mailto:, tel:, data: schemes
/// - hrefs that fail to parse
/// - URLs on a different origin than `base`
///
/// # Examples
///
/// ```
/// use match_stats::url::resolve_href;
/// use url::Url;
///
/// let base = Url::parse("https://fbref.com").unwrap();
/// let url = resolve_href("/en/squads/abc/Team-Stats", &base).unwrap();
/// assert_eq!(url.as_str(), "https://fbref.com/en/squads/abc/Team-Stats");
/// ```
pub fn resolve_href(href: &str, base: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let absolute = base.join(href).ok()?;
    if same_origin(&absolute, base) {
        Some(absolute)
    } else {
        tracing::trace!("Ignoring off-site link {}", absolute);
        None
    }
}

/// Returns true when both URLs share scheme, host and port
pub fn same_origin(a: &Url, b: &Url) -> bool {
    a.origin() == b.origin()
}

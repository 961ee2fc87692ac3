use percent_encoding::percent_decode_str;

/// Suffix fbref appends to squad page slugs
const STATS_SUFFIX: &str = "-Stats";

/// Derives a team's display name from its squad page URL
///
/// Takes the last non-empty path segment, strips the `-Stats` suffix and
/// turns the remaining hyphens into spaces. Percent-escapes are decoded, so
/// parsed and raw hrefs give the same name. Query strings and fragments are
/// ignored.
///
/// # Examples
///
/// ```
/// use match_stats::team_name_from_url;
///
/// let name = team_name_from_url("https://fbref.com/squads/team1/Manchester-United-Stats");
/// assert_eq!(name, "Manchester United");
/// ```
pub fn team_name_from_url(team_url: &str) -> String {
    let path = team_url
        .split(['?', '#'])
        .next()
        .unwrap_or(team_url);

    let slug = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .last()
        .unwrap_or("");

    let slug = percent_decode_str(slug).decode_utf8_lossy();
    slug.strip_suffix(STATS_SUFFIX)
        .unwrap_or(&*slug)
        .replace('-', " ")
}

//! HTML fixtures shaped like the stats site's pages

/// Standings page listing `squad_hrefs`, optionally linking a previous season
pub fn standings_page(squad_hrefs: &[&str], previous: Option<&str>) -> String {
    let rows: String = squad_hrefs
        .iter()
        .enumerate()
        .map(|(i, href)| {
            format!(
                r#"<tr><th scope="row">{}</th><td data-stat="team"><a href="{}">Team</a></td><td>38</td></tr>"#,
                i + 1,
                href
            )
        })
        .collect();

    let prev = previous
        .map(|href| format!(r#"<a class="button2 prev" href="{}">Previous Season</a>"#, href))
        .unwrap_or_default();

    format!(
        r#"<html><body>
        <div class="prevnext">{prev}<a class="button2 next" href="/en/comps/9/future">Next Season</a></div>
        <table class="stats_table sortable" id="results_overall">
            <caption>Regular season Table</caption>
            <thead><tr><th>Rk</th><th>Squad</th><th>MP</th></tr></thead>
            <tbody>{rows}</tbody>
        </table>
        <a href="/squads/nav/Navigation-Stats">Sidebar link outside the standings</a>
        </body></html>"#
    )
}

/// Team page with a fixtures table of `(date, comp, opponent)` rows and an
/// optional shooting match-log link
pub fn team_page(fixtures: &[(&str, &str, &str)], shooting_href: Option<&str>) -> String {
    let rows: String = fixtures
        .iter()
        .map(|(date, comp, opponent)| {
            format!(
                r#"<tr><th scope="row" data-stat="date">{date}</th><td>15:00</td><td>{comp}</td><td>Matchweek 1</td><td>Home</td><td>W</td><td>2</td><td>1</td><td>{opponent}</td><td>Match Report</td></tr>"#
            )
        })
        .collect();

    let link = shooting_href
        .map(|href| format!(r#"<a href="{}">Shooting</a>"#, href))
        .unwrap_or_default();

    format!(
        r#"<html><body>
        <div class="filter">{link}<a href="/en/squads/x/2023-2024/matchlogs/all_comps/passing/Logs">Passing</a></div>
        <table class="stats_table" id="matchlogs_for">
            <caption>Scores &amp; Fixtures Table</caption>
            <thead><tr><th>Date</th><th>Time</th><th>Comp</th><th>Round</th><th>Venue</th><th>Result</th><th>GF</th><th>GA</th><th>Opponent</th><th>Match Report</th></tr></thead>
            <tbody>{rows}</tbody>
        </table>
        </body></html>"#
    )
}

/// Shooting match-log page with a two-level header and `(date, sh, sot)` rows
pub fn shooting_page(rows: &[(&str, &str, &str)]) -> String {
    let body: String = rows
        .iter()
        .map(|(date, sh, sot)| {
            format!(
                r#"<tr><th scope="row">{date}</th><td>Premier League</td><td>Arsenal</td><td>1</td><td>{sh}</td><td>{sot}</td><td>17.3</td><td>0</td><td>0</td><td>0</td><td>1.2</td></tr>"#
            )
        })
        .collect();

    format!(
        r#"<html><body>
        <table class="stats_table" id="matchlogs_for">
            <caption>Shooting 2023-2024: All Competitions Table</caption>
            <thead>
                <tr class="over_header"><th colspan="3"></th><th colspan="7" data-over-header="Standard">Standard</th><th data-over-header="Expected">Expected</th></tr>
                <tr><th>Date</th><th>Comp</th><th>Opponent</th><th>Gls</th><th>Sh</th><th>SoT</th><th>Dist</th><th>FK</th><th>PK</th><th>PKatt</th><th>xG</th></tr>
            </thead>
            <tbody>{body}</tbody>
        </table>
        </body></html>"#
    )
}

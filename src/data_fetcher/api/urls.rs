//! URL building utilities for API endpoints

/// Prefixes `https://` onto a domain that carries no scheme.
///
/// Domains that already start with `http://` or `https://` are returned
/// unchanged.
///
/// # Example
/// ```
/// use mlb_standings::data_fetcher::api::ensure_scheme;
///
/// assert_eq!(ensure_scheme("statsapi.mlb.com"), "https://statsapi.mlb.com");
/// assert_eq!(ensure_scheme("http://127.0.0.1:8080"), "http://127.0.0.1:8080");
/// ```
pub fn ensure_scheme(api_domain: &str) -> String {
    if api_domain.starts_with("http://") || api_domain.starts_with("https://") {
        api_domain.to_string()
    } else {
        format!("https://{api_domain}")
    }
}

/// Builds the standings URL for a set of leagues and a season.
///
/// League ids are joined with commas as the provider expects.
///
/// # Example
/// ```
/// use mlb_standings::data_fetcher::api::build_standings_url;
///
/// let url = build_standings_url("https://api.example.com", &[103, 104], 2025);
/// assert_eq!(url, "https://api.example.com/api/v1/standings?leagueId=103,104&season=2025");
/// ```
pub fn build_standings_url(api_domain: &str, league_ids: &[u32], season: i32) -> String {
    let leagues = league_ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "{}/api/v1/standings?leagueId={leagues}&season={season}",
        ensure_scheme(api_domain).trim_end_matches('/')
    )
}

use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};
use mlb_standings::DisplayMode;
use mlb_standings::constants::DEFAULT_TOP_TEAMS;

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Returns true when the arguments only touch configuration and no
/// standings should be shown
pub fn is_config_operation(args: &Args) -> bool {
    args.new_api_domain.is_some() || args.new_log_file_path.is_some() || args.clear_log_file_path
}

/// MLB Standings
///
/// Shows Major League Baseball standings from the MLB Stats API.
/// Standings are fetched at most once per day and kept in a local store;
/// when the API is unreachable the last stored standings are shown instead.
///
/// Screens:
/// - favorite: the favorite team's abbreviation
/// - record:   the favorite team's wins and losses
/// - division: the favorite team's division, in division rank order
/// - top:      the best teams across both leagues
#[derive(Parser, Debug)]
#[command(about, long_about = None, version)]
#[command(styles = get_styles())]
pub struct Args {
    /// Screen to show
    #[arg(
        long,
        short = 'm',
        value_enum,
        default_value_t = DisplayMode::Favorite,
        help_heading = "Display Options"
    )]
    pub mode: DisplayMode,

    /// Number of teams on the top teams screen
    #[arg(long = "top-count", short = 'n', default_value_t = DEFAULT_TOP_TEAMS, help_heading = "Display Options")]
    pub top_count: usize,

    /// Show the division of this team instead of the favorite's.
    /// Must match the full team name, e.g. "Seattle Mariners".
    #[arg(long = "team", short = 't', help_heading = "Display Options")]
    pub team: Option<String>,

    /// Store a new favorite team and exit
    #[arg(long = "set-favorite", help_heading = "Standings")]
    pub set_favorite: Option<String>,

    /// Fetch standings now (unless today's are already stored) and report the result
    #[arg(long = "refresh", short = 'r', help_heading = "Standings")]
    pub refresh: bool,

    /// Comma separated league ids, overriding the configured ones (103 = AL, 104 = NL)
    #[arg(long = "league-ids", value_delimiter = ',', help_heading = "Standings")]
    pub league_ids: Option<Vec<u32>>,

    /// Season year, overriding the configured one
    #[arg(long = "season", help_heading = "Standings")]
    pub season: Option<i32>,

    /// Update API domain in config
    #[arg(long = "config", help_heading = "Configuration", value_name = "API_DOMAIN")]
    pub new_api_domain: Option<String>,

    /// Update log file path in config. This sets a persistent custom log file location.
    #[arg(long = "set-log-file", help_heading = "Configuration")]
    pub new_log_file_path: Option<String>,

    /// Clear the custom log file path from config. This reverts to using the default log location.
    #[arg(long = "clear-log-file", help_heading = "Configuration")]
    pub clear_log_file_path: bool,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Enable debug mode. Logs are also written to stdout.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["mlb_standings"]).unwrap();
        assert_eq!(args.mode, DisplayMode::Favorite);
        assert_eq!(args.top_count, 5);
        assert!(args.league_ids.is_none());
        assert!(!is_config_operation(&args));
    }

    #[test]
    fn test_mode_and_league_ids() {
        let args = Args::try_parse_from([
            "mlb_standings",
            "--mode",
            "top",
            "--league-ids",
            "103,104",
            "--season",
            "2024",
        ])
        .unwrap();

        assert_eq!(args.mode, DisplayMode::TopTeams);
        assert_eq!(args.league_ids, Some(vec![103, 104]));
        assert_eq!(args.season, Some(2024));
    }

    #[test]
    fn test_rejects_unknown_mode() {
        assert!(Args::try_parse_from(["mlb_standings", "--mode", "wildcard"]).is_err());
    }

    #[test]
    fn test_config_operations() {
        let args =
            Args::try_parse_from(["mlb_standings", "--config", "https://example.com"]).unwrap();
        assert!(is_config_operation(&args));

        let args = Args::try_parse_from(["mlb_standings", "--clear-log-file"]).unwrap();
        assert!(is_config_operation(&args));
    }
}

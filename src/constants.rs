//! Application-wide constants and configuration defaults
//!
//! Values here are defaults only. Everything the repository depends on is
//! passed in explicitly through `Config` / `RepositoryOptions`.

/// Default standings provider host
pub const DEFAULT_API_DOMAIN: &str = "https://statsapi.mlb.com";

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of idle connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 4;

/// American League and National League
pub const DEFAULT_LEAGUE_IDS: [u32; 2] = [103, 104];

/// Team shown until the user picks one
pub const DEFAULT_FAVORITE_TEAM: &str = "New York Yankees";

/// Number of teams in the top-N ranking view
pub const DEFAULT_TOP_TEAMS: usize = 5;

/// Retry policy defaults
pub mod retry {
    /// Total attempts including the first one
    pub const MAX_ATTEMPTS: u32 = 3;

    /// Base delay; attempt `n` (0-based) waits `BASE_DELAY_MS * (n + 1)`
    pub const BASE_DELAY_MS: u64 = 2000;
}

/// Persisted store keys
pub mod keys {
    /// Serialized snapshot text
    pub const CACHED_STANDINGS: &str = "cached_standings";

    /// Epoch milliseconds of the last successful cache write
    pub const LAST_UPDATE: &str = "last_update";

    /// Display name of the user's favorite team
    pub const FAVORITE_TEAM: &str = "favorite_team";
}

/// Sort ordinal for rank text that does not parse as an integer.
/// Larger than any valid rank so such entries always sort last.
pub const RANK_FALLBACK: i32 = i32::MAX;

/// Directory name used under the platform config/data directories
pub const APP_DIR_NAME: &str = "mlb_standings";

/// Log file name used when no custom path is configured
pub const LOG_FILE_NAME: &str = "mlb_standings.log";

use thiserror::Error;

/// Application-level errors: configuration, persistence and process setup.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("HTTP client setup error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

impl AppError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a store error with context
    pub fn store_error(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }
}

/// Failure of a single standings fetch or of reading the cached copy.
///
/// `Clone` so that one fetch outcome can be handed to every caller that
/// waited on it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Network unavailable while fetching {url}: {message}")]
    NetworkUnavailable { url: String, message: String },

    #[error("Network timeout while fetching data from: {url}")]
    Timeout { url: String },

    #[error("API returned HTTP {status} (URL: {url})")]
    HttpError { status: u16, url: String },

    #[error("API returned a malformed response: {message} (URL: {url})")]
    MalformedResponse { message: String, url: String },

    #[error("Request failed: {message} (URL: {url})")]
    Request { message: String, url: String },

    #[error("Cached standings could not be read: {0}")]
    CacheRead(String),
}

impl FetchError {
    pub fn network_unavailable(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NetworkUnavailable {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    pub fn http_error(status: u16, url: impl Into<String>) -> Self {
        Self::HttpError {
            status,
            url: url.into(),
        }
    }

    pub fn malformed_response(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
            url: url.into(),
        }
    }

    pub fn request(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Request {
            message: message.into(),
            url: url.into(),
        }
    }

    pub fn cache_read(message: impl Into<String>) -> Self {
        Self::CacheRead(message.into())
    }

    /// Only an unreachable host or a timeout is worth another attempt.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            FetchError::NetworkUnavailable { .. } | FetchError::Timeout { .. }
        )
    }
}

/// User-visible failure of a standings query, reported only when no stale
/// snapshot could stand in for a failed fetch.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum StandingsFailure {
    #[error("NET_ERR")]
    Network,

    #[error("TIMEOUT")]
    Timeout,

    #[error("API_ERR_{0}")]
    Api(u16),

    #[error("UNK_ERR")]
    Unknown,
}

impl StandingsFailure {
    /// Tag string, e.g. `API_ERR_503`
    pub fn code(&self) -> String {
        self.to_string()
    }
}

impl From<&FetchError> for StandingsFailure {
    fn from(error: &FetchError) -> Self {
        match error {
            FetchError::NetworkUnavailable { .. } => StandingsFailure::Network,
            FetchError::Timeout { .. } => StandingsFailure::Timeout,
            FetchError::HttpError { status, .. } => StandingsFailure::Api(*status),
            FetchError::MalformedResponse { .. }
            | FetchError::Request { .. }
            | FetchError::CacheRead(_) => StandingsFailure::Unknown,
        }
    }
}

pub mod client;
pub mod http_client;
pub mod retry;
pub mod urls;

// Re-export URL utilities
pub use urls::*;
// Re-export HTTP client utilities
pub use http_client::create_http_client_with_timeout;
pub use client::{HttpStandingsClient, StandingsSource};
pub use retry::{RetryConfig, RetryPolicy};

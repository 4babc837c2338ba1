pub mod api;
pub mod cache;
pub mod models;
pub mod queries;
pub mod repository;

pub use api::{HttpStandingsClient, StandingsSource};
pub use cache::{FileStore, KeyValueStore, MemoryStore};
pub use models::{StandingsSnapshot, TeamRecord};
pub use repository::{RepositoryOptions, StandingsRepository};

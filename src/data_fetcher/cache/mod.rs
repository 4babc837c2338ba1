pub mod favorites;
pub mod standings_cache;
pub mod store;

pub use favorites::FavoriteTeam;
pub use standings_cache::{StandingsCache, is_fresh, start_of_day};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoredValue};

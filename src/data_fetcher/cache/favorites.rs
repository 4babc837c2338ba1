use std::sync::Arc;
use tracing::info;

use super::store::KeyValueStore;
use crate::constants::keys::FAVORITE_TEAM;
use crate::error::AppError;

/// The user's favorite team, persisted by display name.
pub struct FavoriteTeam<S> {
    store: Arc<S>,
    default_name: String,
}

impl<S: KeyValueStore> FavoriteTeam<S> {
    pub fn new(store: Arc<S>, default_name: impl Into<String>) -> Self {
        Self {
            store,
            default_name: default_name.into(),
        }
    }

    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    /// Stored selection, or the configured default when nothing is stored.
    pub async fn get(&self) -> Result<String, AppError> {
        Ok(self
            .store
            .get_text(FAVORITE_TEAM)
            .await?
            .unwrap_or_else(|| self.default_name.clone()))
    }

    pub async fn set(&self, team_name: &str) -> Result<(), AppError> {
        self.store.set_text(FAVORITE_TEAM, team_name).await?;
        info!("Favorite team set to: {team_name}");
        Ok(())
    }
}

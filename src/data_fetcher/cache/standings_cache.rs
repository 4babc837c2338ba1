//! Same-day cache for the standings snapshot.
//!
//! A cached snapshot is fresh when it was stored at or after the start of
//! the current local day. Any stored snapshot, however old, is still
//! available through the stale read path.

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::store::{KeyValueStore, StoredValue};
use crate::constants::keys::{CACHED_STANDINGS, LAST_UPDATE};
use crate::data_fetcher::models::StandingsSnapshot;
use crate::error::{AppError, FetchError};

/// Start of `now`'s calendar day in `now`'s time zone.
///
/// Where local midnight does not exist (a DST gap) the first valid instant
/// an hour later is used.
pub fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let tz = now.timezone();
    let midnight = now.date_naive().and_hms_opt(0, 0, 0)?;
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(midnight + TimeDelta::hours(1))).earliest())
}

/// Whether a snapshot stored at `stored_ms` (epoch millis) is still fresh at `now`.
pub fn is_fresh<Tz: TimeZone>(stored_ms: i64, now: &DateTime<Tz>) -> bool {
    start_of_day(now).is_some_and(|start| stored_ms >= start.timestamp_millis())
}

pub struct StandingsCache<S> {
    store: Arc<S>,
}

impl<S: KeyValueStore> StandingsCache<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns the cached snapshot only if it was stored today.
    ///
    /// A missing snapshot is `Ok(None)`; unreadable stored data is an error
    /// so the caller can log it and go to the network.
    #[instrument(skip(self))]
    pub async fn read_if_fresh(&self) -> Result<Option<StandingsSnapshot>, FetchError> {
        let stored_ms = match self.store.get_integer(LAST_UPDATE).await {
            Ok(Some(ms)) => ms,
            Ok(None) => {
                debug!("No cache timestamp stored");
                return Ok(None);
            }
            Err(e) => return Err(FetchError::cache_read(e.to_string())),
        };

        if !is_fresh(stored_ms, &Local::now()) {
            debug!("Cached standings from {} are older than today", stored_ms);
            return Ok(None);
        }

        let snapshot = self.load_snapshot().await?;
        if snapshot.is_some() {
            debug!("Cache hit: standings stored at {}", stored_ms);
        }
        Ok(snapshot)
    }

    /// Returns whatever snapshot is stored, regardless of age.
    #[instrument(skip(self))]
    pub async fn read_stale(&self) -> Option<StandingsSnapshot> {
        match self.load_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Stale cache unusable: {}", e);
                None
            }
        }
    }

    /// Stores `snapshot` stamped with the current time.
    pub async fn write(&self, snapshot: &StandingsSnapshot) -> Result<(), AppError> {
        self.write_with_timestamp(snapshot, Utc::now().timestamp_millis())
            .await
    }

    /// Stores `snapshot` with an explicit epoch-millisecond timestamp.
    /// Snapshot text and timestamp are written as one store operation.
    pub async fn write_with_timestamp(
        &self,
        snapshot: &StandingsSnapshot,
        stored_ms: i64,
    ) -> Result<(), AppError> {
        let text = serde_json::to_string(snapshot)?;
        let size = text.len();
        self.store
            .set_entries(vec![
                (CACHED_STANDINGS.to_string(), StoredValue::Text(text)),
                (LAST_UPDATE.to_string(), StoredValue::Integer(stored_ms)),
            ])
            .await?;

        info!(
            "Cached standings: divisions={}, size={} bytes, stored_at={}",
            snapshot.records.len(),
            size,
            stored_ms
        );
        Ok(())
    }

    /// When the cached snapshot was stored, if ever.
    pub async fn last_update(&self) -> Result<Option<DateTime<Local>>, AppError> {
        Ok(self
            .store
            .get_integer(LAST_UPDATE)
            .await?
            .and_then(|ms| Local.timestamp_millis_opt(ms).single()))
    }

    async fn load_snapshot(&self) -> Result<Option<StandingsSnapshot>, FetchError> {
        let text = self
            .store
            .get_text(CACHED_STANDINGS)
            .await
            .map_err(|e| FetchError::cache_read(e.to_string()))?;

        match text {
            Some(text) => serde_json::from_str(&text)
                .map(Some)
                .map_err(|e| FetchError::cache_read(e.to_string())),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::cache::store::MemoryStore;
    use crate::testing_utils::{TestDataBuilder, today_midnight_ms, yesterday_ms};
    use chrono::FixedOffset;

    fn cache() -> (Arc<MemoryStore>, StandingsCache<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), StandingsCache::new(store))
    }

    #[test]
    fn test_freshness_boundary_is_local_midnight() {
        let tz = FixedOffset::east_opt(-4 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2025, 7, 4, 15, 30, 0).unwrap();
        let midnight = tz.with_ymd_and_hms(2025, 7, 4, 0, 0, 0).unwrap();

        assert!(is_fresh(midnight.timestamp_millis(), &now));
        assert!(is_fresh(now.timestamp_millis(), &now));
        assert!(!is_fresh(midnight.timestamp_millis() - 1, &now));
        // 23 hours ago but still the previous calendar day
        let late_yesterday = tz.with_ymd_and_hms(2025, 7, 3, 23, 59, 59).unwrap();
        assert!(!is_fresh(late_yesterday.timestamp_millis(), &now));
    }

    #[test]
    fn test_start_of_day_uses_callers_zone() {
        let helsinki = FixedOffset::east_opt(3 * 3600).unwrap();
        let now = helsinki.with_ymd_and_hms(2025, 7, 4, 1, 0, 0).unwrap();
        let start = start_of_day(&now).unwrap();
        assert_eq!(start, helsinki.with_ymd_and_hms(2025, 7, 4, 0, 0, 0).unwrap());
    }

    #[tokio::test]
    async fn test_read_if_fresh_hit_at_midnight() {
        let (_, cache) = cache();
        let snapshot = TestDataBuilder::create_two_division_snapshot();
        cache
            .write_with_timestamp(&snapshot, today_midnight_ms())
            .await
            .unwrap();

        assert_eq!(cache.read_if_fresh().await.unwrap(), Some(snapshot));
    }

    #[tokio::test]
    async fn test_read_if_fresh_miss_for_yesterday() {
        let (_, cache) = cache();
        let snapshot = TestDataBuilder::create_two_division_snapshot();
        cache
            .write_with_timestamp(&snapshot, yesterday_ms())
            .await
            .unwrap();

        assert_eq!(cache.read_if_fresh().await.unwrap(), None);
        assert_eq!(cache.read_stale().await, Some(snapshot));
    }

    #[tokio::test]
    async fn test_empty_store() {
        let (_, cache) = cache();
        assert_eq!(cache.read_if_fresh().await.unwrap(), None);
        assert_eq!(cache.read_stale().await, None);
        assert_eq!(cache.last_update().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_text() {
        let (store, cache) = cache();
        store.set_text(CACHED_STANDINGS, "{not json").await.unwrap();
        store
            .set_integer(LAST_UPDATE, Utc::now().timestamp_millis())
            .await
            .unwrap();

        assert!(matches!(
            cache.read_if_fresh().await,
            Err(FetchError::CacheRead(_))
        ));
        assert_eq!(cache.read_stale().await, None);
    }

    #[tokio::test]
    async fn test_write_stamps_current_time() {
        let (_, cache) = cache();
        let before = Utc::now().timestamp_millis();
        cache
            .write(&TestDataBuilder::create_two_division_snapshot())
            .await
            .unwrap();

        let stored = cache.last_update().await.unwrap().unwrap();
        assert!(stored.timestamp_millis() >= before);
        assert!(cache.read_if_fresh().await.unwrap().is_some());
    }
}

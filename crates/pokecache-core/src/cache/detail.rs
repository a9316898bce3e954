use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::DetailRecord;

#[derive(Debug, Clone)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.cached_at).num_minutes()
    }

    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        if minutes < 1 {
            // Also covers clock skew
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            format!("{}h ago", minutes / 60)
        } else {
            format!("{}d ago", minutes / 1440)
        }
    }
}

/// In-memory detail records keyed by id.
///
/// Unbounded and append-only: records are never mutated or evicted. A second
/// insert for the same id keeps the first record, so the cache never holds
/// two different records for one id.
#[derive(Debug, Default)]
pub struct DetailCache {
    entries: HashMap<i64, CachedData<DetailRecord>>,
}

impl DetailCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: i64) -> Option<&DetailRecord> {
        self.entries.get(&id).map(|cached| &cached.data)
    }

    pub fn get_cached(&self, id: i64) -> Option<&CachedData<DetailRecord>> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.entries.contains_key(&id)
    }

    /// Store a record, returning the record now held for its id.
    pub fn insert(&mut self, id: i64, record: DetailRecord) -> &DetailRecord {
        let entry = self.entries.entry(id).or_insert_with(|| {
            debug!(id, "Caching detail record");
            CachedData::new(record)
        });
        &entry.data
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.entries.keys().copied()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_cached_data_age_display_just_now() {
        let cached = CachedData::new(vec![1, 2, 3]);
        assert_eq!(cached.age_display(), "just now");
    }

    #[test]
    fn test_cached_data_age_display_buckets() {
        let mut cached = CachedData::new(());
        cached.cached_at = Utc::now() - Duration::minutes(5);
        assert_eq!(cached.age_display(), "5m ago");
        cached.cached_at = Utc::now() - Duration::minutes(125);
        assert_eq!(cached.age_display(), "2h ago");
        cached.cached_at = Utc::now() - Duration::days(3);
        assert_eq!(cached.age_display(), "3d ago");
        cached.cached_at = Utc::now() + Duration::minutes(10);
        assert_eq!(cached.age_display(), "just now");
    }

    #[test]
    fn test_insert_and_get() {
        let mut cache = DetailCache::new();
        assert!(cache.is_empty());
        cache.insert(25, DetailRecord::new(25, 4, 60));
        assert!(cache.contains(25));
        assert_eq!(cache.get(25), Some(&DetailRecord::new(25, 4, 60)));
        assert_eq!(cache.get(1), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_second_insert_keeps_first_record() {
        let mut cache = DetailCache::new();
        cache.insert(25, DetailRecord::new(25, 4, 60));
        let held = cache.insert(25, DetailRecord::new(25, 5, 61)).clone();
        assert_eq!(held, DetailRecord::new(25, 4, 60));
        assert_eq!(cache.len(), 1);
    }
}

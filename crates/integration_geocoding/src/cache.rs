//! Coordinate-keyed address cache

use std::time::Duration;

use moka::future::Cache;

use crate::AddressRecord;

/// Decimal places kept in cache keys (about one meter)
const KEY_PRECISION: f64 = 100_000.0;

/// Cache key: coordinates rounded to five decimals
pub(crate) type CoordinateKey = (i64, i64);

#[allow(clippy::cast_possible_truncation)]
pub(crate) fn coordinate_key(latitude: f64, longitude: f64) -> CoordinateKey {
    (
        (latitude * KEY_PRECISION).round() as i64,
        (longitude * KEY_PRECISION).round() as i64,
    )
}

/// Address cache shared by one provider instance
///
/// Only resolved addresses are stored; misses and errors are re-queried.
#[derive(Debug, Clone)]
pub(crate) struct AddressCache {
    inner: Option<Cache<CoordinateKey, AddressRecord>>,
}

impl AddressCache {
    /// Create a cache, disabled when `ttl_secs` or `capacity` is zero
    pub(crate) fn new(ttl_secs: u64, capacity: u64) -> Self {
        let inner = (ttl_secs > 0 && capacity > 0).then(|| {
            Cache::builder()
                .max_capacity(capacity)
                .time_to_live(Duration::from_secs(ttl_secs))
                .build()
        });
        Self { inner }
    }

    pub(crate) async fn get(&self, latitude: f64, longitude: f64) -> Option<AddressRecord> {
        let cache = self.inner.as_ref()?;
        cache.get(&coordinate_key(latitude, longitude)).await
    }

    pub(crate) async fn insert(&self, latitude: f64, longitude: f64, record: AddressRecord) {
        if let Some(cache) = &self.inner {
            cache
                .insert(coordinate_key(latitude, longitude), record)
                .await;
        }
    }
}

//! In-memory sunrise cache keyed by location bucket and date.

use std::collections::HashMap;

use chrono::NaiveDate;
use parking_lot::RwLock;

use crate::daylight::{SunriseRecord, SunriseResolver};
use crate::types::Coordinate;

/// A coordinate snapped to 3 decimals. Near coordinates share a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocationBucket {
    latitude: i64,
    longitude: i64,
}

impl From<&Coordinate> for LocationBucket {
    fn from(location: &Coordinate) -> Self {
        Self {
            latitude: (location.latitude * 1000.0).round_ties_even() as i64,
            longitude: (location.longitude * 1000.0).round_ties_even() as i64,
        }
    }
}

/// Sunrise records the orchestration layer has already fetched.
///
/// Safe to share between threads; reads take a shared lock.
#[derive(Debug, Default)]
pub struct SunriseCache {
    entries: RwLock<HashMap<(LocationBucket, NaiveDate), SunriseRecord>>,
}

impl SunriseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record, replacing any previous one for the same bucket and date.
    pub fn insert(&self, location: &Coordinate, record: SunriseRecord) {
        self.entries
            .write()
            .insert((LocationBucket::from(location), record.date), record);
    }

    pub fn get(&self, location: &Coordinate, date: NaiveDate) -> Option<SunriseRecord> {
        self.entries
            .read()
            .get(&(LocationBucket::from(location), date))
            .copied()
    }

    /// Drop one record. Returns whether it was present.
    pub fn invalidate(&self, location: &Coordinate, date: NaiveDate) -> bool {
        self.entries
            .write()
            .remove(&(LocationBucket::from(location), date))
            .is_some()
    }

    /// Drop every date cached for the location's bucket. Returns how many
    /// records were removed.
    pub fn invalidate_location(&self, location: &Coordinate) -> usize {
        let bucket = LocationBucket::from(location);
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|(b, _), _| *b != bucket);
        let removed = before - entries.len();
        tracing::debug!("Invalidated {} sunrise records", removed);
        removed
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl SunriseResolver for SunriseCache {
    fn sunrise_for(&self, location: &Coordinate, date: NaiveDate) -> Option<SunriseRecord> {
        self.get(location, date)
    }
}

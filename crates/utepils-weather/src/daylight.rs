//! Day/night calculation and the sunrise lookup contract.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Coordinate;

/// True iff `timestamp` lies strictly between `sunrise` and `sunset`.
pub fn is_daylight(sunrise: DateTime<Utc>, sunset: DateTime<Utc>, timestamp: DateTime<Utc>) -> bool {
    sunrise < timestamp && timestamp < sunset
}

/// Sunrise and sunset for one date at one location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunriseRecord {
    pub date: NaiveDate,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}

impl SunriseRecord {
    pub fn is_daylight(&self, timestamp: DateTime<Utc>) -> bool {
        is_daylight(self.sunrise, self.sunset, timestamp)
    }
}

/// Resolves the sunrise record for a (location, date) pair.
///
/// Implementations must return the same record for coordinates that are
/// near each other. `None` means the date cannot be used for daylight
/// filtering.
pub trait SunriseResolver {
    fn sunrise_for(&self, location: &Coordinate, date: NaiveDate) -> Option<SunriseRecord>;
}

impl<F> SunriseResolver for F
where
    F: Fn(&Coordinate, NaiveDate) -> Option<SunriseRecord>,
{
    fn sunrise_for(&self, location: &Coordinate, date: NaiveDate) -> Option<SunriseRecord> {
        self(location, date)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use chrono::TimeZone;

    fn record() -> SunriseRecord {
        SunriseRecord {
            date: NaiveDate::from_ymd_opt(2022, 5, 20).unwrap(),
            sunrise: Utc.with_ymd_and_hms(2022, 5, 20, 2, 30, 0).unwrap(),
            sunset: Utc.with_ymd_and_hms(2022, 5, 20, 20, 15, 0).unwrap(),
        }
    }

    #[test]
    fn test_midday_is_daylight() {
        assert!(record().is_daylight(Utc.with_ymd_and_hms(2022, 5, 20, 12, 0, 0).unwrap()));
    }

    #[test]
    fn test_boundaries_are_exclusive() {
        let r = record();
        assert!(!r.is_daylight(r.sunrise));
        assert!(!r.is_daylight(r.sunset));
    }

    #[test]
    fn test_night_is_not_daylight() {
        let r = record();
        assert!(!r.is_daylight(Utc.with_ymd_and_hms(2022, 5, 20, 1, 0, 0).unwrap()));
        assert!(!r.is_daylight(Utc.with_ymd_and_hms(2022, 5, 20, 23, 0, 0).unwrap()));
    }

    #[test]
    fn test_closure_resolver() {
        let resolver = |_: &Coordinate, date: NaiveDate| (date == record().date).then(record);
        let oslo = Coordinate::new(59.91, 10.75);
        assert!(resolver.sunrise_for(&oslo, record().date).is_some());
        assert!(resolver
            .sunrise_for(&oslo, NaiveDate::from_ymd_opt(2022, 5, 21).unwrap())
            .is_none());
    }
}

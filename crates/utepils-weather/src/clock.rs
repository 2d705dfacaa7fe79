use chrono::{DateTime, FixedOffset, Local, NaiveDate, Offset, Utc};

/// Time zone used to turn instants into calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    Fixed(FixedOffset),
    /// System zone, resolved per instant so daylight saving changes inside
    /// the forecast window land on the right date.
    Local,
}

/// The current instant together with the time zone used to turn instants
/// into calendar dates.
///
/// Every "is this today?" question in the crate goes through a `Clock`, so
/// tests can pin both the time and the time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    now: DateTime<Utc>,
    zone: Zone,
}

impl Clock {
    pub fn new(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self {
            now,
            zone: Zone::Fixed(offset),
        }
    }

    /// Wall clock in the system's local time zone.
    pub fn system() -> Self {
        Self {
            now: Utc::now(),
            zone: Zone::Local,
        }
    }

    /// Clock pinned to `now`, with dates counted in UTC.
    pub fn utc(now: DateTime<Utc>) -> Self {
        Self::new(now, Utc.fix())
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn today(&self) -> NaiveDate {
        self.local_date(self.now)
    }

    /// Calendar date of `instant` in this clock's time zone.
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        match self.zone {
            Zone::Fixed(offset) => instant.with_timezone(&offset).date_naive(),
            Zone::Local => instant.with_timezone(&Local).date_naive(),
        }
    }
}

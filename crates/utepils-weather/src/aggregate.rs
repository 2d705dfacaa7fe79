//! Reduction of an hourly timeseries into one forecast per future day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::Clock;
use crate::daylight::{SunriseRecord, SunriseResolver};
use crate::types::{Coordinate, DailyForecast, TimeStep, WeatherInstant, WeatherPeriod};

/// Divisor used when averaging a day's measurements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Averaging {
    /// Sum of present values over the number of entries in the day. Sparse
    /// fields are biased towards zero; this is what the app has always shown.
    #[default]
    EntryCount,
    /// Sum of present values over the number of entries carrying the field.
    PresentCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AggregateOptions {
    pub averaging: Averaging,
    /// Emit the last buffered day even when no night entry follows it.
    pub flush_trailing_day: bool,
}

/// Daylight entries collected for one date, waiting for a flush.
struct PendingDay<'a> {
    date: NaiveDate,
    sunrise: SunriseRecord,
    steps: Vec<&'a TimeStep>,
}

impl PendingDay<'_> {
    fn new(date: NaiveDate, sunrise: SunriseRecord) -> Self {
        Self {
            date,
            sunrise,
            steps: Vec::new(),
        }
    }

    fn into_forecast(self, location: Coordinate, averaging: Averaging) -> DailyForecast {
        debug!(
            "Aggregated {} daylight entries for {}",
            self.steps.len(),
            self.date
        );
        DailyForecast::daily(
            self.date,
            location,
            average(&self.steps, averaging),
            representative_period(&self.steps),
            self.sunrise,
        )
    }
}

/// Build one [`DailyForecast`] per future day from a chronological timeseries.
///
/// Only daylight entries count, and today is always skipped (the nowcast
/// covers it). A day is emitted when a night entry or a new date follows its
/// daylight entries; entries without a sunrise record are dropped.
pub fn aggregate_daily<R>(
    timeseries: &[TimeStep],
    location: Coordinate,
    resolver: &R,
    clock: &Clock,
    options: &AggregateOptions,
) -> Vec<DailyForecast>
where
    R: SunriseResolver + ?Sized,
{
    let today = clock.today();
    let mut days = Vec::new();
    let mut pending: Option<PendingDay<'_>> = None;

    for step in timeseries {
        let date = clock.local_date(step.time);
        let Some(sunrise) = resolver.sunrise_for(&location, date) else {
            debug!("No sunrise record for {}, dropping entry at {}", date, step.time);
            continue;
        };

        if pending.as_ref().is_some_and(|day| day.date != date) {
            if let Some(day) = pending.take() {
                days.push(day.into_forecast(location, options.averaging));
            }
        }

        if sunrise.is_daylight(step.time) && date != today {
            pending
                .get_or_insert_with(|| PendingDay::new(date, sunrise))
                .steps
                .push(step);
        } else if let Some(day) = pending.take() {
            days.push(day.into_forecast(location, options.averaging));
        }
    }

    if let Some(day) = pending {
        if options.flush_trailing_day {
            days.push(day.into_forecast(location, options.averaging));
        } else {
            debug!(
                "Leaving {} trailing entries for {} unflushed",
                day.steps.len(),
                day.date
            );
        }
    }

    days
}

/// The 12 hour period of the entry a third into the day, or of the last
/// entry that has a 12 hour symbol when that one lacks it.
fn representative_period(steps: &[&TimeStep]) -> Option<WeatherPeriod> {
    let mut chosen = *steps.get(steps.len() / 3)?;
    if chosen.symbol_code_12h().is_none() {
        if let Some(last) = steps.iter().rev().find(|s| s.symbol_code_12h().is_some()) {
            chosen = *last;
        }
    }
    chosen.next_12_hours.clone()
}

fn average(steps: &[&TimeStep], averaging: Averaging) -> WeatherInstant {
    let mean = |field: fn(&WeatherInstant) -> Option<f64>| -> Option<f64> {
        let values: Vec<f64> = steps.iter().filter_map(|s| field(&s.instant)).collect();
        if values.is_empty() {
            return None;
        }
        let divisor = match averaging {
            Averaging::EntryCount => steps.len(),
            Averaging::PresentCount => values.len(),
        };
        Some(values.iter().sum::<f64>() / divisor as f64)
    };

    WeatherInstant {
        air_pressure_at_sea_level: mean(|i| i.air_pressure_at_sea_level),
        air_temperature: mean(|i| i.air_temperature),
        cloud_area_fraction: mean(|i| i.cloud_area_fraction),
        cloud_area_fraction_high: mean(|i| i.cloud_area_fraction_high),
        cloud_area_fraction_low: mean(|i| i.cloud_area_fraction_low),
        cloud_area_fraction_medium: mean(|i| i.cloud_area_fraction_medium),
        dew_point_temperature: mean(|i| i.dew_point_temperature),
        fog_area_fraction: mean(|i| i.fog_area_fraction),
        precipitation_rate: mean(|i| i.precipitation_rate),
        relative_humidity: mean(|i| i.relative_humidity),
        wind_from_direction: mean(|i| i.wind_from_direction),
        wind_speed: mean(|i| i.wind_speed),
        wind_speed_of_gust: mean(|i| i.wind_speed_of_gust),
    }
}

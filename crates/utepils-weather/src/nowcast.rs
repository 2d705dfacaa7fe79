//! Current conditions as a same-day forecast.

use tracing::debug;

use crate::clock::Clock;
use crate::daylight::SunriseResolver;
use crate::types::{Coordinate, DailyForecast, TimeStep, WeatherPeriod};

pub const DEFAULT_NOWCAST_LABEL: &str = "Now";

/// Build the nowcast entry from the first step of a nowcast timeseries.
///
/// The nowcast product carries no cloud data, so the cloud fractions are taken
/// from the first step of the regular forecast when the nowcast lacks them.
/// Returns `None` for an empty nowcast or when today's sunrise is unknown.
pub fn build_nowcast<R>(
    nowcast: &[TimeStep],
    forecast: &[TimeStep],
    location: Coordinate,
    resolver: &R,
    clock: &Clock,
    label: &str,
) -> Option<DailyForecast>
where
    R: SunriseResolver + ?Sized,
{
    let step = nowcast.first()?;
    let today = clock.today();
    let Some(sunrise) = resolver.sunrise_for(&location, today) else {
        debug!("No sunrise record for {}, skipping nowcast", today);
        return None;
    };

    let mut instant = step.instant;
    if let Some(first) = forecast.first() {
        let clouds = &first.instant;
        instant.cloud_area_fraction = instant.cloud_area_fraction.or(clouds.cloud_area_fraction);
        instant.cloud_area_fraction_high = instant
            .cloud_area_fraction_high
            .or(clouds.cloud_area_fraction_high);
        instant.cloud_area_fraction_medium = instant
            .cloud_area_fraction_medium
            .or(clouds.cloud_area_fraction_medium);
        instant.cloud_area_fraction_low = instant
            .cloud_area_fraction_low
            .or(clouds.cloud_area_fraction_low);
    }

    Some(DailyForecast::nowcast(
        label,
        clock.local_date(step.time),
        location,
        instant,
        nearest_period(step),
        sunrise,
    ))
}

fn nearest_period(step: &TimeStep) -> Option<WeatherPeriod> {
    step.next_1_hours
        .as_ref()
        .or(step.next_6_hours.as_ref())
        .or(step.next_12_hours.as_ref())
        .cloned()
}

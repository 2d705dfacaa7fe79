//! The utepils decision.
//!
//! Each weather factor yields a rate in `[0, 1]` (wind may go below zero) and
//! the rates are multiplied into a composite. Missing data never penalizes.

use serde::Serialize;
use tracing::debug;

use crate::clock::Clock;
use crate::proximity::round;
use crate::types::{DailyForecast, WeatherInstant};

/// Composite rate a day has to beat to be utepils weather.
pub const UTEPILS_LIMIT: f64 = 0.55;

/// Rain above this (mm/h) rules the day out.
const MAX_PRECIPITATION_RATE: f64 = 5.0;

/// Wind speed (m/s) at which the wind rate reaches zero. With the limit at
/// 0.55 the practical maximum on an otherwise perfect day is 7.5 m/s.
const MAX_WIND_SPEED: f64 = 15.0;

/// Per-factor breakdown of a utepils decision
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UtepilsScore {
    pub precipitation: f64,
    pub cloud: f64,
    pub fog: f64,
    pub wind: f64,
    pub temperature: f64,
    /// Same-day forecast evaluated after sunset or before sunrise
    pub night: bool,
    pub total: f64,
}

impl UtepilsScore {
    pub fn is_utepils(&self) -> bool {
        self.total > UTEPILS_LIMIT
    }

    /// Composite as a whole percentage, truncated.
    pub fn percent(&self) -> i32 {
        (self.total * 100.0) as i32
    }
}

/// Rate for a band fraction in percent: 0% gives 1.0, 100% gives 0.0.
fn fraction_rate(fraction: f64) -> f64 {
    (1000.0 - fraction * 10.0) / 1000.0
}

/// Only rain above 5 mm/h counts, and then it zeroes the rate.
pub fn precipitation_rate(rate: Option<f64>) -> f64 {
    match rate {
        Some(r) if r > MAX_PRECIPITATION_RATE => {
            ((MAX_PRECIPITATION_RATE - r) / MAX_PRECIPITATION_RATE).max(0.0)
        }
        _ => 1.0,
    }
}

/// Mean of the three cloud bands rounded to 2 decimals, or the unrounded
/// combined cloud fraction when any band is missing.
pub fn cloud_rate(instant: &WeatherInstant) -> f64 {
    match (
        instant.cloud_area_fraction_high,
        instant.cloud_area_fraction_medium,
        instant.cloud_area_fraction_low,
    ) {
        (Some(high), Some(medium), Some(low)) => {
            let rates = [fraction_rate(high), fraction_rate(medium), fraction_rate(low)];
            round(rates.iter().sum::<f64>() / rates.len() as f64, 2)
        }
        _ => instant.cloud_area_fraction.map_or(1.0, fraction_rate),
    }
}

pub fn fog_rate(fog: Option<f64>) -> f64 {
    fog.map_or(1.0, |f| round(fraction_rate(f), 2))
}

/// Not clamped: storms drive the rate negative.
pub fn wind_rate(speed: Option<f64>) -> f64 {
    speed.map_or(1.0, |s| 1.0 - s / MAX_WIND_SPEED)
}

/// One percent off per degree below zero. Warm days get no bonus.
pub fn temperature_rate(temperature: Option<f64>) -> f64 {
    temperature.map_or(1.0, |t| 1.0 - (-t.min(0.0) / 100.0))
}

/// Score a forecast. A forecast for today is vetoed while the sun is down.
pub fn score(forecast: &DailyForecast, clock: &Clock) -> UtepilsScore {
    let instant = &forecast.instant;

    let precipitation = precipitation_rate(instant.precipitation_rate);
    let cloud = cloud_rate(instant);
    let fog = fog_rate(instant.fog_area_fraction);
    let wind = wind_rate(instant.wind_speed);
    let temperature = temperature_rate(instant.air_temperature);

    debug!(
        "Rates for {}: precipitation {}, cloud {}, fog {}, wind {}, temperature {}",
        forecast.date, precipitation, cloud, fog, wind, temperature
    );

    let night = forecast.date == clock.today() && !forecast.sunrise.is_daylight(clock.now());
    let total = if night {
        debug!("Sun is down at {}, no utepils today", clock.now());
        0.0
    } else {
        precipitation * cloud * fog * wind * temperature
    };

    let score = UtepilsScore {
        precipitation,
        cloud,
        fog,
        wind,
        temperature,
        night,
        total,
    };
    debug!(
        "Total utepils rate for {}: {}% ({})",
        forecast.date,
        score.percent(),
        if score.is_utepils() { "utepils" } else { "no utepils" }
    );
    score
}

pub fn is_utepils(forecast: &DailyForecast, clock: &Clock) -> bool {
    score(forecast, clock).is_utepils()
}

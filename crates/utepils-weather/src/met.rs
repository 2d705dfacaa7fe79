//! Decoding of MET Norway responses.
//!
//! Covers the locationforecast/nowcast 2.0 GeoJSON documents and the sunrise
//! 2.0 document. Fetching them is the caller's business.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::Deserialize;

use crate::daylight::SunriseRecord;
use crate::error::WeatherError;
use crate::types::{Coordinate, TimeStep, WeatherInstant, WeatherPeriod};

/// Locationforecast or nowcast document
#[derive(Debug, Clone, Deserialize)]
pub struct MetForecast {
    pub geometry: PointGeometry,
    pub properties: MetProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PointGeometry {
    /// `[longitude, latitude, altitude]`
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetProperties {
    #[serde(default)]
    pub timeseries: Vec<MetTimeStep>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetTimeStep {
    pub time: DateTime<Utc>,
    pub data: MetData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetData {
    pub instant: MetInstant,
    #[serde(default)]
    pub next_1_hours: Option<WeatherPeriod>,
    #[serde(default)]
    pub next_6_hours: Option<WeatherPeriod>,
    #[serde(default)]
    pub next_12_hours: Option<WeatherPeriod>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetInstant {
    #[serde(default)]
    pub details: Option<WeatherInstant>,
}

impl PointGeometry {
    pub fn coordinate(&self) -> Result<Coordinate, WeatherError> {
        match self.coordinates.as_slice() {
            [longitude, latitude, ..] => Ok(Coordinate::new(*latitude, *longitude)),
            other => Err(WeatherError::InvalidGeometry(format!("{:?}", other))),
        }
    }
}

impl From<MetTimeStep> for TimeStep {
    fn from(step: MetTimeStep) -> Self {
        Self {
            time: step.time,
            instant: step.data.instant.details.unwrap_or_default(),
            next_1_hours: step.data.next_1_hours,
            next_6_hours: step.data.next_6_hours,
            next_12_hours: step.data.next_12_hours,
        }
    }
}

impl MetForecast {
    /// Parse a locationforecast or nowcast JSON body.
    pub fn from_json(json: &str) -> Result<Self, WeatherError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn location(&self) -> Result<Coordinate, WeatherError> {
        self.geometry.coordinate()
    }

    pub fn into_timeseries(self) -> Vec<TimeStep> {
        self.properties
            .timeseries
            .into_iter()
            .map(TimeStep::from)
            .collect()
    }
}

/// Sunrise 2.0 document
#[derive(Debug, Clone, Deserialize)]
pub struct MetSunrise {
    #[serde(default)]
    pub location: Option<SunriseLocation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SunriseLocation {
    #[serde(default)]
    pub time: Vec<SunriseDay>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SunriseDay {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub sunrise: Option<SunEvent>,
    #[serde(default)]
    pub sunset: Option<SunEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SunEvent {
    pub time: DateTime<FixedOffset>,
    #[serde(default)]
    pub desc: Option<String>,
}

impl MetSunrise {
    pub fn from_json(json: &str) -> Result<Self, WeatherError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The first day's sunrise and sunset.
    ///
    /// `None` when either event is missing, which happens during midnight sun
    /// and polar night.
    pub fn record(&self) -> Option<SunriseRecord> {
        let day = self.location.as_ref()?.time.first()?;
        let sunrise = day.sunrise.as_ref()?.time;
        let sunset = day.sunset.as_ref()?.time;

        Some(SunriseRecord {
            date: day.date.unwrap_or_else(|| sunrise.date_naive()),
            sunrise: sunrise.with_timezone(&Utc),
            sunset: sunset.with_timezone(&Utc),
        })
    }
}

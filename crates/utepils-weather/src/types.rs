use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::daylight::SunriseRecord;
use crate::proximity;
use crate::symbol::WeatherSymbol;

/// Geographic location
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Two coordinates are near when both components agree to 3 decimals
    /// (roughly 111 m).
    pub fn is_near(&self, other: &Coordinate) -> bool {
        proximity::is_near(self.latitude, other.latitude, 3)
            && proximity::is_near(self.longitude, other.longitude, 3)
    }
}

/// Point-in-time measurements. Absent fields were not measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherInstant {
    pub air_pressure_at_sea_level: Option<f64>,
    pub air_temperature: Option<f64>,
    pub cloud_area_fraction: Option<f64>,
    pub cloud_area_fraction_high: Option<f64>,
    pub cloud_area_fraction_low: Option<f64>,
    pub cloud_area_fraction_medium: Option<f64>,
    pub dew_point_temperature: Option<f64>,
    pub fog_area_fraction: Option<f64>,
    pub precipitation_rate: Option<f64>,
    pub relative_humidity: Option<f64>,
    pub wind_from_direction: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_speed_of_gust: Option<f64>,
}

/// Categorical summary of a forecast period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub symbol_code: String,
    #[serde(default)]
    pub symbol_confidence: Option<String>,
}

/// Aggregates over a forecast period
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodDetails {
    pub air_temperature_max: Option<f64>,
    pub air_temperature_min: Option<f64>,
    pub precipitation_amount: Option<f64>,
    pub precipitation_amount_max: Option<f64>,
    pub precipitation_amount_min: Option<f64>,
    pub probability_of_precipitation: Option<f64>,
    pub probability_of_thunder: Option<f64>,
    pub ultraviolet_index_clear_sky_max: Option<f64>,
}

/// Forward-looking period (next 1, 6 or 12 hours)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherPeriod {
    pub summary: Option<PeriodSummary>,
    pub details: PeriodDetails,
}

impl WeatherPeriod {
    pub fn symbol_code(&self) -> Option<&str> {
        self.summary.as_ref().map(|s| s.symbol_code.as_str())
    }
}

/// One entry of a forecast timeseries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeStep {
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub instant: WeatherInstant,
    #[serde(default)]
    pub next_1_hours: Option<WeatherPeriod>,
    #[serde(default)]
    pub next_6_hours: Option<WeatherPeriod>,
    #[serde(default)]
    pub next_12_hours: Option<WeatherPeriod>,
}

impl TimeStep {
    pub fn new(time: DateTime<Utc>, instant: WeatherInstant) -> Self {
        Self {
            time,
            instant,
            next_1_hours: None,
            next_6_hours: None,
            next_12_hours: None,
        }
    }

    /// Symbol of the 12 hour period, if the step has one.
    pub fn symbol_code_12h(&self) -> Option<&str> {
        self.next_12_hours.as_ref().and_then(WeatherPeriod::symbol_code)
    }
}

/// Which pipeline produced a [`DailyForecast`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastKind {
    /// Averaged daylight hours of a future day
    Daily,
    /// The current conditions
    Nowcast,
}

/// Representative weather for one day (or for right now)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub kind: ForecastKind,
    /// Short text for the day selector
    pub label: String,
    pub date: NaiveDate,
    pub location: Coordinate,
    pub instant: WeatherInstant,
    pub period: Option<WeatherPeriod>,
    pub sunrise: SunriseRecord,
}

impl DailyForecast {
    /// Daily forecast labelled with its day of month.
    pub fn daily(
        date: NaiveDate,
        location: Coordinate,
        instant: WeatherInstant,
        period: Option<WeatherPeriod>,
        sunrise: SunriseRecord,
    ) -> Self {
        Self {
            kind: ForecastKind::Daily,
            label: date.day().to_string(),
            date,
            location,
            instant,
            period,
            sunrise,
        }
    }

    pub fn nowcast(
        label: impl Into<String>,
        date: NaiveDate,
        location: Coordinate,
        instant: WeatherInstant,
        period: Option<WeatherPeriod>,
        sunrise: SunriseRecord,
    ) -> Self {
        Self {
            kind: ForecastKind::Nowcast,
            label: label.into(),
            date,
            location,
            instant,
            period,
            sunrise,
        }
    }

    pub fn symbol_code(&self) -> Option<&str> {
        self.period.as_ref().and_then(WeatherPeriod::symbol_code)
    }

    pub fn symbol(&self) -> Option<WeatherSymbol> {
        self.symbol_code().and_then(WeatherSymbol::parse)
    }

    pub fn air_temperature(&self) -> Option<f64> {
        self.instant.air_temperature
    }
}

impl fmt::Display for DailyForecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            ForecastKind::Daily => "DAILY",
            ForecastKind::Nowcast => "NOWCAST",
        };
        writeln!(f, "---------- {} ----------", kind)?;
        writeln!(f, "{}", self.date)?;

        let i = &self.instant;
        if let Some(code) = self.symbol_code() {
            writeln!(f, "Symbol: {}", code)?;
        }
        let rows = [
            ("Temperature", i.air_temperature, "°C"),
            ("Clouds", i.cloud_area_fraction, "%"),
            ("High clouds", i.cloud_area_fraction_high, "%"),
            ("Medium clouds", i.cloud_area_fraction_medium, "%"),
            ("Low clouds", i.cloud_area_fraction_low, "%"),
            ("Fog", i.fog_area_fraction, "%"),
            ("Wind", i.wind_speed, "m/s"),
            ("Gust", i.wind_speed_of_gust, "m/s"),
            ("Precipitation rate", i.precipitation_rate, "mm/h"),
        ];
        for (name, value, unit) in rows {
            if let Some(v) = value {
                writeln!(f, "{}: {} {}", name, v, unit)?;
            }
        }
        Ok(())
    }
}

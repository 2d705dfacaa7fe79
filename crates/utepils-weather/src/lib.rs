//! Weather side of the utepils decision engine.
//!
//! Turns MET timeseries into per-day forecasts and decides whether a day is
//! good enough for a beer outside.

pub mod aggregate;
pub mod cache;
pub mod clock;
pub mod daylight;
pub mod error;
pub mod met;
pub mod nowcast;
pub mod proximity;
pub mod score;
pub mod symbol;
pub mod types;

pub use aggregate::{aggregate_daily, AggregateOptions, Averaging};
pub use cache::{LocationBucket, SunriseCache};
pub use clock::Clock;
pub use daylight::{is_daylight, SunriseRecord, SunriseResolver};
pub use error::WeatherError;
pub use met::{MetForecast, MetSunrise};
pub use nowcast::{build_nowcast, DEFAULT_NOWCAST_LABEL};
pub use score::{is_utepils, score, UtepilsScore, UTEPILS_LIMIT};
pub use symbol::{SymbolVariant, WeatherCondition, WeatherSymbol};
pub use types::*;

//! Beverage recommendations for utepils weather.
//!
//! Every beverage gets an optimal serving temperature once, from a random
//! base plus its catalog data. Ranking then compares that optimum with the
//! selected day's air temperature.

pub mod catalog;
pub mod error;
pub mod matcher;
pub mod temperature;

pub use catalog::{parse_catalog, Beverage, CatalogSource};
pub use error::BeverageError;
pub use matcher::{match_score, rank, rate_catalog, RatedBeverage, Recommendation, DEFAULT_LIMIT};
pub use temperature::{draw_base, optimal_temperature, BASE_TEMPERATURE, DEFAULT_ALCOHOL_CONTENT};

//! Temperature matching and ranking of a rated catalog.

use rand::Rng;
use serde::Serialize;

use crate::catalog::Beverage;
use crate::temperature::{draw_base, optimal_temperature};

/// How many degrees off the optimum costs the whole match.
const TEMPERATURE_TOLERANCE: f64 = 5.0;

/// Nudge against the primary catalog so store beers are not buried.
const PRIMARY_PENALTY: f64 = 0.05;

/// Default length of the recommendation list.
pub const DEFAULT_LIMIT: usize = 10;

/// A beverage with its optimal temperature fixed at rating time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatedBeverage {
    pub beverage: Beverage,
    optimal_temperature: f64,
}

impl RatedBeverage {
    pub fn new(beverage: Beverage, base: f64) -> Self {
        let optimal_temperature = optimal_temperature(&beverage, base);
        Self {
            beverage,
            optimal_temperature,
        }
    }

    /// Rate with a base temperature drawn from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(beverage: Beverage, rng: &mut R) -> Self {
        let base = draw_base(rng);
        Self::new(beverage, base)
    }

    pub fn optimal_temperature(&self) -> f64 {
        self.optimal_temperature
    }

    pub fn match_score(&self, ambient: Option<f64>) -> f64 {
        match_score(self, ambient)
    }
}

/// Rate a whole catalog, one random base per beverage.
pub fn rate_catalog<R: Rng + ?Sized>(beverages: Vec<Beverage>, rng: &mut R) -> Vec<RatedBeverage> {
    let rated: Vec<RatedBeverage> = beverages
        .into_iter()
        .map(|b| RatedBeverage::with_rng(b, rng))
        .collect();
    tracing::debug!("Rated {} beverages", rated.len());
    rated
}

/// How well `rated` suits an air temperature of `ambient` degrees.
///
/// 1.0 at the optimum, falling by 0.2 per degree either way with no lower
/// bound. Primary catalog items lose a further 0.05. Unknown ambient
/// temperature scores 0.0.
pub fn match_score(rated: &RatedBeverage, ambient: Option<f64>) -> f64 {
    let Some(ambient) = ambient else {
        return 0.0;
    };
    let mut score =
        1.0 - ((ambient - rated.optimal_temperature) / TEMPERATURE_TOLERANCE).abs();
    if rated.beverage.is_primary() {
        score -= PRIMARY_PENALTY;
    }
    score
}

/// A ranked entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Recommendation<'a> {
    pub beverage: &'a RatedBeverage,
    pub match_score: f64,
}

/// Best matches first, at most `limit` of them. Ties keep catalog order.
pub fn rank(
    catalog: &[RatedBeverage],
    ambient: Option<f64>,
    limit: usize,
) -> Vec<Recommendation<'_>> {
    let mut ranked: Vec<Recommendation<'_>> = catalog
        .iter()
        .map(|beverage| Recommendation {
            beverage,
            match_score: match_score(beverage, ambient),
        })
        .collect();
    ranked.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
    ranked.truncate(limit);
    ranked
}

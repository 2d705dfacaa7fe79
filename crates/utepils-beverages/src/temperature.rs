//! Optimal serving weather for a beverage.
//!
//! The "optimal temperature" is the air temperature a beverage suits best:
//! fresh, light summer beers score high, dark and wintery ones low.

use std::ops::Range;
use std::sync::OnceLock;

use rand::Rng;
use regex::{Regex, RegexBuilder};
use tracing::warn;
use utepils_weather::proximity::round;

use crate::catalog::Beverage;
use crate::error::BeverageError;

/// Range the random base temperature is drawn from.
pub const BASE_TEMPERATURE: Range<f64> = 17.0..18.0;

/// Alcohol content assumed when the catalog has none.
pub const DEFAULT_ALCOHOL_CONTENT: f64 = 4.6;

/// Keyword adjustment. A rule applies when either pattern matches.
struct KeywordRule {
    name: Option<&'static str>,
    product_type: Option<&'static str>,
    delta: f64,
}

const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        name: Some("lime|mango|juicy|sitron"),
        product_type: None,
        delta: 8.0,
    },
    KeywordRule {
        name: Some("sommer|summer|skjærgård|anker|båt|hav"),
        product_type: None,
        delta: 7.0,
    },
    KeywordRule {
        name: Some("corona|desperados|miguel|peroni|blanc"),
        product_type: None,
        delta: 5.0,
    },
    KeywordRule {
        name: Some("lite|light|lett"),
        product_type: None,
        delta: 4.0,
    },
    KeywordRule {
        name: None,
        product_type: Some("hvete|weiss"),
        delta: 3.0,
    },
    KeywordRule {
        name: None,
        product_type: Some("pale ale|pilsner"),
        delta: 3.0,
    },
    KeywordRule {
        name: None,
        product_type: Some("lys"),
        delta: 2.0,
    },
    KeywordRule {
        name: Some("bayer"),
        product_type: None,
        delta: -8.0,
    },
    KeywordRule {
        name: None,
        product_type: Some("mørk"),
        delta: -9.0,
    },
    KeywordRule {
        name: None,
        product_type: Some("sur"),
        delta: -10.0,
    },
    KeywordRule {
        name: Some("jul|snø|vinter|christ|santa|winter|snow|nisse"),
        product_type: None,
        delta: -8.0,
    },
    KeywordRule {
        name: Some("guinness"),
        product_type: Some("stout|draught|brown|dark|porter"),
        delta: -20.0,
    },
];

struct CompiledRule {
    name: Option<Regex>,
    product_type: Option<Regex>,
    delta: f64,
}

impl CompiledRule {
    fn compile(rule: &KeywordRule) -> Result<Self, BeverageError> {
        let build = |pattern: &str| RegexBuilder::new(pattern).case_insensitive(true).build();
        Ok(Self {
            name: rule.name.map(build).transpose()?,
            product_type: rule.product_type.map(build).transpose()?,
            delta: rule.delta,
        })
    }

    fn matches(&self, name: Option<&str>, product_type: Option<&str>) -> bool {
        let hit = |pattern: &Option<Regex>, text: Option<&str>| match (pattern, text) {
            (Some(pattern), Some(text)) => pattern.is_match(text),
            _ => false,
        };
        hit(&self.name, name) || hit(&self.product_type, product_type)
    }
}

fn rules() -> &'static [CompiledRule] {
    static RULES: OnceLock<Vec<CompiledRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        KEYWORD_RULES
            .iter()
            .filter_map(|rule| match CompiledRule::compile(rule) {
                Ok(compiled) => Some(compiled),
                Err(e) => {
                    warn!("Skipping keyword rule: {}", e);
                    None
                }
            })
            .collect()
    })
}

/// Draw a base temperature uniformly from [`BASE_TEMPERATURE`].
pub fn draw_base<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(BASE_TEMPERATURE)
}

/// Optimal temperature for `beverage` starting from `base`, rounded to 3
/// decimals.
///
/// Ratings are whole numbers and are divided as such, so a freshness of 8
/// adds 2 degrees, not 2.67.
pub fn optimal_temperature(beverage: &Beverage, base: f64) -> f64 {
    let mut temperature =
        base - beverage.alcohol_content().unwrap_or(DEFAULT_ALCOHOL_CONTENT) / 3.0;
    temperature += f64::from(beverage.freshness() / 3);
    temperature -= f64::from(beverage.fullness() / 5);
    temperature -= f64::from(beverage.bitterness() / 5);

    let name = beverage.name();
    let product_type = beverage.product_type();
    for rule in rules() {
        if rule.matches(name, product_type) {
            temperature += rule.delta;
        }
    }

    round(temperature, 3)
}

//! Decoding of MET weather symbol codes.
//!
//! A code is `<condition>[showers][andthunder][_<variant>]`, e.g.
//! `heavyrainshowersandthunder_night`. Older MET feeds spell some light
//! variants as `lightssleet...`/`lightssnow...`; both spellings decode.

use serde::{Deserialize, Serialize};

/// Weather condition of a symbol, without showers/thunder/variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    ClearSky,
    Fair,
    PartlyCloudy,
    Cloudy,
    Fog,
    LightRain,
    Rain,
    HeavyRain,
    LightSleet,
    Sleet,
    HeavySleet,
    LightSnow,
    Snow,
    HeavySnow,
}

impl WeatherCondition {
    fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "clearsky" => Self::ClearSky,
            "fair" => Self::Fair,
            "partlycloudy" => Self::PartlyCloudy,
            "cloudy" => Self::Cloudy,
            "fog" => Self::Fog,
            "lightrain" => Self::LightRain,
            "rain" => Self::Rain,
            "heavyrain" => Self::HeavyRain,
            "lightsleet" | "lightssleet" => Self::LightSleet,
            "sleet" => Self::Sleet,
            "heavysleet" => Self::HeavySleet,
            "lightsnow" | "lightssnow" => Self::LightSnow,
            "snow" => Self::Snow,
            "heavysnow" => Self::HeavySnow,
            _ => return None,
        })
    }

    fn code(&self) -> &'static str {
        match self {
            Self::ClearSky => "clearsky",
            Self::Fair => "fair",
            Self::PartlyCloudy => "partlycloudy",
            Self::Cloudy => "cloudy",
            Self::Fog => "fog",
            Self::LightRain => "lightrain",
            Self::Rain => "rain",
            Self::HeavyRain => "heavyrain",
            Self::LightSleet => "lightsleet",
            Self::Sleet => "sleet",
            Self::HeavySleet => "heavysleet",
            Self::LightSnow => "lightsnow",
            Self::Snow => "snow",
            Self::HeavySnow => "heavysnow",
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::ClearSky => "Clear sky",
            Self::Fair => "Fair",
            Self::PartlyCloudy => "Partly cloudy",
            Self::Cloudy => "Cloudy",
            Self::Fog => "Fog",
            Self::LightRain => "Light rain",
            Self::Rain => "Rain",
            Self::HeavyRain => "Heavy rain",
            Self::LightSleet => "Light sleet",
            Self::Sleet => "Sleet",
            Self::HeavySleet => "Heavy sleet",
            Self::LightSnow => "Light snow",
            Self::Snow => "Snow",
            Self::HeavySnow => "Heavy snow",
        }
    }

    /// Conditions that only exist with a day/night/polar twilight variant
    fn is_sky_only(&self) -> bool {
        matches!(self, Self::ClearSky | Self::Fair | Self::PartlyCloudy)
    }

    pub fn is_precipitation(&self) -> bool {
        !matches!(
            self,
            Self::ClearSky | Self::Fair | Self::PartlyCloudy | Self::Cloudy | Self::Fog
        )
    }
}

/// Sun position variant of a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolVariant {
    Day,
    Night,
    PolarTwilight,
}

impl SymbolVariant {
    fn code(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Night => "night",
            Self::PolarTwilight => "polartwilight",
        }
    }
}

/// A decoded weather symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeatherSymbol {
    pub condition: WeatherCondition,
    pub showers: bool,
    pub thunder: bool,
    pub variant: Option<SymbolVariant>,
}

impl WeatherSymbol {
    /// Decode a MET symbol code. Unknown or malformed codes give `None`.
    pub fn parse(code: &str) -> Option<Self> {
        let (rest, variant) = match code.rsplit_once('_') {
            Some((rest, "day")) => (rest, Some(SymbolVariant::Day)),
            Some((rest, "night")) => (rest, Some(SymbolVariant::Night)),
            Some((rest, "polartwilight")) => (rest, Some(SymbolVariant::PolarTwilight)),
            Some(_) => return None,
            None => (code, None),
        };

        let (rest, thunder) = match rest.strip_suffix("andthunder") {
            Some(rest) => (rest, true),
            None => (rest, false),
        };
        let (rest, showers) = match rest.strip_suffix("showers") {
            Some(rest) => (rest, true),
            None => (rest, false),
        };

        let condition = WeatherCondition::from_code(rest)?;

        if !condition.is_precipitation() && (showers || thunder) {
            return None;
        }
        // Sky conditions and showers depend on the sun; the rest never do.
        let needs_variant = condition.is_sky_only() || showers;
        if needs_variant != variant.is_some() {
            return None;
        }

        Some(Self {
            condition,
            showers,
            thunder,
            variant,
        })
    }

    /// Canonical symbol code, used as the icon file name.
    pub fn icon_name(&self) -> String {
        let mut name = self.condition.code().to_string();
        if self.showers {
            name.push_str("showers");
        }
        if self.thunder {
            name.push_str("andthunder");
        }
        if let Some(variant) = self.variant {
            name.push('_');
            name.push_str(variant.code());
        }
        name
    }

    pub fn description(&self) -> String {
        let mut text = self.condition.description().to_string();
        if self.showers {
            text.push_str(" showers");
        }
        if self.thunder {
            text.push_str(" and thunder");
        }
        text
    }
}

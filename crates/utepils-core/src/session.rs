//! Presentation state for one location: loading status, the forecast
//! selector, the verdict for the selected day and its recommendations.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::info;
use utepils_beverages::{rank, RatedBeverage, Recommendation};
use utepils_weather::{score, Clock, Coordinate, DailyForecast, UtepilsScore};

use crate::error::SessionError;

/// What the data layer is doing, as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataStatus {
    #[default]
    Waiting,
    Fetching,
    Success,
    Failure,
    NoLocation,
    LocationAccessDenied,
}

impl DataStatus {
    /// True while a loading indicator should be shown.
    pub fn is_loading(self) -> bool {
        matches!(self, DataStatus::Waiting | DataStatus::Fetching)
    }

    /// True if a new fetch can be started.
    pub fn can_start_fetch(self) -> bool {
        !matches!(self, DataStatus::Fetching)
    }
}

const UTEPILS_TITLE: &str = "It's utepils weather!";
const NO_UTEPILS_TITLE: &str = "It's not utepils weather...";

const UTEPILS_SUBTITLES: &[&str] = &[
    "Crack open a cold one and find a spot in the sun!",
    "Sun's out, pints out!",
    "Smile, it's time for a good one outside.",
    "Show some skill and pour yourself a pils!",
    "No point sitting inside. Go out and grab a cold one.",
];

const NO_UTEPILS_SUBTITLES: &[&str] = &[
    "Probably better with a classic indoor pint today.",
    "Patience is a virtue.",
    "Today is not your day.",
    "No utepils today. See a doctor if the craving persists.",
    "Hope the withdrawal isn't too bad.",
    "Serious risk of indoor pints!",
];

/// Headline for the selected day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub score: UtepilsScore,
    pub title: &'static str,
    pub subtitle: &'static str,
}

impl Verdict {
    pub fn new<R: Rng + ?Sized>(score: UtepilsScore, rng: &mut R) -> Self {
        let (title, subtitles) = if score.is_utepils() {
            (UTEPILS_TITLE, UTEPILS_SUBTITLES)
        } else {
            (NO_UTEPILS_TITLE, NO_UTEPILS_SUBTITLES)
        };
        Self {
            score,
            title,
            subtitle: subtitles.choose(rng).copied().unwrap_or_default(),
        }
    }

    pub fn is_utepils(&self) -> bool {
        self.score.is_utepils()
    }
}

#[derive(Debug, Default)]
pub struct Session {
    status: DataStatus,
    location: Option<Coordinate>,
    forecasts: Vec<DailyForecast>,
    selected: Option<usize>,
    catalog: Vec<RatedBeverage>,
    recommendation_limit: usize,
}

impl Session {
    pub fn new(recommendation_limit: usize) -> Self {
        Self {
            recommendation_limit,
            ..Self::default()
        }
    }

    pub fn status(&self) -> DataStatus {
        self.status
    }

    pub fn location(&self) -> Option<Coordinate> {
        self.location
    }

    pub fn set_location(&mut self, location: Coordinate) {
        if self.location.is_some_and(|l| l.is_near(&location)) {
            return;
        }
        info!(
            "Location changed to {:.3}, {:.3}",
            location.latitude, location.longitude
        );
        self.location = Some(location);
    }

    pub fn deny_location(&mut self) {
        info!("Location access denied");
        self.transition(DataStatus::LocationAccessDenied);
    }

    /// Enter `Fetching` and hand back the location to fetch for.
    ///
    /// Without a location the session ends up in `NoLocation` instead.
    pub fn begin_fetch(&mut self) -> Result<Coordinate, SessionError> {
        self.transition(DataStatus::Fetching);
        match self.location {
            Some(location) => Ok(location),
            None => {
                self.transition(DataStatus::NoLocation);
                Err(SessionError::NoLocation)
            }
        }
    }

    /// Install freshly built forecasts, the nowcast first, and select the
    /// first one. An empty result is a failure.
    pub fn complete_fetch(&mut self, nowcast: Option<DailyForecast>, daily: Vec<DailyForecast>) {
        self.forecasts = nowcast.into_iter().chain(daily).collect();
        if self.forecasts.is_empty() {
            self.selected = None;
            self.transition(DataStatus::Failure);
        } else {
            self.selected = Some(0);
            self.transition(DataStatus::Success);
        }
    }

    pub fn fail_fetch(&mut self) {
        self.transition(DataStatus::Failure);
    }

    pub fn set_catalog(&mut self, catalog: Vec<RatedBeverage>) {
        info!("Catalog holds {} beverages", catalog.len());
        self.catalog = catalog;
    }

    pub fn catalog(&self) -> &[RatedBeverage] {
        &self.catalog
    }

    pub fn forecasts(&self) -> &[DailyForecast] {
        &self.forecasts
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&DailyForecast> {
        self.forecasts.get(self.selected?)
    }

    /// Change the selected day.
    pub fn select(&mut self, index: usize) -> Result<&DailyForecast, SessionError> {
        let forecast = self
            .forecasts
            .get(index)
            .ok_or(SessionError::NoSuchForecast(index))?;
        self.selected = Some(index);
        tracing::debug!("Selected forecast {} ({})", index, forecast.label);
        Ok(forecast)
    }

    pub fn score(&self, clock: &Clock) -> Option<UtepilsScore> {
        self.selected().map(|f| score(f, clock))
    }

    pub fn verdict<R: Rng + ?Sized>(&self, clock: &Clock, rng: &mut R) -> Option<Verdict> {
        self.score(clock).map(|s| Verdict::new(s, rng))
    }

    /// Ranked beverages for the selected day, or `None` when the day is not
    /// utepils weather.
    pub fn recommendations(&self, clock: &Clock) -> Option<Vec<Recommendation<'_>>> {
        let forecast = self.selected()?;
        if !score(forecast, clock).is_utepils() {
            return None;
        }
        Some(rank(
            &self.catalog,
            forecast.air_temperature(),
            self.recommendation_limit,
        ))
    }

    fn transition(&mut self, status: DataStatus) {
        if self.status != status {
            info!("Data status {:?} -> {:?}", self.status, status);
            self.status = status;
        }
    }
}

use anyhow::Result;
use rand::Rng;
use std::sync::Arc;
use utepils_beverages::rate_catalog;
use utepils_weather::{aggregate_daily, build_nowcast, Clock, SunriseCache};

use crate::error::AppError;
use crate::session::Session;
use crate::snapshot::Snapshot;
use crate::Config;

/// Main application state: config, the sunrise cache and the session
pub struct App {
    config: Arc<Config>,
    sunrise: SunriseCache,
    session: Session,
}

impl App {
    /// Create a new application instance from the config file
    pub fn new() -> Result<Self> {
        let (config, _) = Config::load_validated()?;
        Ok(Self::with_config(config))
    }

    pub fn with_config(config: Config) -> Self {
        let session = Session::new(config.recommendations.limit);
        Self {
            config: Arc::new(config),
            sunrise: SunriseCache::new(),
            session,
        }
    }

    /// Load the configured snapshot directory and run it through the pipeline.
    pub async fn refresh<R: Rng + ?Sized>(
        &mut self,
        clock: &Clock,
        rng: &mut R,
    ) -> Result<(), AppError> {
        let dir = self.config.snapshot.dir.clone();
        tracing::info!("Refreshing from {}", dir.display());

        match Snapshot::load(&dir).await {
            Ok(snapshot) => self.apply_snapshot(snapshot, clock, rng),
            Err(e) => {
                self.session.fail_fetch();
                Err(e.into())
            }
        }
    }

    /// Aggregate the snapshot into forecasts, rate its catalog and hand both
    /// to the session.
    pub fn apply_snapshot<R: Rng + ?Sized>(
        &mut self,
        snapshot: Snapshot,
        clock: &Clock,
        rng: &mut R,
    ) -> Result<(), AppError> {
        self.session.set_location(snapshot.location);
        let location = self.session.begin_fetch()?;

        self.sunrise.invalidate_location(&location);
        for record in snapshot.sunrise {
            self.sunrise.insert(&location, record);
        }

        let forecast = &self.config.forecast;
        let daily = aggregate_daily(
            &snapshot.forecast,
            location,
            &self.sunrise,
            clock,
            &forecast.aggregate_options(),
        );
        let nowcast = build_nowcast(
            &snapshot.nowcast,
            &snapshot.forecast,
            location,
            &self.sunrise,
            clock,
            &forecast.nowcast_label,
        );

        self.session.set_catalog(rate_catalog(snapshot.catalog, rng));
        self.session.complete_fetch(nowcast, daily);
        Ok(())
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn sunrise_cache(&self) -> &SunriseCache {
        &self.sunrise
    }
}

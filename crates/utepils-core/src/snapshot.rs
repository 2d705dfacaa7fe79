//! Saved API responses on disk.
//!
//! A snapshot directory holds what the network layer would otherwise fetch:
//!
//! ```text
//! locationforecast.json   required
//! nowcast.json            optional
//! sunrise/*.json          one sunrise document per date
//! beverages.json          optional product catalog
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use utepils_beverages::{parse_catalog, Beverage};
use utepils_weather::{Coordinate, MetForecast, MetSunrise, SunriseRecord, TimeStep};

use crate::error::SnapshotError;

pub const FORECAST_FILE: &str = "locationforecast.json";
pub const NOWCAST_FILE: &str = "nowcast.json";
pub const SUNRISE_DIR: &str = "sunrise";
pub const CATALOG_FILE: &str = "beverages.json";

#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Location of the forecast document
    pub location: Coordinate,
    pub forecast: Vec<TimeStep>,
    /// Empty when the snapshot has no nowcast
    pub nowcast: Vec<TimeStep>,
    pub sunrise: Vec<SunriseRecord>,
    pub catalog: Vec<Beverage>,
}

impl Snapshot {
    pub async fn load(dir: &Path) -> Result<Self> {
        if tokio::fs::metadata(dir).await.is_err() {
            return Err(SnapshotError::NotFound(dir.display().to_string()).into());
        }

        let forecast_path = dir.join(FORECAST_FILE);
        let forecast_json = read_optional(&forecast_path)
            .await?
            .ok_or_else(|| SnapshotError::MissingFile(forecast_path.display().to_string()))?;
        let forecast = MetForecast::from_json(&forecast_json)
            .with_context(|| format!("Failed to parse {}", forecast_path.display()))?;
        let location = forecast
            .location()
            .with_context(|| format!("Failed to read location from {}", forecast_path.display()))?;

        let nowcast_path = dir.join(NOWCAST_FILE);
        let nowcast = match read_optional(&nowcast_path).await? {
            Some(json) => MetForecast::from_json(&json)
                .with_context(|| format!("Failed to parse {}", nowcast_path.display()))?
                .into_timeseries(),
            None => {
                debug!("No nowcast in snapshot");
                Vec::new()
            }
        };

        let sunrise = load_sunrise(&dir.join(SUNRISE_DIR)).await?;

        let catalog_path = dir.join(CATALOG_FILE);
        let catalog = match read_optional(&catalog_path).await? {
            Some(json) => parse_catalog(&json)
                .with_context(|| format!("Failed to parse {}", catalog_path.display()))?,
            None => {
                warn!("No beverage catalog in snapshot, recommendations will be empty");
                Vec::new()
            }
        };

        let snapshot = Self {
            location,
            forecast: forecast.into_timeseries(),
            nowcast,
            sunrise,
            catalog,
        };
        info!(
            "Loaded snapshot: {} forecast steps, {} nowcast steps, {} sunrise records, {} beverages",
            snapshot.forecast.len(),
            snapshot.nowcast.len(),
            snapshot.sunrise.len(),
            snapshot.catalog.len()
        );
        Ok(snapshot)
    }
}

async fn read_optional(path: &Path) -> Result<Option<String>> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
}

async fn load_sunrise(dir: &Path) -> Result<Vec<SunriseRecord>> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("No sunrise data in snapshot, every entry will be dropped");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to list {}", dir.display()));
        }
    };

    let mut paths: Vec<PathBuf> = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("Failed to list {}", dir.display()))?
    {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut records = Vec::with_capacity(paths.len());
    for path in paths {
        let json = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let document = MetSunrise::from_json(&json)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        match document.record() {
            Some(record) => records.push(record),
            None => debug!("{} has no sunrise or sunset, skipping", path.display()),
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[tokio::test]
    async fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = Snapshot::load(&dir.path().join("nope")).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SnapshotError>(),
            Some(SnapshotError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_forecast_is_required() {
        let dir = tempfile::tempdir().unwrap();
        let err = Snapshot::load(dir.path()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SnapshotError>(),
            Some(SnapshotError::MissingFile(_))
        ));
    }

    #[tokio::test]
    async fn test_minimal_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(
            dir.path().join(FORECAST_FILE),
            r#"{
                "geometry": { "coordinates": [10.75, 59.91, 10] },
                "properties": { "timeseries": [] }
            }"#,
        )
        .await
        .unwrap();

        let snapshot = Snapshot::load(dir.path()).await.unwrap();
        assert_eq!(snapshot.location, Coordinate::new(59.91, 10.75));
        assert!(snapshot.forecast.is_empty());
        assert!(snapshot.nowcast.is_empty());
        assert!(snapshot.sunrise.is_empty());
        assert!(snapshot.catalog.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_catalog_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(
            dir.path().join(FORECAST_FILE),
            r#"{ "geometry": { "coordinates": [10.75, 59.91] }, "properties": {} }"#,
        )
        .await
        .unwrap();
        tokio::fs::write(dir.path().join(CATALOG_FILE), "{ oops")
            .await
            .unwrap();

        let err = Snapshot::load(dir.path()).await.unwrap_err();
        assert!(err.to_string().contains(CATALOG_FILE));
    }
}

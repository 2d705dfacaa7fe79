//! Integration tests for App::refresh over a snapshot directory.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::path::Path;

use chrono::{TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use utepils_core::{App, AppError, Config, DataStatus};
use utepils_weather::{Clock, ForecastKind};

fn step(time: &str, details: Value) -> Value {
    json!({ "time": time, "data": { "instant": { "details": details } } })
}

fn met_document(steps: Vec<Value>) -> Value {
    json!({
        "type": "Feature",
        "geometry": { "type": "Point", "coordinates": [10.7522, 59.9139, 12] },
        "properties": { "timeseries": steps }
    })
}

fn sunrise_document(date: &str) -> Value {
    json!({
        "location": {
            "time": [{
                "date": date,
                "sunrise": { "time": format!("{}T04:13:00+02:00", date) },
                "sunset": { "time": format!("{}T22:16:00+02:00", date) }
            }]
        }
    })
}

async fn write_json(path: &Path, value: &Value) {
    tokio::fs::write(path, serde_json::to_string_pretty(value).unwrap())
        .await
        .unwrap();
}

async fn write_snapshot(dir: &Path) {
    let clear = json!({ "air_temperature": 22.0, "cloud_area_fraction_high": 0.0,
        "cloud_area_fraction_medium": 0.0, "cloud_area_fraction_low": 0.0 });
    let rain = json!({ "air_temperature": 11.0, "precipitation_rate": 8.0 });

    let forecast = met_document(vec![
        step(
            "2022-05-20T12:00:00Z",
            json!({ "air_temperature": 18.0, "cloud_area_fraction_high": 10.0,
                "cloud_area_fraction_medium": 10.0, "cloud_area_fraction_low": 10.0 }),
        ),
        step("2022-05-20T23:00:00Z", json!({})),
        step("2022-05-21T06:00:00Z", clear.clone()),
        step("2022-05-21T12:00:00Z", clear.clone()),
        step("2022-05-21T18:00:00Z", clear),
        step("2022-05-21T23:00:00Z", json!({})),
        step("2022-05-22T06:00:00Z", rain.clone()),
        step("2022-05-22T12:00:00Z", rain),
        step("2022-05-22T23:00:00Z", json!({})),
        step("2022-05-23T12:00:00Z", json!({ "air_temperature": 30.0 })),
    ]);
    write_json(&dir.join("locationforecast.json"), &forecast).await;

    let nowcast = met_document(vec![step(
        "2022-05-20T12:00:00Z",
        json!({ "air_temperature": 19.0, "wind_speed": 2.0 }),
    )]);
    write_json(&dir.join("nowcast.json"), &nowcast).await;

    tokio::fs::create_dir(dir.join("sunrise")).await.unwrap();
    for date in ["2022-05-20", "2022-05-21", "2022-05-22", "2022-05-23"] {
        write_json(
            &dir.join("sunrise").join(format!("{}.json", date)),
            &sunrise_document(date),
        )
        .await;
    }

    let catalog = json!([
        { "basic": { "productId": "1", "productLongName": "Summer Lager", "alcoholContent": 4.6 } },
        { "basic": { "productId": "2", "productLongName": "Julebrygg", "alcoholContent": 6.5 },
          "logistics": { "wholesalerId": "9" } }
    ]);
    write_json(&dir.join("beverages.json"), &catalog).await;
}

fn app_for(dir: &Path) -> App {
    let mut config = Config::default();
    config.snapshot.dir = dir.to_path_buf();
    App::with_config(config)
}

fn clock() -> Clock {
    Clock::utc(Utc.with_ymd_and_hms(2022, 5, 20, 12, 0, 0).unwrap())
}

#[tokio::test]
async fn test_refresh_builds_forecasts_and_recommendations() {
    let dir = tempfile::tempdir().unwrap();
    write_snapshot(dir.path()).await;

    let mut app = app_for(dir.path());
    let mut rng = StdRng::seed_from_u64(3);
    app.refresh(&clock(), &mut rng).await.unwrap();

    let session = app.session();
    assert_eq!(session.status(), DataStatus::Success);
    assert_eq!(app.sunrise_cache().len(), 4);

    // Today only appears as the nowcast; the 23rd is never closed by a night entry.
    let labels: Vec<&str> = session.forecasts().iter().map(|f| f.label.as_str()).collect();
    assert_eq!(labels, vec!["Now", "21", "22"]);

    let now = session.selected().unwrap();
    assert_eq!(now.kind, ForecastKind::Nowcast);
    assert_eq!(now.instant.air_temperature, Some(19.0));
    assert_eq!(now.instant.cloud_area_fraction_low, Some(10.0));

    let verdict = session.verdict(&clock(), &mut rng).unwrap();
    assert!(verdict.is_utepils());

    let picks = session.recommendations(&clock()).unwrap();
    assert_eq!(picks.len(), 2);
    assert_eq!(picks[0].beverage.beverage.name(), Some("Summer Lager"));
}

#[tokio::test]
async fn test_rainy_day_has_no_recommendations() {
    let dir = tempfile::tempdir().unwrap();
    write_snapshot(dir.path()).await;

    let mut app = app_for(dir.path());
    app.refresh(&clock(), &mut StdRng::seed_from_u64(3))
        .await
        .unwrap();

    app.session_mut().select(1).unwrap();
    assert!(app.session().recommendations(&clock()).is_some());

    app.session_mut().select(2).unwrap();
    assert!(!app.session().score(&clock()).unwrap().is_utepils());
    assert!(app.session().recommendations(&clock()).is_none());
}

#[tokio::test]
async fn test_trailing_day_flush_is_configurable() {
    let dir = tempfile::tempdir().unwrap();
    write_snapshot(dir.path()).await;

    let mut config = Config::default();
    config.snapshot.dir = dir.path().to_path_buf();
    config.forecast.flush_trailing_day = true;
    config.forecast.nowcast_label = "Nå".to_string();
    let mut app = App::with_config(config);
    app.refresh(&clock(), &mut StdRng::seed_from_u64(3))
        .await
        .unwrap();

    let labels: Vec<&str> = app
        .session()
        .forecasts()
        .iter()
        .map(|f| f.label.as_str())
        .collect();
    assert_eq!(labels, vec!["Nå", "21", "22", "23"]);
}

#[tokio::test]
async fn test_unreadable_forecast_reports_weather_message() {
    let dir = tempfile::tempdir().unwrap();
    tokio::fs::write(dir.path().join("locationforecast.json"), "{ oops")
        .await
        .unwrap();

    let mut app = app_for(dir.path());
    let err = app
        .refresh(&clock(), &mut StdRng::seed_from_u64(3))
        .await
        .unwrap_err();
    assert_eq!(app.session().status(), DataStatus::Failure);
    assert_eq!(
        err.user_message(),
        "Received unreadable weather data. Please try again."
    );

    // The same message survives the trip through anyhow in the binary.
    let err = anyhow::Error::from(err);
    assert_eq!(
        AppError::user_message_for(&err),
        "Received unreadable weather data. Please try again."
    );
}

#[tokio::test]
async fn test_missing_snapshot_fails_session() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_for(&dir.path().join("absent"));

    let err = app
        .refresh(&clock(), &mut StdRng::seed_from_u64(3))
        .await
        .unwrap_err();
    assert_eq!(app.session().status(), DataStatus::Failure);
    assert!(matches!(err, AppError::Other(_)));
    assert_eq!(
        err.user_message(),
        "No saved weather data found. Check your settings."
    );
}

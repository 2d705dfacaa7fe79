use anyhow::Result;
use utepils_core::{App, AppError, Config};
use utepils_weather::{score, Clock};

fn main() -> Result<()> {
    let config = Config::load()?;
    utepils_core::init(&config.log_filter)?;
    config.ensure_valid()?;

    let selected = std::env::args().nth(1).map(|arg| arg.parse::<usize>()).transpose()?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(config, selected)).inspect_err(|e| {
        tracing::error!("{:#}", e);
        eprintln!("{}", AppError::user_message_for(e));
    })
}

async fn run(config: Config, selected: Option<usize>) -> Result<()> {
    let clock = Clock::system();
    let mut rng = rand::thread_rng();
    let mut app = App::with_config(config);
    app.refresh(&clock, &mut rng).await?;

    if let Some(index) = selected {
        app.session_mut().select(index)?;
    }

    let session = app.session();
    println!("Utepils");
    for (index, forecast) in session.forecasts().iter().enumerate() {
        let marker = if session.selected_index() == Some(index) { '>' } else { ' ' };
        println!(
            "{} [{}] {:>4}  {:>3}%  {}",
            marker,
            index,
            forecast.label,
            score(forecast, &clock).percent(),
            forecast.symbol_code().unwrap_or("-")
        );
    }

    let Some(verdict) = session.verdict(&clock, &mut rng) else {
        return Ok(());
    };
    println!("\n{} ({}%)", verdict.title, verdict.score.percent());
    println!("{}", verdict.subtitle);

    if let Some(picks) = session.recommendations(&clock) {
        println!();
        for pick in picks {
            let beverage = &pick.beverage.beverage;
            println!(
                "{:>5.1}%  {:<40} {:>5.1}°C  {}",
                pick.match_score * 100.0,
                beverage.name().unwrap_or("Unknown"),
                pick.beverage.optimal_temperature(),
                beverage.source().name()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[tokio::test]
    async fn test_missing_snapshot_is_returned_as_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.snapshot.dir = dir.path().join("absent");

        let err = run(config, None).await.unwrap_err();
        assert_eq!(
            AppError::user_message_for(&err),
            "No saved weather data found. Check your settings."
        );
    }
}

pub mod app;
pub mod config;
pub mod error;
pub mod session;
pub mod snapshot;

pub use app::App;
pub use config::{Config, ForecastConfig, RecommendationConfig, SnapshotConfig, ValidationResult};
pub use error::{AppError, ConfigError, SessionError, SnapshotError};
pub use session::{DataStatus, Session, Verdict};
pub use snapshot::Snapshot;

use anyhow::Result;

/// Initialize logging. `RUST_LOG` wins over `default_filter`.
pub fn init(default_filter: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::info!("Utepils core initialized");
    Ok(())
}

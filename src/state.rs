use crate::{config::Config, prelude::*};

pub struct AppState {
  pub db: DatabaseConnection,
  pub config: Config,
}

impl AppState {
  /// Connects to the database and brings its schema up to date.
  pub async fn new(config: Config) -> anyhow::Result<Self> {
    let db = Database::connect(config.database_url.as_str())
      .await
      .with_context(|| format!("Failed to connect to {}", config.database_url))?;

    migration::Migrator::up(&db, None)
      .await
      .context("Failed to run migrations")?;

    info!("Database ready at {}", config.database_url);

    Ok(Self { db, config })
  }
}

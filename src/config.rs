use std::env;

use crate::prelude::*;

/// Runtime settings read from the environment (and `.env`, if present).
///
/// | Env Var           | Default                            |
/// |-------------------|------------------------------------|
/// | `DATABASE_URL`    | `sqlite:promotions.db?mode=rwc`    |
/// | `HOST`            | `0.0.0.0`                          |
/// | `PORT`            | `3000`                             |
/// | `RATE_PER_SECOND` | `2`                                |
/// | `RATE_BURST`      | `100`                              |
#[derive(Debug, Clone)]
pub struct Config {
  pub database_url: String,
  pub host: String,
  pub port: u16,
  pub rate_per_second: u64,
  pub rate_burst: u32,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      database_url: "sqlite:promotions.db?mode=rwc".into(),
      host: "0.0.0.0".into(),
      port: 3000,
      rate_per_second: 2,
      rate_burst: 100,
    }
  }
}

impl Config {
  pub fn from_env() -> anyhow::Result<Self> {
    let defaults = Self::default();

    Ok(Self {
      database_url: env::var("DATABASE_URL")
        .unwrap_or(defaults.database_url),
      host: env::var("HOST").unwrap_or(defaults.host),
      port: parse_var("PORT")?.unwrap_or(defaults.port),
      rate_per_second: parse_var("RATE_PER_SECOND")?
        .unwrap_or(defaults.rate_per_second),
      rate_burst: parse_var("RATE_BURST")?.unwrap_or(defaults.rate_burst),
    })
  }
}

fn parse_var<T>(key: &str) -> anyhow::Result<Option<T>>
where
  T: std::str::FromStr,
  T::Err: std::error::Error + Send + Sync + 'static,
{
  match env::var(key) {
    Ok(value) if !value.trim().is_empty() => value
      .trim()
      .parse()
      .map(Some)
      .with_context(|| format!("Invalid {key} value `{value}`")),
    _ => Ok(None),
  }
}

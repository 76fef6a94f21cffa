use std::{env, str::FromStr};

use migration::{Migrator, MigratorTrait};

use crate::{prelude::*, sv};

#[derive(Debug, Clone)]
pub struct Config {
  pub database_url: String,
  pub port: u16,
  /// Seconds for the rate limiter to regain one request slot per client
  pub rate_limit_replenish_secs: u64,
  pub rate_limit_burst: u32,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      database_url: String::from("sqlite:items.db?mode=rwc"),
      port: 8000,
      rate_limit_replenish_secs: 2,
      rate_limit_burst: 100,
    }
  }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> T {
  let Some(raw) = raw else {
    return default;
  };

  match raw.trim().parse() {
    Ok(value) => value,
    Err(_) => {
      warn!("Invalid {key}={raw:?}, falling back to default");
      default
    }
  }
}

/// Like [`parse_or`], but zero is rejected too.
fn parse_nonzero<T>(key: &str, raw: Option<String>, default: T) -> T
where
  T: FromStr + Default + PartialEq + Copy,
{
  let value = parse_or(key, raw, default);
  if value == T::default() {
    warn!("{key} must be greater than zero, falling back to default");
    return default;
  }
  value
}

impl Config {
  pub fn from_env() -> Self {
    Self::from_lookup(|key| env::var(key).ok())
  }

  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
    let default = Self::default();

    Self {
      database_url: lookup("DATABASE_URL")
        .filter(|url| !url.trim().is_empty())
        .unwrap_or(default.database_url),
      port: parse_or("PORT", lookup("PORT"), default.port),
      rate_limit_replenish_secs: parse_nonzero(
        "RATE_LIMIT_REPLENISH_SECS",
        lookup("RATE_LIMIT_REPLENISH_SECS"),
        default.rate_limit_replenish_secs,
      ),
      rate_limit_burst: parse_nonzero(
        "RATE_LIMIT_BURST",
        lookup("RATE_LIMIT_BURST"),
        default.rate_limit_burst,
      ),
    }
  }
}

pub struct Services<'a> {
  pub item: sv::Item<'a>,
}

pub struct AppState {
  pub db: DatabaseConnection,
  pub config: Config,
}

impl AppState {
  pub async fn new(config: Config) -> anyhow::Result<Self> {
    info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
      .await
      .context("Failed to connect to database")?;

    info!("Running migrations...");
    Migrator::up(&db, None).await.context("Failed to run migrations")?;

    let state = Self { db, config };
    let items = state.sv().item.count().await?;
    info!("Database ready, {items} items stored");

    Ok(state)
  }

  pub fn sv(&self) -> Services<'_> {
    Services { item: sv::Item::new(&self.db) }
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use super::*;

  fn config(vars: &[(&str, &str)]) -> Config {
    let vars: HashMap<_, _> = vars.iter().copied().collect();
    Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
  }

  #[test]
  fn defaults_when_unset() {
    let config = config(&[]);
    assert_eq!(config.database_url, "sqlite:items.db?mode=rwc");
    assert_eq!(config.port, 8000);
    assert_eq!(config.rate_limit_burst, 100);
  }

  #[test]
  fn reads_overrides() {
    let config = config(&[
      ("DATABASE_URL", "sqlite::memory:"),
      ("PORT", " 3000 "),
      ("RATE_LIMIT_REPLENISH_SECS", "10"),
    ]);
    assert_eq!(config.database_url, "sqlite::memory:");
    assert_eq!(config.port, 3000);
    assert_eq!(config.rate_limit_replenish_secs, 10);
  }

  #[test]
  fn invalid_numbers_fall_back() {
    let config = config(&[("PORT", "eighty"), ("RATE_LIMIT_BURST", "-1")]);
    assert_eq!(config.port, 8000);
    assert_eq!(config.rate_limit_burst, 100);
  }

  #[test]
  fn zero_rate_limits_fall_back() {
    let config = config(&[
      ("RATE_LIMIT_REPLENISH_SECS", "0"),
      ("RATE_LIMIT_BURST", " 0 "),
    ]);
    assert_eq!(config.rate_limit_replenish_secs, 2);
    assert_eq!(config.rate_limit_burst, 100);
  }
}

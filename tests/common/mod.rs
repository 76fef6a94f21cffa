#![allow(dead_code)]

use std::sync::Arc;

use items::state::{AppState, Config};

pub fn memory_config() -> Config {
  Config { database_url: "sqlite::memory:".into(), ..Config::default() }
}

pub async fn state() -> Arc<AppState> {
  Arc::new(AppState::new(memory_config()).await.expect("in-memory database"))
}

use std::sync::Arc;

use items::{plugins, prelude::*, state::{AppState, Config}};
use tracing_subscriber::{
  EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
      "items=debug,tower_http=debug,sea_orm=warn".into()
    }))
    .with(tracing_subscriber::fmt::layer())
    .init();

  info!("Starting Items API v{}", env!("CARGO_PKG_VERSION"));

  let app = Arc::new(AppState::new(Config::from_env()).await?);

  let services =
    plugins::App::new().register(plugins::server::Plugin).run(app);

  tokio::signal::ctrl_c().await.context("Failed to listen for Ctrl-C")?;
  info!("Shutting down...");

  for service in services {
    service.abort();
  }

  Ok(())
}

pub mod server;

use std::{sync::Arc, time::Duration};

use tokio::{task::JoinHandle, time::sleep};
use tracing::{error, info, warn};

use crate::state::AppState;

const RESTART_DELAY: Duration = Duration::from_secs(5);

/// A long-running service supervised by [`App`].
#[async_trait::async_trait]
pub trait Plugin: Send + Sync {
  fn name(&self) -> &'static str {
    std::any::type_name::<Self>()
  }

  async fn start(&self, app: Arc<AppState>) -> anyhow::Result<()>;
}

#[derive(Default)]
pub struct App {
  plugins: Vec<Arc<dyn Plugin>>,
}

impl App {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn register<P: Plugin + 'static>(mut self, plugin: P) -> Self {
    self.plugins.push(Arc::new(plugin));
    self
  }

  /// Spawns one supervisor per plugin. A plugin that returns or crashes is
  /// restarted after [`RESTART_DELAY`]; aborting the returned handle stops it.
  pub fn run(self, app: Arc<AppState>) -> Vec<JoinHandle<()>> {
    self
      .plugins
      .into_iter()
      .map(|plugin| tokio::spawn(supervise(plugin, app.clone())))
      .collect()
  }
}

async fn supervise(plugin: Arc<dyn Plugin>, app: Arc<AppState>) {
  let name = plugin.name();
  info!("Service `{name}` initialized");

  loop {
    let handle = tokio::spawn({
      let app = app.clone();
      let plugin = plugin.clone();
      async move { plugin.start(app).await }
    });

    match handle.await {
      Ok(Ok(())) => warn!("Service `{name}` stopped unexpectedly"),
      Ok(Err(err)) => error!("Service `{name}` crashed: {err:#}"),
      Err(err) if err.is_cancelled() => {
        info!("Service `{name}` shutdown");
        break;
      }
      Err(_) => error!("Service `{name}` panicked"),
    }

    sleep(RESTART_DELAY).await;
    info!("Restarting service `{name}`...");
  }
}

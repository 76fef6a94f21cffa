//! HTTP surface: the explicit route table and the server plugin.

mod handlers;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use async_trait::async_trait;
use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder};
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

use crate::{prelude::*, state::AppState};

/// Item routes, relative to wherever they are mounted.
fn item_routes() -> Router<Arc<AppState>> {
  Router::new()
    .route("/items", get(handlers::list_items).post(handlers::create_item))
    .route(
      "/items/{id}",
      get(handlers::get_item)
        .put(handlers::replace_item)
        .patch(handlers::patch_item)
        .delete(handlers::delete_item),
    )
}

/// Full application router without rate limiting, which needs the peer
/// address only the real listener provides.
pub fn router(app: Arc<AppState>) -> Router {
  let items = item_routes();

  Router::new()
    .route("/health", get(handlers::health))
    .merge(items.clone())
    .nest("/api", items)
    .layer(
      ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
      ),
    )
    .with_state(app)
}

pub struct Plugin;

#[async_trait]
impl super::Plugin for Plugin {
  async fn start(&self, app: Arc<AppState>) -> anyhow::Result<()> {
    let config = &app.config;

    let governor_conf = Arc::new(
      GovernorConfigBuilder::default()
        .per_second(config.rate_limit_replenish_secs)
        .burst_size(config.rate_limit_burst)
        .finish()
        .context("Failed to build rate limiter config")?,
    );

    let limiter = governor_conf.limiter().clone();
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    let router = router(app.clone())
      .layer(GovernorLayer::new(governor_conf))
      .into_make_service_with_connect_info::<SocketAddr>();

    let listener = tokio::net::TcpListener::bind(addr)
      .await
      .with_context(|| format!("Failed to bind {addr}"))?;
    info!("HTTP Server listening on {addr}");

    let limiter = async {
      loop {
        tokio::time::sleep(Duration::from_secs(60)).await;
        limiter.retain_recent();
      }
    };

    let server = async {
      axum::serve(listener, router).await.context("Axum server error")
    };

    tokio::select! {
      result = server => {
        match &result {
          Ok(_) => info!("Server stopped gracefully"),
          Err(err) => error!("Server stopped with error: {err}"),
        }
        result
      }
      _ = limiter => {
        error!("Rate limiter cleaner stopped unexpectedly!");
        Ok(())
      }
    }
  }
}

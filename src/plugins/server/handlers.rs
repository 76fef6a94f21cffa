use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State, rejection::{JsonRejection, PathRejection}},
  http::StatusCode,
};
use serde::Deserialize;

use crate::{
  model::{Item, ItemInput},
  prelude::*,
  state::AppState,
};

type Payload = std::result::Result<Json<ItemInput>, JsonRejection>;
type ItemId = std::result::Result<Path<i32>, PathRejection>;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
  pub search: Option<String>,
}

pub async fn list_items(
  State(app): State<Arc<AppState>>,
  Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Item>>> {
  let items = app.sv().item.list(query.search.as_deref()).await?;
  Ok(Json(items))
}

pub async fn create_item(
  State(app): State<Arc<AppState>>,
  payload: Payload,
) -> Result<(StatusCode, Json<Item>)> {
  let Json(input) = payload?;
  let item = app.sv().item.create(input.into_new()?).await?;
  Ok((StatusCode::CREATED, Json(item)))
}

pub async fn get_item(
  State(app): State<Arc<AppState>>,
  id: ItemId,
) -> Result<Json<Item>> {
  let Path(id) = id?;
  Ok(Json(app.sv().item.get(id).await?))
}

async fn update_item(
  app: &AppState,
  id: i32,
  payload: Payload,
  partial: bool,
) -> Result<Json<Item>> {
  let Json(input) = payload?;
  let item = app.sv().item.update(id, input.into_patch(partial)?).await?;
  Ok(Json(item))
}

pub async fn replace_item(
  State(app): State<Arc<AppState>>,
  id: ItemId,
  payload: Payload,
) -> Result<Json<Item>> {
  let Path(id) = id?;
  update_item(&app, id, payload, false).await
}

pub async fn patch_item(
  State(app): State<Arc<AppState>>,
  id: ItemId,
  payload: Payload,
) -> Result<Json<Item>> {
  let Path(id) = id?;
  update_item(&app, id, payload, true).await
}

pub async fn delete_item(
  State(app): State<Arc<AppState>>,
  id: ItemId,
) -> Result<StatusCode> {
  let Path(id) = id?;
  app.sv().item.delete(id).await?;
  Ok(StatusCode::NO_CONTENT)
}

pub async fn health() -> &'static str {
  "OK"
}

//! Error types for the items API

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use tracing::error;

use crate::model::FieldErrors;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("Database error: {0}")]
  Database(#[from] sea_orm::DbErr),

  #[error("Item not found")]
  ItemNotFound,

  #[error("Validation failed: {0}")]
  Validation(#[from] FieldErrors),

  #[error("Bad request: {0}")]
  BadRequest(String),
}

impl From<JsonRejection> for Error {
  fn from(rejection: JsonRejection) -> Self {
    Error::BadRequest(rejection.body_text())
  }
}

impl From<PathRejection> for Error {
  fn from(rejection: PathRejection) -> Self {
    Error::BadRequest(rejection.body_text())
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let (status, body) = match self {
      Error::Database(err) => {
        error!("Database error: {err}");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          json::json!({ "success": false, "error": "Database error" }),
        )
      }
      Error::ItemNotFound => (
        StatusCode::NOT_FOUND,
        json::json!({ "success": false, "error": "Item not found" }),
      ),
      Error::Validation(fields) => (
        StatusCode::BAD_REQUEST,
        json::json!({
          "success": false,
          "error": "Validation failed",
          "fields": fields,
        }),
      ),
      Error::BadRequest(message) => (
        StatusCode::BAD_REQUEST,
        json::json!({ "success": false, "error": message }),
      ),
    };

    (status, Json(body)).into_response()
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

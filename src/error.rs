use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::MenuResponse;

#[derive(Error, Debug, PartialEq)]
pub enum MenuError {
    #[error("dish name cannot be empty")]
    EmptyName,

    #[error("dish already exists: {0}")]
    DuplicateName(String),

    #[error("dish not found: {0}")]
    NotFound(String),

    #[error("menu is empty")]
    EmptyMenu,

    #[error("failed to save menu")]
    PersistenceFailure,
}

impl IntoResponse for MenuError {
    fn into_response(self) -> Response {
        // Rule violations answer 200 with a success flag, the shape the
        // frontend reads. I/O problems degrade the same way.
        (StatusCode::OK, Json(MenuResponse::failure(self.to_string()))).into_response()
    }
}

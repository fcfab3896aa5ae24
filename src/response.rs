//! Response helpers. Successful bodies are bare JSON values; errors go through `AppError`.

use crate::models::Favorites;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct FavoritesBody {
    pub message: String,
    pub data: Favorites,
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

/// A JSON string body, e.g. `"Yoda removed successfully"`.
pub fn message(status: StatusCode, text: impl Into<String>) -> (StatusCode, Json<String>) {
    (status, Json(text.into()))
}

/// 200 with the rows as an array, or 404 with `empty` as a JSON string when there are none.
pub fn list_or_empty<T: Serialize>(rows: Vec<T>, empty: &'static str) -> Response {
    if rows.is_empty() {
        message(StatusCode::NOT_FOUND, empty).into_response()
    } else {
        ok(rows).into_response()
    }
}

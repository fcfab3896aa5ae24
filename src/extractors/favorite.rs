//! Extract the acting user's id from a favorite add/remove body (`{"user_id": 1}`).

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde_json::Value;

pub const USER_ID_FIELD: &str = "user_id";

/// The `user_id` from the request body. Missing, null or non-integer values reject with 400;
/// bodies over the router limit reject with 413.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FavoriteRequest {
    pub user_id: i32,
}

impl FavoriteRequest {
    pub fn from_body(bytes: &[u8]) -> Result<Self, AppError> {
        let missing = || AppError::BadRequest(format!("{} is required", USER_ID_FIELD));
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(missing());
        }
        let body: Value = serde_json::from_slice(bytes)
            .map_err(|_| AppError::BadRequest("body must be a JSON object".into()))?;
        let value = match body {
            Value::Object(mut m) => m.remove(USER_ID_FIELD).unwrap_or(Value::Null),
            _ => return Err(AppError::BadRequest("body must be a JSON object".into())),
        };
        let user_id = match value {
            Value::Null => return Err(missing()),
            Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
            Value::String(s) => s.trim().parse::<i32>().ok(),
            _ => None,
        }
        .ok_or_else(|| AppError::BadRequest(format!("{} must be an integer", USER_ID_FIELD)))?;
        Ok(FavoriteRequest { user_id })
    }
}

#[async_trait]
impl<S> FromRequest<S> for FavoriteRequest
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge(e.body_text())
            } else {
                AppError::BadRequest(e.body_text())
            }
        })?;
        Self::from_body(&bytes)
    }
}

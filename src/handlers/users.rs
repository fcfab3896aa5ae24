//! User listing and per-user favorites.

use crate::error::AppError;
use crate::handlers::catalog::parse_id;
use crate::response::{list_or_empty, ok, FavoritesBody};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};

pub const NO_USERS_MESSAGE: &str = "Sorry! No user found!";

pub async fn list_users(State(state): State<AppState>) -> Result<Response, AppError> {
    let users = state.store.list_users().await?;
    Ok(list_or_empty(users, NO_USERS_MESSAGE))
}

pub async fn user_favorites(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let user = state
        .store
        .get_user(id)
        .await?
        .ok_or_else(|| AppError::NotFound(NO_USERS_MESSAGE.into()))?;
    let data = state.store.favorites(user.id).await?;
    Ok(ok(FavoritesBody {
        message: format!("User {}'s list of favorites", user.username),
        data,
    })
    .into_response())
}

//! Favorite add/remove for both catalog kinds.

use crate::catalog::CatalogKind;
use crate::error::AppError;
use crate::extractors::FavoriteRequest;
use crate::handlers::catalog::parse_id;
use crate::models::{CatalogEntry, User};
use crate::response::message;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Both the user and the target must exist; either missing is a 404.
async fn load_pair(
    state: &AppState,
    kind: CatalogKind,
    user_id: i32,
    target_id: i32,
) -> Result<(User, CatalogEntry), AppError> {
    let user = state.store.get_user(user_id).await?;
    let target = state.store.get_entry(kind, target_id).await?;
    match (user, target) {
        (Some(user), Some(target)) => Ok((user, target)),
        _ => Err(AppError::NotFound(format!("{} or user not found", kind.label()))),
    }
}

pub async fn add_favorite(
    state: &AppState,
    kind: CatalogKind,
    id_str: &str,
    user_id: i32,
) -> Result<Response, AppError> {
    let target_id = parse_id(id_str)?;
    let (user, target) = load_pair(state, kind, user_id, target_id).await?;

    let already = state.store.is_favorite(kind, user.id, target.id()).await?
        || !state.store.add_favorite(kind, user.id, target.id()).await?;
    if already {
        return Ok(message(
            StatusCode::OK,
            format!("{} is already a favorite of {}", target.name(), user.username),
        )
        .into_response());
    }
    tracing::info!(%kind, user_id = user.id, target_id = target.id(), "favorite added");
    Ok(message(
        StatusCode::OK,
        format!("User {} has added {} to their favorites", user.username, target.name()),
    )
    .into_response())
}

pub async fn remove_favorite(
    state: &AppState,
    kind: CatalogKind,
    id_str: &str,
    user_id: i32,
) -> Result<Response, AppError> {
    let target_id = parse_id(id_str)?;
    let (user, target) = load_pair(state, kind, user_id, target_id).await?;

    if !state.store.is_favorite(kind, user.id, target.id()).await?
        || !state.store.remove_favorite(kind, user.id, target.id()).await?
    {
        return Err(AppError::BadRequest(format!("{} is not in favorites", target.name())));
    }
    tracing::info!(%kind, user_id = user.id, target_id = target.id(), "favorite removed");
    Ok(message(StatusCode::OK, format!("{} removed successfully", target.name())).into_response())
}

pub async fn add_favorite_planet(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: FavoriteRequest,
) -> Result<Response, AppError> {
    add_favorite(&state, CatalogKind::Planet, &id, body.user_id).await
}

pub async fn remove_favorite_planet(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: FavoriteRequest,
) -> Result<Response, AppError> {
    remove_favorite(&state, CatalogKind::Planet, &id, body.user_id).await
}

pub async fn add_favorite_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: FavoriteRequest,
) -> Result<Response, AppError> {
    add_favorite(&state, CatalogKind::People, &id, body.user_id).await
}

pub async fn remove_favorite_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: FavoriteRequest,
) -> Result<Response, AppError> {
    remove_favorite(&state, CatalogKind::People, &id, body.user_id).await
}

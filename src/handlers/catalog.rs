//! Catalog read handlers: list and get-by-id for people and planets.

use crate::catalog::CatalogKind;
use crate::error::AppError;
use crate::response::{list_or_empty, ok};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};

/// Path ids are integers; anything else is a client error.
pub(crate) fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest("invalid id".into()))
}

async fn list_kind(state: &AppState, kind: CatalogKind) -> Result<Response, AppError> {
    let rows = state.store.list_entries(kind).await?;
    Ok(list_or_empty(rows, kind.empty_message()))
}

async fn read_kind(state: &AppState, kind: CatalogKind, id_str: &str) -> Result<Response, AppError> {
    let id = parse_id(id_str)?;
    let entry = state
        .store
        .get_entry(kind, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} ID {} was not found", kind.label(), id)))?;
    Ok(ok(entry).into_response())
}

pub async fn list_planets(State(state): State<AppState>) -> Result<Response, AppError> {
    list_kind(&state, CatalogKind::Planet).await
}

pub async fn read_planet(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, AppError> {
    read_kind(&state, CatalogKind::Planet, &id).await
}

pub async fn list_people(State(state): State<AppState>) -> Result<Response, AppError> {
    list_kind(&state, CatalogKind::People).await
}

pub async fn read_person(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, AppError> {
    read_kind(&state, CatalogKind::People, &id).await
}

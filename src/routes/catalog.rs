//! Catalog and favorite routes for planets and people.

use crate::handlers::{
    add_favorite_person, add_favorite_planet, list_people, list_planets, read_person, read_planet,
    remove_favorite_person, remove_favorite_planet,
};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn catalog_routes(state: AppState) -> Router {
    Router::new()
        // POST on the collection lists as well.
        .route("/planet", get(list_planets).post(list_planets))
        .route("/planet/:id", get(read_planet))
        .route(
            "/favorite/planet/:id",
            post(add_favorite_planet).delete(remove_favorite_planet),
        )
        .route("/people", get(list_people))
        .route("/people/:id", get(read_person))
        .route(
            "/favorite/people/:id",
            post(add_favorite_person).delete(remove_favorite_person),
        )
        .with_state(state)
}

use crate::handlers::{list_users, user_favorites};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn user_routes(state: AppState) -> Router {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/:id/favorites", get(user_favorites))
        .with_state(state)
}

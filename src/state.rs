//! Shared application state for all routes.

use crate::store::FavoritesStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn FavoritesStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn FavoritesStore>) -> Self {
        Self { store }
    }
}

//! Holocron: REST backend for Star Wars people, planets and user favorites.

pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod seed;
pub mod state;
pub mod store;

pub use app::app;
pub use catalog::CatalogKind;
pub use config::{AppConfig, StoreBackend};
pub use error::{AppError, ConfigError};
pub use models::{Favorites, Person, Planet, User};
pub use routes::{catalog_routes, common_routes, user_routes};
pub use seed::SeedData;
pub use state::AppState;
pub use store::{ensure_database_exists, FavoritesStore, MemoryStore, PgStore};

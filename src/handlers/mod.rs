//! HTTP handlers for the catalog, favorites and users.

pub mod catalog;
pub mod favorites;
pub mod users;
pub use catalog::*;
pub use favorites::{add_favorite_person, add_favorite_planet, remove_favorite_person, remove_favorite_planet};
pub use users::*;

//! Persistence seam: the handlers talk to a `FavoritesStore`, backed by Postgres or memory.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, PgStore};

use crate::catalog::CatalogKind;
use crate::error::AppError;
use crate::models::{CatalogEntry, Favorites, Person, Planet, User};
use async_trait::async_trait;

#[async_trait]
pub trait FavoritesStore: Send + Sync {
    /// Cheap round-trip used by the readiness probe.
    async fn ping(&self) -> Result<(), AppError>;

    async fn list_users(&self) -> Result<Vec<User>, AppError>;
    async fn get_user(&self, id: i32) -> Result<Option<User>, AppError>;

    async fn list_people(&self) -> Result<Vec<Person>, AppError>;
    async fn get_person(&self, id: i32) -> Result<Option<Person>, AppError>;

    async fn list_planets(&self) -> Result<Vec<Planet>, AppError>;
    async fn get_planet(&self, id: i32) -> Result<Option<Planet>, AppError>;

    /// Insert or replace by id.
    async fn upsert_user(&self, user: &User) -> Result<(), AppError>;
    async fn upsert_person(&self, person: &Person) -> Result<(), AppError>;
    async fn upsert_planet(&self, planet: &Planet) -> Result<(), AppError>;

    async fn is_favorite(&self, kind: CatalogKind, user_id: i32, target_id: i32) -> Result<bool, AppError>;

    /// Appends the target to the user's favorites. Returns false if it was already there.
    async fn add_favorite(&self, kind: CatalogKind, user_id: i32, target_id: i32) -> Result<bool, AppError>;

    /// Returns false if the target was not a favorite.
    async fn remove_favorite(&self, kind: CatalogKind, user_id: i32, target_id: i32) -> Result<bool, AppError>;

    async fn favorites(&self, user_id: i32) -> Result<Favorites, AppError>;

    async fn list_entries(&self, kind: CatalogKind) -> Result<Vec<CatalogEntry>, AppError> {
        Ok(match kind {
            CatalogKind::People => self.list_people().await?.into_iter().map(CatalogEntry::Person).collect(),
            CatalogKind::Planet => self.list_planets().await?.into_iter().map(CatalogEntry::Planet).collect(),
        })
    }

    async fn get_entry(&self, kind: CatalogKind, id: i32) -> Result<Option<CatalogEntry>, AppError> {
        Ok(match kind {
            CatalogKind::People => self.get_person(id).await?.map(CatalogEntry::Person),
            CatalogKind::Planet => self.get_planet(id).await?.map(CatalogEntry::Planet),
        })
    }
}

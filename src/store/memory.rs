//! In-memory store for tests and local development.

use super::FavoritesStore;
use crate::catalog::CatalogKind;
use crate::error::AppError;
use crate::models::{Favorites, Person, Planet, User};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    people: BTreeMap<i32, Person>,
    planets: BTreeMap<i32, Planet>,
    /// Per (kind, user) favorite ids in insertion order.
    favorites: HashMap<(CatalogKind, i32), Vec<i32>>,
}

impl Tables {
    fn target_exists(&self, kind: CatalogKind, id: i32) -> bool {
        match kind {
            CatalogKind::People => self.people.contains_key(&id),
            CatalogKind::Planet => self.planets.contains_key(&id),
        }
    }

    fn favorite_ids(&self, kind: CatalogKind, user_id: i32) -> &[i32] {
        self.favorites
            .get(&(kind, user_id))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, AppError> {
        self.tables
            .read()
            .map_err(|_| AppError::Internal("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, AppError> {
        self.tables
            .write()
            .map_err(|_| AppError::Internal("memory store lock poisoned".into()))
    }
}

#[async_trait]
impl FavoritesStore for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        Ok(self.read()?.users.values().cloned().collect())
    }

    async fn get_user(&self, id: i32) -> Result<Option<User>, AppError> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    async fn list_people(&self) -> Result<Vec<Person>, AppError> {
        Ok(self.read()?.people.values().cloned().collect())
    }

    async fn get_person(&self, id: i32) -> Result<Option<Person>, AppError> {
        Ok(self.read()?.people.get(&id).cloned())
    }

    async fn list_planets(&self) -> Result<Vec<Planet>, AppError> {
        Ok(self.read()?.planets.values().cloned().collect())
    }

    async fn get_planet(&self, id: i32) -> Result<Option<Planet>, AppError> {
        Ok(self.read()?.planets.get(&id).cloned())
    }

    async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        self.write()?.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn upsert_person(&self, person: &Person) -> Result<(), AppError> {
        self.write()?.people.insert(person.id, person.clone());
        Ok(())
    }

    async fn upsert_planet(&self, planet: &Planet) -> Result<(), AppError> {
        self.write()?.planets.insert(planet.id, planet.clone());
        Ok(())
    }

    async fn is_favorite(&self, kind: CatalogKind, user_id: i32, target_id: i32) -> Result<bool, AppError> {
        Ok(self.read()?.favorite_ids(kind, user_id).contains(&target_id))
    }

    async fn add_favorite(&self, kind: CatalogKind, user_id: i32, target_id: i32) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        if !tables.users.contains_key(&user_id) {
            return Err(AppError::NotFound(format!("user {} not found", user_id)));
        }
        if !tables.target_exists(kind, target_id) {
            return Err(AppError::NotFound(format!("{} {} not found", kind.label(), target_id)));
        }
        let ids = tables.favorites.entry((kind, user_id)).or_default();
        if ids.contains(&target_id) {
            return Ok(false);
        }
        ids.push(target_id);
        Ok(true)
    }

    async fn remove_favorite(&self, kind: CatalogKind, user_id: i32, target_id: i32) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        let Some(ids) = tables.favorites.get_mut(&(kind, user_id)) else {
            return Ok(false);
        };
        match ids.iter().position(|id| *id == target_id) {
            Some(pos) => {
                ids.remove(pos);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn favorites(&self, user_id: i32) -> Result<Favorites, AppError> {
        let tables = self.read()?;
        Ok(Favorites {
            people: tables
                .favorite_ids(CatalogKind::People, user_id)
                .iter()
                .filter_map(|id| tables.people.get(id).cloned())
                .collect(),
            planets: tables
                .favorite_ids(CatalogKind::Planet, user_id)
                .iter()
                .filter_map(|id| tables.planets.get(id).cloned())
                .collect(),
        })
    }
}

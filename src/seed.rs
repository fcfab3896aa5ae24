//! Load a JSON fixture (users, catalog rows, favorites) into a store.

use crate::catalog::CatalogKind;
use crate::error::{AppError, ConfigError};
use crate::models::{Person, Planet, User};
use crate::store::FavoritesStore;
use serde::Deserialize;
use std::path::Path;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SeedFavorites {
    #[serde(default)]
    pub people: Vec<i32>,
    #[serde(default)]
    pub planets: Vec<i32>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SeedFavorite {
    pub user_id: i32,
    #[serde(flatten)]
    pub items: SeedFavorites,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub planets: Vec<Planet>,
    #[serde(default)]
    pub favorites: Vec<SeedFavorite>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub people: usize,
    pub planets: usize,
    pub favorites_added: usize,
}

impl SeedData {
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(|e| ConfigError::Seed(e.to_string()))
    }

    pub async fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ConfigError::Seed(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&raw)
    }

    /// Upserts rows, then adds favorites. Re-running is harmless: existing favorites are skipped.
    pub async fn apply(&self, store: &dyn FavoritesStore) -> Result<SeedReport, AppError> {
        for user in &self.users {
            store.upsert_user(user).await?;
        }
        for person in &self.people {
            store.upsert_person(person).await?;
        }
        for planet in &self.planets {
            store.upsert_planet(planet).await?;
        }

        let mut favorites_added = 0;
        for fav in &self.favorites {
            if store.get_user(fav.user_id).await?.is_none() {
                return Err(AppError::NotFound(format!("seed favorite: user {} not found", fav.user_id)));
            }
            let by_kind = [
                (CatalogKind::People, &fav.items.people),
                (CatalogKind::Planet, &fav.items.planets),
            ];
            for (kind, ids) in by_kind {
                for id in ids {
                    if store.get_entry(kind, *id).await?.is_none() {
                        return Err(AppError::NotFound(format!(
                            "seed favorite: {} {} not found",
                            kind.label(),
                            id
                        )));
                    }
                    if store.add_favorite(kind, fav.user_id, *id).await? {
                        favorites_added += 1;
                    }
                }
            }
        }

        let report = SeedReport {
            users: self.users.len(),
            people: self.people.len(),
            planets: self.planets.len(),
            favorites_added,
        };
        tracing::info!(?report, "seed applied");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    const FIXTURE: &str = r#"{
        "users": [{"id": 1, "username": "luke", "email": "luke@rebellion.org"}],
        "people": [{"id": 1, "name": "Leia Organa", "gender": "female"}],
        "planets": [{"id": 1, "name": "Alderaan"}, {"id": 2, "name": "Hoth"}],
        "favorites": [{"user_id": 1, "people": [1], "planets": [2]}]
    }"#;

    #[tokio::test]
    async fn applies_fixture_and_is_rerunnable() {
        let store = MemoryStore::new();
        let seed = SeedData::from_json(FIXTURE).unwrap();
        let report = seed.apply(&store).await.unwrap();
        assert_eq!(report.planets, 2);
        assert_eq!(report.favorites_added, 2);

        let again = seed.apply(&store).await.unwrap();
        assert_eq!(again.favorites_added, 0);

        let favs = store.favorites(1).await.unwrap();
        assert_eq!(favs.people[0].name, "Leia Organa");
        assert_eq!(favs.planets[0].name, "Hoth");
    }

    #[tokio::test]
    async fn unknown_favorite_target_fails() {
        let store = MemoryStore::new();
        let seed = SeedData::from_json(
            r#"{"users": [{"id": 1, "username": "han"}], "favorites": [{"user_id": 1, "planets": [5]}]}"#,
        )
        .unwrap();
        let err = seed.apply(&store).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn malformed_json_is_a_seed_error() {
        assert!(matches!(SeedData::from_json("{"), Err(ConfigError::Seed(_))));
    }
}

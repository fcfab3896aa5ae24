//! Persisted entities and their JSON shapes.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// A Star Wars character. Descriptive fields are free-form strings as published by SWAPI.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Person {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub height: Option<String>,
    #[serde(default)]
    pub mass: Option<String>,
    #[serde(default)]
    pub hair_color: Option<String>,
    #[serde(default)]
    pub skin_color: Option<String>,
    #[serde(default)]
    pub eye_color: Option<String>,
    #[serde(default)]
    pub birth_year: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Planet {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub diameter: Option<String>,
    #[serde(default)]
    pub rotation_period: Option<String>,
    #[serde(default)]
    pub orbital_period: Option<String>,
    #[serde(default)]
    pub gravity: Option<String>,
    #[serde(default)]
    pub population: Option<String>,
    #[serde(default)]
    pub climate: Option<String>,
    #[serde(default)]
    pub terrain: Option<String>,
}

/// Either catalog row, as returned by kind-generic store lookups.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CatalogEntry {
    Person(Person),
    Planet(Planet),
}

impl CatalogEntry {
    pub fn id(&self) -> i32 {
        match self {
            CatalogEntry::Person(p) => p.id,
            CatalogEntry::Planet(p) => p.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CatalogEntry::Person(p) => &p.name,
            CatalogEntry::Planet(p) => &p.name,
        }
    }
}

/// A user's favorites, both kinds, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Favorites {
    pub people: Vec<Person>,
    pub planets: Vec<Planet>,
}

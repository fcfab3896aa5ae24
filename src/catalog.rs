//! Catalog kinds: people and planets share one set of handlers and store paths.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    People,
    Planet,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 2] = [CatalogKind::People, CatalogKind::Planet];

    /// Singular label used in client-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            CatalogKind::People => "Person",
            CatalogKind::Planet => "Planet",
        }
    }

    /// Body of the 404 returned when the catalog has no rows.
    pub fn empty_message(self) -> &'static str {
        match self {
            CatalogKind::People => "Sorry! No star wars characters found!",
            CatalogKind::Planet => "Sorry! No star wars planet found!",
        }
    }

    pub fn table(self) -> &'static str {
        match self {
            CatalogKind::People => "people",
            CatalogKind::Planet => "planets",
        }
    }

    pub fn favorites_table(self) -> &'static str {
        match self {
            CatalogKind::People => "favorite_people",
            CatalogKind::Planet => "favorite_planets",
        }
    }

    /// Column in the favorites table referencing the catalog row.
    pub fn target_column(self) -> &'static str {
        match self {
            CatalogKind::People => "person_id",
            CatalogKind::Planet => "planet_id",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

//! Postgres store. All tables live in one schema (`HOLOCRON_SCHEMA`, default `holocron`).

use super::FavoritesStore;
use crate::catalog::CatalogKind;
use crate::error::AppError;
use crate::models::{Favorites, Person, Planet, User};
use async_trait::async_trait;
use sqlx::postgres::PgConnectOptions;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

const USER_COLUMNS: &str = "id, username, email, is_active";
const PERSON_COLUMNS: &str = "id, name, height, mass, hair_color, skin_color, eye_color, birth_year, gender";
const PLANET_COLUMNS: &str =
    "id, name, diameter, rotation_period, orbital_period, gravity, population, climate, terrain";

/// Quote identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    schema: String,
}

impl PgStore {
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        Self {
            pool,
            schema: schema.into(),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Schema-qualified table name (e.g. `"holocron".people`).
    fn table(&self, name: &str) -> String {
        format!("{}.{}", quoted(&self.schema), name)
    }

    /// Create the schema, catalog tables and association tables if they do not exist.
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(&self.schema)))
            .execute(&self.pool)
            .await?;

        let users = self.table("users");
        let people = self.table("people");
        let planets = self.table("planets");
        let ddl = [
            format!(
                r#"
                CREATE TABLE IF NOT EXISTS {} (
                    id INTEGER PRIMARY KEY,
                    username TEXT NOT NULL UNIQUE,
                    email TEXT,
                    is_active BOOLEAN NOT NULL DEFAULT TRUE
                )
                "#,
                users
            ),
            format!(
                r#"
                CREATE TABLE IF NOT EXISTS {} (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL,
                    height TEXT,
                    mass TEXT,
                    hair_color TEXT,
                    skin_color TEXT,
                    eye_color TEXT,
                    birth_year TEXT,
                    gender TEXT
                )
                "#,
                people
            ),
            format!(
                r#"
                CREATE TABLE IF NOT EXISTS {} (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL,
                    diameter TEXT,
                    rotation_period TEXT,
                    orbital_period TEXT,
                    gravity TEXT,
                    population TEXT,
                    climate TEXT,
                    terrain TEXT
                )
                "#,
                planets
            ),
        ];
        for sql in &ddl {
            sqlx::query(sql).execute(&self.pool).await?;
        }

        for kind in CatalogKind::ALL {
            // seq orders favorites by insertion; the composite key rejects duplicates.
            let sql = format!(
                r#"
                CREATE TABLE IF NOT EXISTS {fav} (
                    user_id INTEGER NOT NULL REFERENCES {users}(id) ON DELETE CASCADE,
                    {col} INTEGER NOT NULL REFERENCES {target}(id) ON DELETE CASCADE,
                    seq BIGSERIAL NOT NULL,
                    PRIMARY KEY (user_id, {col})
                )
                "#,
                fav = self.table(kind.favorites_table()),
                users = users,
                col = kind.target_column(),
                target = self.table(kind.table()),
            );
            sqlx::query(&sql).execute(&self.pool).await?;
        }
        tracing::info!(schema = %self.schema, "schema ready");
        Ok(())
    }

    async fn fetch_all<T>(&self, sql: &str) -> Result<Vec<T>, AppError>
    where
        T: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, T>(sql).fetch_all(&self.pool).await?)
    }

    async fn fetch_by_id<T>(&self, sql: &str, id: i32) -> Result<Option<T>, AppError>
    where
        T: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, T>(sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn favorite_rows<T>(&self, kind: CatalogKind, columns: &str, user_id: i32) -> Result<Vec<T>, AppError>
    where
        T: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
    {
        let qualified_cols = columns
            .split(", ")
            .map(|c| format!("t.{}", c))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT {} FROM {} t JOIN {} f ON f.{} = t.id WHERE f.user_id = $1 ORDER BY f.seq",
            qualified_cols,
            self.table(kind.table()),
            self.table(kind.favorites_table()),
            kind.target_column(),
        );
        self.fetch_by_id_many(&sql, user_id).await
    }

    async fn fetch_by_id_many<T>(&self, sql: &str, id: i32) -> Result<Vec<T>, AppError>
    where
        T: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, T>(sql).bind(id).fetch_all(&self.pool).await?)
    }
}

#[async_trait]
impl FavoritesStore for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", USER_COLUMNS, self.table("users"));
        self.fetch_all(&sql).await
    }

    async fn get_user(&self, id: i32) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", USER_COLUMNS, self.table("users"));
        self.fetch_by_id(&sql, id).await
    }

    async fn list_people(&self) -> Result<Vec<Person>, AppError> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", PERSON_COLUMNS, self.table("people"));
        self.fetch_all(&sql).await
    }

    async fn get_person(&self, id: i32) -> Result<Option<Person>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", PERSON_COLUMNS, self.table("people"));
        self.fetch_by_id(&sql, id).await
    }

    async fn list_planets(&self) -> Result<Vec<Planet>, AppError> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", PLANET_COLUMNS, self.table("planets"));
        self.fetch_all(&sql).await
    }

    async fn get_planet(&self, id: i32) -> Result<Option<Planet>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", PLANET_COLUMNS, self.table("planets"));
        self.fetch_by_id(&sql, id).await
    }

    async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        let sql = format!(
            r#"
            INSERT INTO {} ({}) VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET
                username = EXCLUDED.username,
                email = EXCLUDED.email,
                is_active = EXCLUDED.is_active
            "#,
            self.table("users"),
            USER_COLUMNS
        );
        tracing::debug!(sql = %sql, id = user.id, "upsert");
        sqlx::query(&sql)
            .bind(user.id)
            .bind(&user.username)
            .bind(&user.email)
            .bind(user.is_active)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn upsert_person(&self, p: &Person) -> Result<(), AppError> {
        let sql = format!(
            r#"
            INSERT INTO {} ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                height = EXCLUDED.height,
                mass = EXCLUDED.mass,
                hair_color = EXCLUDED.hair_color,
                skin_color = EXCLUDED.skin_color,
                eye_color = EXCLUDED.eye_color,
                birth_year = EXCLUDED.birth_year,
                gender = EXCLUDED.gender
            "#,
            self.table("people"),
            PERSON_COLUMNS
        );
        tracing::debug!(sql = %sql, id = p.id, "upsert");
        sqlx::query(&sql)
            .bind(p.id)
            .bind(&p.name)
            .bind(&p.height)
            .bind(&p.mass)
            .bind(&p.hair_color)
            .bind(&p.skin_color)
            .bind(&p.eye_color)
            .bind(&p.birth_year)
            .bind(&p.gender)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn upsert_planet(&self, p: &Planet) -> Result<(), AppError> {
        let sql = format!(
            r#"
            INSERT INTO {} ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                diameter = EXCLUDED.diameter,
                rotation_period = EXCLUDED.rotation_period,
                orbital_period = EXCLUDED.orbital_period,
                gravity = EXCLUDED.gravity,
                population = EXCLUDED.population,
                climate = EXCLUDED.climate,
                terrain = EXCLUDED.terrain
            "#,
            self.table("planets"),
            PLANET_COLUMNS
        );
        tracing::debug!(sql = %sql, id = p.id, "upsert");
        sqlx::query(&sql)
            .bind(p.id)
            .bind(&p.name)
            .bind(&p.diameter)
            .bind(&p.rotation_period)
            .bind(&p.orbital_period)
            .bind(&p.gravity)
            .bind(&p.population)
            .bind(&p.climate)
            .bind(&p.terrain)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn is_favorite(&self, kind: CatalogKind, user_id: i32, target_id: i32) -> Result<bool, AppError> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE user_id = $1 AND {} = $2)",
            self.table(kind.favorites_table()),
            kind.target_column()
        );
        tracing::debug!(sql = %sql, user_id, target_id, "query");
        let (exists,): (bool,) = sqlx::query_as(&sql)
            .bind(user_id)
            .bind(target_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn add_favorite(&self, kind: CatalogKind, user_id: i32, target_id: i32) -> Result<bool, AppError> {
        let sql = format!(
            "INSERT INTO {} (user_id, {}) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            self.table(kind.favorites_table()),
            kind.target_column()
        );
        tracing::debug!(sql = %sql, user_id, target_id, "insert");
        let result = sqlx::query(&sql)
            .bind(user_id)
            .bind(target_id)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                    AppError::NotFound(format!("{} or user not found", kind.label()))
                }
                other => AppError::Db(other),
            })?;
        Ok(result.rows_affected() == 1)
    }

    async fn remove_favorite(&self, kind: CatalogKind, user_id: i32, target_id: i32) -> Result<bool, AppError> {
        let sql = format!(
            "DELETE FROM {} WHERE user_id = $1 AND {} = $2",
            self.table(kind.favorites_table()),
            kind.target_column()
        );
        tracing::debug!(sql = %sql, user_id, target_id, "delete");
        let result = sqlx::query(&sql)
            .bind(user_id)
            .bind(target_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn favorites(&self, user_id: i32) -> Result<Favorites, AppError> {
        Ok(Favorites {
            people: self.favorite_rows(CatalogKind::People, PERSON_COLUMNS, user_id).await?,
            planets: self.favorite_rows(CatalogKind::Planet, PLANET_COLUMNS, user_id).await?,
        })
    }
}

/// Connect to the server's `postgres` database and create the target database if missing.
/// URLs without a database path (or naming `postgres` itself) need no creation.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let Some((admin, db_name)) = maintenance_target(database_url)? else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Options for the `postgres` maintenance database on the same server, plus the database to create.
fn maintenance_target(database_url: &str) -> Result<Option<(PgConnectOptions, String)>, AppError> {
    let opts = PgConnectOptions::from_str(database_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let db_name = match opts.get_database() {
        Some(name) if !name.is_empty() && name != "postgres" => name.to_string(),
        _ => return Ok(None),
    };
    Ok(Some((opts.database("postgres"), db_name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_database_named_in_path() {
        let (admin, name) = maintenance_target("postgres://u:p@localhost:5432/holocron?sslmode=disable")
            .unwrap()
            .unwrap();
        assert_eq!(name, "holocron");
        assert_eq!(admin.get_database(), Some("postgres"));
        assert_eq!(admin.get_host(), "localhost");
        assert_eq!(admin.get_port(), 5432);
    }

    #[test]
    fn url_without_database_path_keeps_host() {
        // Without a path the name falls back to PGDATABASE; the authority is never mistaken for it.
        let fallback = std::env::var("PGDATABASE").ok().filter(|d| !d.is_empty() && d != "postgres");
        for url in ["postgres://localhost", "postgres://u:p@db:5432", "postgres://localhost/"] {
            let target = maintenance_target(url).unwrap();
            assert_eq!(target.as_ref().map(|(_, name)| name.clone()), fallback, "{}", url);
            if let Some((admin, _)) = target {
                assert_ne!(admin.get_host(), "postgres", "{}", url);
            }
        }
    }

    #[test]
    fn maintenance_database_is_skipped() {
        assert!(maintenance_target("postgres://localhost/postgres").unwrap().is_none());
    }

    #[test]
    fn rejects_unparseable_url() {
        assert!(matches!(maintenance_target("::not a url::"), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quoted("holo\"cron"), "\"holo\"\"cron\"");
    }
}

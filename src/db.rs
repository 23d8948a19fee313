use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;
use tracing::{debug, info};

use crate::geo::Coordinate;

/// Film genres recognized by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Genre {
    Comedy,
    Action,
}

impl Genre {
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Comedy => "comedy",
            Genre::Action => "action",
        }
    }
}

/// Represents a film in the read-only catalog
#[derive(Debug, Clone, PartialEq)]
pub struct Film {
    pub uuid: String,
    pub name: String,
    pub genre: String,
    pub year: i32,
    pub rate: f64,
    pub length: String,
    pub country: String,
    pub picture: String,
    pub link: String,
    pub cinemas: Vec<String>,
}

/// Represents a cinema in the read-only catalog
#[derive(Debug, Clone, PartialEq)]
pub struct Cinema {
    pub uuid: String,
    pub name: String,
    pub url: String,
    pub location: Coordinate,
    pub films: Vec<String>,
}

/// Represents a user's favorites record
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub telegram_id: i64,
    pub films: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Initialize the database schema
pub async fn init_database_schema(pool: &PgPool) -> Result<()> {
    info!("Initializing database schema");

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS films (
            uuid TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            genre TEXT NOT NULL,
            year INTEGER NOT NULL,
            rate DOUBLE PRECISION NOT NULL,
            length TEXT NOT NULL,
            country TEXT NOT NULL,
            picture TEXT NOT NULL,
            link TEXT NOT NULL,
            cinemas TEXT[] NOT NULL DEFAULT '{}'
        )",
    )
    .execute(pool)
    .await
    .context("Failed to create films table")?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS cinemas (
            uuid TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            url TEXT NOT NULL,
            latitude DOUBLE PRECISION NOT NULL,
            longitude DOUBLE PRECISION NOT NULL,
            films TEXT[] NOT NULL DEFAULT '{}'
        )",
    )
    .execute(pool)
    .await
    .context("Failed to create cinemas table")?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            telegram_id BIGINT UNIQUE NOT NULL,
            films TEXT[] NOT NULL DEFAULT '{}',
            created_at TIMESTAMPTZ DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMPTZ DEFAULT CURRENT_TIMESTAMP
        )",
    )
    .execute(pool)
    .await
    .context("Failed to create users table")?;

    sqlx::query("CREATE INDEX IF NOT EXISTS films_genre_idx ON films(genre)")
        .execute(pool)
        .await
        .context("Failed to create films genre index")?;

    info!("Database schema initialized successfully");
    Ok(())
}

fn film_from_row(row: &PgRow) -> Film {
    Film {
        uuid: row.get(0),
        name: row.get(1),
        genre: row.get(2),
        year: row.get(3),
        rate: row.get(4),
        length: row.get(5),
        country: row.get(6),
        picture: row.get(7),
        link: row.get(8),
        cinemas: row.get(9),
    }
}

fn cinema_from_row(row: &PgRow) -> Cinema {
    Cinema {
        uuid: row.get(0),
        name: row.get(1),
        url: row.get(2),
        location: Coordinate::new(row.get(3), row.get(4)),
        films: row.get(5),
    }
}

/// List the whole film catalog
pub async fn find_all_films(pool: &PgPool) -> Result<Vec<Film>> {
    let rows = sqlx::query(
        "SELECT uuid, name, genre, year, rate, length, country, picture, link, cinemas
         FROM films ORDER BY name",
    )
    .fetch_all(pool)
    .await
    .context("Failed to list films")?;

    Ok(rows.iter().map(film_from_row).collect())
}

/// List films of a given genre
pub async fn find_films_by_genre(pool: &PgPool, genre: Genre) -> Result<Vec<Film>> {
    debug!(genre = %genre.as_str(), "Listing films by genre");

    let rows = sqlx::query(
        "SELECT uuid, name, genre, year, rate, length, country, picture, link, cinemas
         FROM films WHERE genre = $1 ORDER BY name",
    )
    .bind(genre.as_str())
    .fetch_all(pool)
    .await
    .context("Failed to list films by genre")?;

    Ok(rows.iter().map(film_from_row).collect())
}

/// Pick one film at random from the catalog
pub async fn find_random_film(pool: &PgPool) -> Result<Option<Film>> {
    let row = sqlx::query(
        "SELECT uuid, name, genre, year, rate, length, country, picture, link, cinemas
         FROM films ORDER BY RANDOM() LIMIT 1",
    )
    .fetch_optional(pool)
    .await
    .context("Failed to pick a random film")?;

    Ok(row.as_ref().map(film_from_row))
}

/// Look a film up by its opaque identifier
pub async fn find_film_by_uuid(pool: &PgPool, uuid: &str) -> Result<Option<Film>> {
    debug!(uuid = %uuid, "Looking up film");

    let row = sqlx::query(
        "SELECT uuid, name, genre, year, rate, length, country, picture, link, cinemas
         FROM films WHERE uuid = $1",
    )
    .bind(uuid)
    .fetch_optional(pool)
    .await
    .context("Failed to look up film")?;

    Ok(row.as_ref().map(film_from_row))
}

/// List the films matching a set of identifiers; misses are silently skipped
pub async fn find_films_by_uuids(pool: &PgPool, uuids: &[String]) -> Result<Vec<Film>> {
    if uuids.is_empty() {
        return Ok(Vec::new());
    }

    let rows = sqlx::query(
        "SELECT uuid, name, genre, year, rate, length, country, picture, link, cinemas
         FROM films WHERE uuid = ANY($1) ORDER BY name",
    )
    .bind(uuids)
    .fetch_all(pool)
    .await
    .context("Failed to list films by uuids")?;

    Ok(rows.iter().map(film_from_row).collect())
}

/// List the whole cinema catalog
pub async fn find_all_cinemas(pool: &PgPool) -> Result<Vec<Cinema>> {
    let rows = sqlx::query(
        "SELECT uuid, name, url, latitude, longitude, films FROM cinemas ORDER BY name",
    )
    .fetch_all(pool)
    .await
    .context("Failed to list cinemas")?;

    Ok(rows.iter().map(cinema_from_row).collect())
}

/// Look a cinema up by its opaque identifier
pub async fn find_cinema_by_uuid(pool: &PgPool, uuid: &str) -> Result<Option<Cinema>> {
    debug!(uuid = %uuid, "Looking up cinema");

    let row = sqlx::query(
        "SELECT uuid, name, url, latitude, longitude, films FROM cinemas WHERE uuid = $1",
    )
    .bind(uuid)
    .fetch_optional(pool)
    .await
    .context("Failed to look up cinema")?;

    Ok(row.as_ref().map(cinema_from_row))
}

/// List the cinemas matching a set of identifiers; misses are silently skipped
pub async fn find_cinemas_by_uuids(pool: &PgPool, uuids: &[String]) -> Result<Vec<Cinema>> {
    if uuids.is_empty() {
        return Ok(Vec::new());
    }

    let rows = sqlx::query(
        "SELECT uuid, name, url, latitude, longitude, films
         FROM cinemas WHERE uuid = ANY($1) ORDER BY name",
    )
    .bind(uuids)
    .fetch_all(pool)
    .await
    .context("Failed to list cinemas by uuids")?;

    Ok(rows.iter().map(cinema_from_row).collect())
}

/// Get a user's favorites record by Telegram ID
pub async fn find_user(pool: &PgPool, telegram_id: i64) -> Result<Option<User>> {
    debug!(telegram_id = %telegram_id, "Getting user by telegram_id");

    let row = sqlx::query(
        "SELECT id, telegram_id, films, created_at, updated_at FROM users WHERE telegram_id = $1",
    )
    .bind(telegram_id)
    .fetch_optional(pool)
    .await
    .context("Failed to get user by telegram_id")?;

    match row {
        Some(row) => {
            let user = User {
                id: row.get(0),
                telegram_id: row.get(1),
                films: row.get(2),
                created_at: row.get(3),
                updated_at: row.get(4),
            };
            debug!(user_id = %user.id, "User found");
            Ok(Some(user))
        }
        None => {
            debug!(telegram_id = %telegram_id, "No user found");
            Ok(None)
        }
    }
}

/// Insert or replace a user's favorites record
pub async fn upsert_user(pool: &PgPool, telegram_id: i64, films: &[String]) -> Result<User> {
    debug!(telegram_id = %telegram_id, favorites = films.len(), "Upserting user");

    let row = sqlx::query(
        "INSERT INTO users (telegram_id, films) VALUES ($1, $2)
         ON CONFLICT (telegram_id)
         DO UPDATE SET films = EXCLUDED.films, updated_at = CURRENT_TIMESTAMP
         RETURNING id, telegram_id, films, created_at, updated_at",
    )
    .bind(telegram_id)
    .bind(films)
    .fetch_one(pool)
    .await
    .context("Failed to upsert user")?;

    Ok(User {
        id: row.get(0),
        telegram_id: row.get(1),
        films: row.get(2),
        created_at: row.get(3),
        updated_at: row.get(4),
    })
}

/// Apply a favorite toggle to a favorite set.
///
/// Both directions are idempotent: removing an absent id is a no-op and adding
/// never introduces a duplicate.
pub fn apply_favorite_toggle(
    mut films: Vec<String>,
    film_uuid: &str,
    was_favorite: bool,
) -> Vec<String> {
    if was_favorite {
        films.retain(|uuid| uuid != film_uuid);
    } else if !films.iter().any(|uuid| uuid == film_uuid) {
        films.push(film_uuid.to_string());
    }
    films
}

/// Toggle a film in a user's favorite set and persist the result.
///
/// The user record is created lazily on first toggle. Concurrent toggles for
/// the same user are last-write-wins; the store offers no stronger guarantee.
pub async fn toggle_favorite(
    pool: &PgPool,
    telegram_id: i64,
    film_uuid: &str,
    was_favorite: bool,
) -> Result<User> {
    let current = find_user(pool, telegram_id)
        .await?
        .map(|user| user.films)
        .unwrap_or_default();

    let updated = apply_favorite_toggle(current, film_uuid, was_favorite);
    upsert_user(pool, telegram_id, &updated).await
}

/// Insert or replace a catalog film (seed tool only)
pub async fn upsert_film(pool: &PgPool, film: &Film) -> Result<()> {
    sqlx::query(
        "INSERT INTO films (uuid, name, genre, year, rate, length, country, picture, link, cinemas)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
         ON CONFLICT (uuid) DO UPDATE SET
            name = EXCLUDED.name,
            genre = EXCLUDED.genre,
            year = EXCLUDED.year,
            rate = EXCLUDED.rate,
            length = EXCLUDED.length,
            country = EXCLUDED.country,
            picture = EXCLUDED.picture,
            link = EXCLUDED.link,
            cinemas = EXCLUDED.cinemas",
    )
    .bind(&film.uuid)
    .bind(&film.name)
    .bind(&film.genre)
    .bind(film.year)
    .bind(film.rate)
    .bind(&film.length)
    .bind(&film.country)
    .bind(&film.picture)
    .bind(&film.link)
    .bind(&film.cinemas)
    .execute(pool)
    .await
    .context("Failed to upsert film")?;

    Ok(())
}

/// Insert or replace a catalog cinema (seed tool only)
pub async fn upsert_cinema(pool: &PgPool, cinema: &Cinema) -> Result<()> {
    sqlx::query(
        "INSERT INTO cinemas (uuid, name, url, latitude, longitude, films)
         VALUES ($1, $2, $3, $4, $5, $6)
         ON CONFLICT (uuid) DO UPDATE SET
            name = EXCLUDED.name,
            url = EXCLUDED.url,
            latitude = EXCLUDED.latitude,
            longitude = EXCLUDED.longitude,
            films = EXCLUDED.films",
    )
    .bind(&cinema.uuid)
    .bind(&cinema.name)
    .bind(&cinema.url)
    .bind(cinema.location.latitude)
    .bind(cinema.location.longitude)
    .bind(&cinema.films)
    .execute(pool)
    .await
    .context("Failed to upsert cinema")?;

    Ok(())
}

//! Out-of-band catalog seeding tool.
//!
//! Reads a JSON catalog document of the shape
//! `{"films": [...], "cinemas": [...]}` and upserts every row, so re-running
//! against an already-seeded database is safe.
//!
//! Usage: `cargo run --bin seed_catalog -- catalog.json`

use anyhow::{Context, Result};
use cinescope::db;
use cinescope::geo::Coordinate;
use serde::Deserialize;
use sqlx::postgres::PgPool;
use std::env;
use std::fs;
use tracing::info;

#[derive(Debug, Deserialize)]
struct SeedFilm {
    uuid: String,
    name: String,
    #[serde(rename = "type")]
    genre: String,
    year: i32,
    rate: f64,
    length: String,
    country: String,
    picture: String,
    link: String,
    #[serde(default)]
    cinemas: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SeedCinema {
    uuid: String,
    name: String,
    url: String,
    location: Coordinate,
    #[serde(default)]
    films: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    films: Vec<SeedFilm>,
    cinemas: Vec<SeedCinema>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().init();

    let path = env::args().nth(1).unwrap_or_else(|| "catalog.json".to_string());
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read catalog document '{}'", path))?;
    let catalog: CatalogDocument =
        serde_json::from_str(&raw).context("Failed to parse catalog document")?;

    // Only the database half of the configuration is needed here
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url).await?;
    db::init_database_schema(&pool).await?;

    for film in &catalog.films {
        db::upsert_film(
            &pool,
            &db::Film {
                uuid: film.uuid.clone(),
                name: film.name.clone(),
                genre: film.genre.clone(),
                year: film.year,
                rate: film.rate,
                length: film.length.clone(),
                country: film.country.clone(),
                picture: film.picture.clone(),
                link: film.link.clone(),
                cinemas: film.cinemas.clone(),
            },
        )
        .await?;
    }

    for cinema in &catalog.cinemas {
        db::upsert_cinema(
            &pool,
            &db::Cinema {
                uuid: cinema.uuid.clone(),
                name: cinema.name.clone(),
                url: cinema.url.clone(),
                location: cinema.location,
                films: cinema.films.clone(),
            },
        )
        .await?;
    }

    info!(
        films = catalog.films.len(),
        cinemas = catalog.cinemas.len(),
        "Catalog seeded"
    );

    Ok(())
}

//! UI Builder module: formats catalog data into message text and keyboards.
//!
//! Every function here is a pure construction over already-fetched data; the
//! handlers own the sending.

use anyhow::Result;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use url::Url;

use crate::actions::ActionPayload;
use crate::db::{Cinema, Film};
use crate::geo::RankedCinema;
use crate::localization::{t_args_lang, t_lang, LocalizationManager};

/// Format films as a numbered list with /f references.
///
/// An empty list renders an empty body; only the favorites view has dedicated
/// empty-state copy.
pub fn format_film_list(films: &[Film]) -> String {
    films
        .iter()
        .enumerate()
        .map(|(i, film)| format!("<b>{}</b>. {} - /f{}", i + 1, film.name, film.uuid))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format cinemas as a numbered list with /c references
pub fn format_cinema_list(cinemas: &[Cinema]) -> String {
    cinemas
        .iter()
        .enumerate()
        .map(|(i, cinema)| format!("<b>{}</b>. {} - /c{}", i + 1, cinema.name, cinema.uuid))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a user's favorite films, or the dedicated empty-state copy
pub fn format_favorite_films(
    films: &[Film],
    language_code: Option<&str>,
    localization: &LocalizationManager,
) -> String {
    if films.is_empty() {
        return t_lang(localization, "favorites-empty", language_code);
    }

    let lines = films
        .iter()
        .map(|film| format!("{} - <b>{}</b> (/f{})", film.name, film.rate, film.uuid))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "<b>{}</b>\n{}",
        t_lang(localization, "favorites-title", language_code),
        lines
    )
}

/// Format the detail caption shown under a film's picture
pub fn format_film_caption(
    film: &Film,
    language_code: Option<&str>,
    localization: &LocalizationManager,
) -> String {
    let year = film.year.to_string();
    let rate = film.rate.to_string();
    t_args_lang(
        localization,
        "film-caption",
        &[
            ("name", &film.name),
            ("year", &year),
            ("rate", &rate),
            ("length", &film.length),
            ("country", &film.country),
        ],
        language_code,
    )
}

/// Format distance-ranked cinemas, nearest first.
///
/// Distance is rendered in whole kilometers (truncating division), matching
/// the catalog's historical display.
pub fn format_nearby_cinemas(
    ranked: &[RankedCinema],
    language_code: Option<&str>,
    localization: &LocalizationManager,
) -> String {
    ranked
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let index = (i + 1).to_string();
            let distance = entry.distance_km().to_string();
            t_args_lang(
                localization,
                "nearby-line",
                &[
                    ("index", &index),
                    ("name", &entry.cinema.name),
                    ("distance", &distance),
                    ("uuid", &entry.cinema.uuid),
                ],
                language_code,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Inline keyboard for a film detail message: favorite toggle, cinema list,
/// and an external link row
pub fn create_film_detail_keyboard(
    film: &Film,
    is_favorite: bool,
    language_code: Option<&str>,
    localization: &LocalizationManager,
) -> Result<InlineKeyboardMarkup> {
    let fav_key = if is_favorite { "fav-remove" } else { "fav-add" };

    let toggle_payload = ActionPayload::FilmToggleFav {
        film_uuid: film.uuid.clone(),
        is_fav: is_favorite,
    }
    .encode()?;

    let cinemas_payload = ActionPayload::FilmCinemas {
        film_uuid: film.uuid.clone(),
    }
    .encode()?;

    let link = Url::parse(&film.link)?;

    Ok(InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::callback(t_lang(localization, fav_key, language_code), toggle_payload),
            InlineKeyboardButton::callback(
                t_lang(localization, "show-cinemas", language_code),
                cinemas_payload,
            ),
        ],
        vec![InlineKeyboardButton::url(
            t_args_lang(localization, "film-link-label", &[("name", &film.name)], language_code),
            link,
        )],
    ]))
}

/// Inline keyboard for a cinema detail message: site link, map share, and the
/// cinema's film list
pub fn create_cinema_detail_keyboard(
    cinema: &Cinema,
    language_code: Option<&str>,
    localization: &LocalizationManager,
) -> Result<InlineKeyboardMarkup> {
    let location_payload = ActionPayload::CinemaLocation {
        lat: cinema.location.latitude,
        lon: cinema.location.longitude,
    }
    .encode()?;

    let films_payload = ActionPayload::CinemaFilms {
        cinema_uuid: cinema.uuid.clone(),
    }
    .encode()?;

    let site = Url::parse(&cinema.url)?;

    Ok(InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::url(cinema.name.clone(), site),
            InlineKeyboardButton::callback(
                t_lang(localization, "show-on-map", language_code),
                location_payload,
            ),
        ],
        vec![InlineKeyboardButton::callback(
            t_lang(localization, "show-films", language_code),
            films_payload,
        )],
    ]))
}

/// Single external-link keyboard attached to inline-query results
pub fn create_film_link_keyboard(
    film: &Film,
    language_code: Option<&str>,
    localization: &LocalizationManager,
) -> Result<InlineKeyboardMarkup> {
    let link = Url::parse(&film.link)?;

    Ok(InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::url(
            t_args_lang(localization, "film-link-label", &[("name", &film.name)], language_code),
            link,
        ),
    ]]))
}

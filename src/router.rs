//! # Conversation Router
//!
//! Maps each inbound event to one of a fixed set of intents. Classification is
//! pure: no store access, no transport calls, so the whole table is testable
//! in isolation.
//!
//! Precedence: a shared location wins over any accompanying text, callback
//! payloads are decoded next, and plain text is matched last against the
//! slash-command patterns and the static menu-label table. Anything
//! unrecognized is a no-op.

use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

use crate::actions::ActionPayload;
use crate::db::Genre;
use crate::geo::Coordinate;
use crate::keyboards::labels;

/// Normalized classification of an inbound event
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    ShowHome,
    ShowGenreMenu,
    ShowFilmsByGenre(Genre),
    ShowRandomFilm,
    ShowCinemaMenu,
    ShowFavorites,
    NavigateBack,
    ShowFilmDetail(String),
    ShowCinemaDetail(String),
    NearbyCinemas(Coordinate),
    ToggleFavorite {
        film_uuid: String,
        currently_favorite: bool,
    },
    ShowCinemasForFilm(String),
    ShowFilmsForCinema(String),
    ShowLocation(Coordinate),
    /// Unrecognized input; silently ignored
    Ignore,
}

/// Inbound event shape as received from the transport
#[derive(Debug, Clone, Default)]
pub struct InboundEvent {
    pub chat_id: i64,
    pub from_user_id: i64,
    pub text: Option<String>,
    pub location: Option<Coordinate>,
    pub callback_data: Option<String>,
}

/// Menu-label table: reply-keyboard label to navigation intent
static MENU_TABLE: &[(&str, Intent)] = &[
    (labels::FILMS, Intent::ShowGenreMenu),
    (labels::CINEMAS, Intent::ShowCinemaMenu),
    (labels::FAVORITES, Intent::ShowFavorites),
    (labels::BACK, Intent::NavigateBack),
    (labels::COMEDY, Intent::ShowFilmsByGenre(Genre::Comedy)),
    (labels::ACTION, Intent::ShowFilmsByGenre(Genre::Action)),
    (labels::RANDOM, Intent::ShowRandomFilm),
];

static FILM_COMMAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/f(.+)$").expect("film command pattern"));
static CINEMA_COMMAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/c(.+)$").expect("cinema command pattern"));

/// Classify an inbound event into an [`Intent`]
pub fn route(event: &InboundEvent) -> Intent {
    if let Some(coordinate) = event.location {
        return Intent::NearbyCinemas(coordinate);
    }

    if let Some(data) = &event.callback_data {
        return route_callback(data, event.from_user_id);
    }

    if let Some(text) = &event.text {
        return route_text(text);
    }

    Intent::Ignore
}

fn route_callback(data: &str, from_user_id: i64) -> Intent {
    match ActionPayload::decode(data) {
        Ok(ActionPayload::CinemaFilms { cinema_uuid }) => Intent::ShowFilmsForCinema(cinema_uuid),
        Ok(ActionPayload::FilmCinemas { film_uuid }) => Intent::ShowCinemasForFilm(film_uuid),
        Ok(ActionPayload::CinemaLocation { lat, lon }) => {
            Intent::ShowLocation(Coordinate::new(lat, lon))
        }
        Ok(ActionPayload::FilmToggleFav { film_uuid, is_fav }) => Intent::ToggleFavorite {
            film_uuid,
            currently_favorite: is_fav,
        },
        Err(e) => {
            warn!(error = %e, user_id = %from_user_id, "Unrecognized callback payload");
            Intent::Ignore
        }
    }
}

fn route_text(text: &str) -> Intent {
    if text == "/start" {
        return Intent::ShowHome;
    }

    for (label, intent) in MENU_TABLE {
        if text == *label {
            return intent.clone();
        }
    }

    // The embedded id is opaque: extracted as-is and validated only by the
    // store lookup, which reports not-found for garbage input.
    if let Some(captures) = FILM_COMMAND.captures(text) {
        return Intent::ShowFilmDetail(captures[1].to_string());
    }

    if let Some(captures) = CINEMA_COMMAND.captures(text) {
        return Intent::ShowCinemaDetail(captures[1].to_string());
    }

    Intent::Ignore
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_event(text: &str) -> InboundEvent {
        InboundEvent {
            chat_id: 1,
            from_user_id: 1,
            text: Some(text.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_every_menu_label_routes() {
        for (label, intent) in MENU_TABLE {
            assert_eq!(route(&text_event(label)), intent.clone());
        }
    }

    #[test]
    fn test_location_wins_over_text() {
        let mut event = text_event(labels::FILMS);
        event.location = Some(Coordinate::new(55.75, 37.61));

        assert_eq!(
            route(&event),
            Intent::NearbyCinemas(Coordinate::new(55.75, 37.61))
        );
    }
}

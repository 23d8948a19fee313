use cinescope::actions::ActionPayload;
use cinescope::db::Genre;
use cinescope::geo::Coordinate;
use cinescope::keyboards::labels;
use cinescope::router::{route, InboundEvent, Intent};

fn text_event(text: &str) -> InboundEvent {
    InboundEvent {
        chat_id: 100,
        from_user_id: 7,
        text: Some(text.to_string()),
        ..Default::default()
    }
}

fn callback_event(data: &str) -> InboundEvent {
    InboundEvent {
        chat_id: 100,
        from_user_id: 7,
        callback_data: Some(data.to_string()),
        ..Default::default()
    }
}

#[test]
fn test_start_command_routes_home() {
    assert_eq!(route(&text_event("/start")), Intent::ShowHome);
}

#[test]
fn test_menu_labels_route_to_navigation_intents() {
    assert_eq!(route(&text_event(labels::FILMS)), Intent::ShowGenreMenu);
    assert_eq!(route(&text_event(labels::CINEMAS)), Intent::ShowCinemaMenu);
    assert_eq!(route(&text_event(labels::FAVORITES)), Intent::ShowFavorites);
    assert_eq!(route(&text_event(labels::BACK)), Intent::NavigateBack);
    assert_eq!(
        route(&text_event(labels::COMEDY)),
        Intent::ShowFilmsByGenre(Genre::Comedy)
    );
    assert_eq!(
        route(&text_event(labels::ACTION)),
        Intent::ShowFilmsByGenre(Genre::Action)
    );
    assert_eq!(route(&text_event(labels::RANDOM)), Intent::ShowRandomFilm);
}

#[test]
fn test_film_command_extracts_opaque_id() {
    assert_eq!(
        route(&text_event("/fabc123")),
        Intent::ShowFilmDetail("abc123".to_string())
    );
}

#[test]
fn test_cinema_command_extracts_opaque_id() {
    assert_eq!(
        route(&text_event("/c7fe0a9c")),
        Intent::ShowCinemaDetail("7fe0a9c".to_string())
    );
}

#[test]
fn test_bare_slash_commands_are_ignored() {
    // No id suffix means no detail lookup
    assert_eq!(route(&text_event("/f")), Intent::Ignore);
    assert_eq!(route(&text_event("/c")), Intent::Ignore);
}

#[test]
fn test_unmatched_text_is_ignored() {
    assert_eq!(route(&text_event("hello there")), Intent::Ignore);
    assert_eq!(route(&text_event("films")), Intent::Ignore); // labels match exactly
}

#[test]
fn test_empty_event_is_ignored() {
    assert_eq!(route(&InboundEvent::default()), Intent::Ignore);
}

#[test]
fn test_location_routes_to_nearby_cinemas() {
    let event = InboundEvent {
        chat_id: 100,
        from_user_id: 7,
        location: Some(Coordinate::new(53.902284, 27.561831)),
        ..Default::default()
    };

    assert_eq!(
        route(&event),
        Intent::NearbyCinemas(Coordinate::new(53.902284, 27.561831))
    );
}

#[test]
fn test_location_takes_precedence_over_text() {
    let event = InboundEvent {
        chat_id: 100,
        from_user_id: 7,
        text: Some(labels::FAVORITES.to_string()),
        location: Some(Coordinate::new(1.0, 2.0)),
        ..Default::default()
    };

    assert_eq!(route(&event), Intent::NearbyCinemas(Coordinate::new(1.0, 2.0)));
}

#[test]
fn test_toggle_payload_routes_to_toggle_intent() {
    let data = ActionPayload::FilmToggleFav {
        film_uuid: "f1".to_string(),
        is_fav: true,
    }
    .encode()
    .unwrap();

    assert_eq!(
        route(&callback_event(&data)),
        Intent::ToggleFavorite {
            film_uuid: "f1".to_string(),
            currently_favorite: true,
        }
    );
}

#[test]
fn test_cinema_films_payload_routes_to_film_list() {
    let data = ActionPayload::CinemaFilms {
        cinema_uuid: "c1".to_string(),
    }
    .encode()
    .unwrap();

    assert_eq!(
        route(&callback_event(&data)),
        Intent::ShowFilmsForCinema("c1".to_string())
    );
}

#[test]
fn test_film_cinemas_payload_routes_to_cinema_list() {
    let data = ActionPayload::FilmCinemas {
        film_uuid: "f1".to_string(),
    }
    .encode()
    .unwrap();

    assert_eq!(
        route(&callback_event(&data)),
        Intent::ShowCinemasForFilm("f1".to_string())
    );
}

#[test]
fn test_location_payload_routes_to_location_share() {
    let data = ActionPayload::CinemaLocation {
        lat: 55.747586,
        lon: 37.575216,
    }
    .encode()
    .unwrap();

    assert_eq!(
        route(&callback_event(&data)),
        Intent::ShowLocation(Coordinate::new(55.747586, 37.575216))
    );
}

#[test]
fn test_malformed_callback_degrades_to_noop() {
    assert_eq!(route(&callback_event("not json")), Intent::Ignore);
    assert_eq!(route(&callback_event(r#"{"type":"unknown"}"#)), Intent::Ignore);
    assert_eq!(route(&callback_event("")), Intent::Ignore);
}

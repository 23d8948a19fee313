//! Keyboard layout config: menu labels and the reply keyboards built from them.
//!
//! Labels are the routing surface for plain-text messages, so they are static
//! (not localized); the router matches incoming text against them exactly.

use teloxide::types::{ButtonRequest, KeyboardButton, KeyboardMarkup};

/// Literal menu labels shown on reply keyboards
pub mod labels {
    pub const FILMS: &str = "Films";
    pub const CINEMAS: &str = "Cinemas";
    pub const FAVORITES: &str = "Favourites";
    pub const BACK: &str = "Back";
    pub const COMEDY: &str = "Comedy";
    pub const ACTION: &str = "Action";
    pub const RANDOM: &str = "Random";
    pub const SEND_LOCATION: &str = "Send location";
}

/// Home menu: film browsing, cinema lookup, favorites
pub fn home_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![
            KeyboardButton::new(labels::FILMS),
            KeyboardButton::new(labels::CINEMAS),
        ],
        vec![KeyboardButton::new(labels::FAVORITES)],
    ])
}

/// Genre menu shown after picking "Films"
pub fn films_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![
            KeyboardButton::new(labels::COMEDY),
            KeyboardButton::new(labels::ACTION),
        ],
        vec![
            KeyboardButton::new(labels::RANDOM),
            KeyboardButton::new(labels::BACK),
        ],
    ])
}

/// Cinema menu: location share plus back navigation
pub fn cinemas_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![KeyboardButton::new(labels::SEND_LOCATION).request(ButtonRequest::Location)],
        vec![KeyboardButton::new(labels::BACK)],
    ])
}

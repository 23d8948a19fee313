//! # Action Codec
//!
//! Callback buttons carry a compact JSON payload identifying the action to
//! replay when the user presses them. Payloads are a closed tagged variant:
//! decoding never panics, and malformed input degrades to a [`DecodeError`]
//! value that the router maps to a no-op.
//!
//! Wire tags are intentionally short to stay well inside Telegram's 64-byte
//! callback-data limit.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Typed payload embedded in an inline keyboard button
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ActionPayload {
    /// Show the films screened at a cinema
    #[serde(rename = "cfs")]
    CinemaFilms { cinema_uuid: String },
    /// Show the cinemas screening a film
    #[serde(rename = "fcs")]
    FilmCinemas { film_uuid: String },
    /// Share a cinema's coordinate as a location message
    #[serde(rename = "cl")]
    CinemaLocation { lat: f64, lon: f64 },
    /// Toggle a film in the user's favorites
    #[serde(rename = "ftf")]
    FilmToggleFav { film_uuid: String, is_fav: bool },
}

/// Decode failure for a callback payload; a value, not a raised fault
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeError {
    reason: String,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid action payload: {}", self.reason)
    }
}

impl std::error::Error for DecodeError {}

impl ActionPayload {
    /// Serialize the payload for callback data.
    ///
    /// Deterministic and lossless; `decode(encode(x)) == x` for every value.
    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse callback data back into a typed payload
    pub fn decode(data: &str) -> Result<ActionPayload, DecodeError> {
        serde_json::from_str(data).map_err(|e| DecodeError {
            reason: e.to_string(),
        })
    }
}

//! # Cinescope Telegram Bot
//!
//! A Telegram bot for browsing a film and cinema catalog, finding nearby
//! cinemas by location, and keeping a per-user favorites list.

pub mod actions;
pub mod bot;
pub mod config;
pub mod db;
pub mod errors;
pub mod geo;
pub mod keyboards;
pub mod localization;
pub mod observability;
pub mod router;

// Re-export types for easier access
pub use actions::{ActionPayload, DecodeError};
pub use router::{route, InboundEvent, Intent};

//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules:
//! - `message_handler`: routes incoming text and location messages
//! - `callback_handler`: routes inline keyboard callback queries
//! - `inline_handler`: answers inline catalog searches
//! - `ui_builder`: formats messages and builds keyboards

pub mod callback_handler;
pub mod inline_handler;
pub mod message_handler;
pub mod ui_builder;

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::{ParseMode, ReplyMarkup};

// Re-export main handler functions for use in main.rs
pub use callback_handler::callback_handler;
pub use inline_handler::inline_query_handler;
pub use message_handler::message_handler;

/// Send an HTML-formatted message, optionally swapping the reply keyboard
pub(crate) async fn send_html(
    bot: &Bot,
    chat_id: ChatId,
    text: String,
    keyboard: Option<ReplyMarkup>,
) -> Result<()> {
    let request = bot.send_message(chat_id, text).parse_mode(ParseMode::Html);

    match keyboard {
        Some(markup) => request.reply_markup(markup).await?,
        None => request.await?,
    };

    Ok(())
}

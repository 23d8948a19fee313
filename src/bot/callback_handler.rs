//! Callback Handler module for processing inline keyboard callback queries

use anyhow::Result;
use sqlx::postgres::PgPool;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::ReplyMarkup;
use tracing::debug;

use crate::db;
use crate::errors::error_logging;
use crate::geo::Coordinate;
use crate::keyboards;
use crate::localization::{t_lang, LocalizationManager};
use crate::observability;
use crate::router::{route, InboundEvent, Intent};

use super::send_html;
use super::ui_builder::{format_cinema_list, format_film_list};

/// Handle callback queries from inline keyboards
pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    pool: Arc<PgPool>,
    localization: Arc<LocalizationManager>,
) -> Result<()> {
    let span = observability::telegram_span("callback_handler", Some(q.from.id.0 as i64));
    let _enter = span.enter();

    let start_time = std::time::Instant::now();
    observability::record_telegram_update("callback");

    if let Err(e) = handle_callback(&bot, &q, &pool, &localization).await {
        error_logging::log_transport_error(&e, "callback_handler", q.from.id.0 as i64);
    }

    let duration = start_time.elapsed();
    observability::record_request_metrics("telegram_callback", 200, duration);

    Ok(())
}

async fn handle_callback(
    bot: &Bot,
    q: &CallbackQuery,
    pool: &PgPool,
    localization: &LocalizationManager,
) -> Result<()> {
    let from_user_id = q.from.id.0 as i64;
    let language_code = q.from.language_code.as_deref();

    // Use the chat that contained the inline keyboard; fall back to a direct
    // chat with the user when the original message is inaccessible.
    let chat_id = match &q.message {
        Some(teloxide::types::MaybeInaccessibleMessage::Regular(msg)) => msg.chat.id,
        _ => ChatId::from(q.from.id),
    };

    let event = InboundEvent {
        chat_id: chat_id.0,
        from_user_id,
        text: None,
        location: None,
        callback_data: q.data.clone(),
    };

    let intent = route(&event);
    debug!(user_id = %from_user_id, intent = ?intent, "Classified callback");

    match intent {
        Intent::ShowLocation(Coordinate {
            latitude,
            longitude,
        }) => {
            bot.send_location(chat_id, latitude, longitude).await?;
            bot.answer_callback_query(q.id.clone()).await?;
        }
        Intent::ToggleFavorite {
            film_uuid,
            currently_favorite,
        } => {
            db::toggle_favorite(pool, from_user_id, &film_uuid, currently_favorite).await?;

            let answer_key = if currently_favorite {
                "fav-removed"
            } else {
                "fav-added"
            };
            bot.answer_callback_query(q.id.clone())
                .text(t_lang(localization, answer_key, language_code))
                .await?;
        }
        Intent::ShowFilmsForCinema(cinema_uuid) => {
            // The payload carries only the owning cinema id; its film set is
            // re-queried here so callback data stays within transport limits.
            let film_uuids = db::find_cinema_by_uuid(pool, &cinema_uuid)
                .await?
                .map(|cinema| cinema.films)
                .unwrap_or_default();
            let films = db::find_films_by_uuids(pool, &film_uuids).await?;

            send_html(
                bot,
                chat_id,
                format_film_list(&films),
                Some(ReplyMarkup::Keyboard(keyboards::home_keyboard())),
            )
            .await?;
            bot.answer_callback_query(q.id.clone()).await?;
        }
        Intent::ShowCinemasForFilm(film_uuid) => {
            let cinema_uuids = db::find_film_by_uuid(pool, &film_uuid)
                .await?
                .map(|film| film.cinemas)
                .unwrap_or_default();
            let cinemas = db::find_cinemas_by_uuids(pool, &cinema_uuids).await?;

            send_html(
                bot,
                chat_id,
                format_cinema_list(&cinemas),
                Some(ReplyMarkup::Keyboard(keyboards::home_keyboard())),
            )
            .await?;
            bot.answer_callback_query(q.id.clone()).await?;
        }
        // Malformed payloads degrade to a no-op; still clear the loading state
        _ => {
            bot.answer_callback_query(q.id.clone()).await?;
        }
    }

    Ok(())
}

//! Inline query handler: serves the film catalog as inline photo results

use anyhow::Result;
use sqlx::postgres::PgPool;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{InlineQueryResult, InlineQueryResultPhoto};
use tracing::warn;
use url::Url;

use crate::db;
use crate::errors::error_logging;
use crate::localization::LocalizationManager;
use crate::observability;

use super::ui_builder::{create_film_link_keyboard, format_film_caption};

/// Answer inline queries with the full catalog.
///
/// No pagination: the catalog is small and the transport caps result counts;
/// results are served uncached so rating edits show up immediately.
pub async fn inline_query_handler(
    bot: Bot,
    q: InlineQuery,
    pool: Arc<PgPool>,
    localization: Arc<LocalizationManager>,
) -> Result<()> {
    let span = observability::telegram_span("inline_query_handler", Some(q.from.id.0 as i64));
    let _enter = span.enter();

    let start_time = std::time::Instant::now();
    observability::record_telegram_update("inline_query");

    if let Err(e) = handle_inline_query(&bot, &q, &pool, &localization).await {
        error_logging::log_transport_error(&e, "inline_query_handler", q.from.id.0 as i64);
    }

    let duration = start_time.elapsed();
    observability::record_request_metrics("telegram_inline_query", 200, duration);

    Ok(())
}

async fn handle_inline_query(
    bot: &Bot,
    q: &InlineQuery,
    pool: &PgPool,
    localization: &LocalizationManager,
) -> Result<()> {
    let language_code = q.from.language_code.as_deref();
    let films = db::find_all_films(pool).await?;

    let mut results = Vec::with_capacity(films.len());
    for film in &films {
        let picture = match Url::parse(&film.picture) {
            Ok(url) => url,
            Err(e) => {
                warn!(uuid = %film.uuid, error = %e, "Skipping film with invalid picture URL");
                continue;
            }
        };

        let keyboard = match create_film_link_keyboard(film, language_code, localization) {
            Ok(keyboard) => keyboard,
            Err(e) => {
                warn!(uuid = %film.uuid, error = %e, "Skipping film with invalid link URL");
                continue;
            }
        };

        let photo = InlineQueryResultPhoto::new(film.uuid.clone(), picture.clone(), picture)
            .caption(format_film_caption(film, language_code, localization))
            .reply_markup(keyboard);

        results.push(InlineQueryResult::Photo(photo));
    }

    bot.answer_inline_query(q.id.clone(), results)
        .cache_time(0)
        .await?;

    Ok(())
}

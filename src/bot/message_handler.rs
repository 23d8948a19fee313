//! Message Handler module for processing incoming Telegram messages

use anyhow::Result;
use sqlx::postgres::PgPool;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{InputFile, ParseMode, ReplyMarkup};
use tracing::debug;
use url::Url;

use crate::db::{self, Genre};
use crate::errors::error_logging;
use crate::geo::{self, Coordinate};
use crate::keyboards;
use crate::localization::{t_args_lang, t_lang, LocalizationManager};
use crate::observability;
use crate::router::{route, InboundEvent, Intent};

use super::send_html;
use super::ui_builder::{
    create_cinema_detail_keyboard, create_film_detail_keyboard, format_favorite_films,
    format_film_caption, format_film_list, format_nearby_cinemas,
};

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    pool: Arc<PgPool>,
    localization: Arc<LocalizationManager>,
) -> Result<()> {
    let span = observability::telegram_span(
        "message_handler",
        msg.from.as_ref().map(|u| u.id.0 as i64),
    );
    let _enter = span.enter();

    let start_time = std::time::Instant::now();
    let message_type = if msg.location().is_some() {
        "location"
    } else if msg.text().is_some() {
        "text"
    } else {
        "unsupported"
    };
    observability::record_telegram_update(message_type);

    // Failures are logged and the response dropped; the dispatcher never dies
    if let Err(e) = handle_message(&bot, &msg, &pool, &localization).await {
        error_logging::log_transport_error(&e, "message_handler", msg.chat.id.0);
    }

    let duration = start_time.elapsed();
    observability::record_request_metrics("telegram_message", 200, duration);

    Ok(())
}

async fn handle_message(
    bot: &Bot,
    msg: &Message,
    pool: &PgPool,
    localization: &LocalizationManager,
) -> Result<()> {
    let chat_id = msg.chat.id;
    let from_user_id = msg.from.as_ref().map(|u| u.id.0 as i64).unwrap_or(chat_id.0);
    let language_code = msg
        .from
        .as_ref()
        .and_then(|user| user.language_code.as_ref())
        .map(|s| s.as_str());

    let event = InboundEvent {
        chat_id: chat_id.0,
        from_user_id,
        text: msg.text().map(|s| s.to_string()),
        location: msg
            .location()
            .map(|l| Coordinate::new(l.latitude, l.longitude)),
        callback_data: None,
    };

    let intent = route(&event);
    debug!(chat_id = %chat_id, intent = ?intent, "Classified message");

    match intent {
        Intent::ShowHome => {
            let name = msg
                .from
                .as_ref()
                .map(|u| u.first_name.as_str())
                .unwrap_or("there");
            let greeting = t_args_lang(localization, "home-greeting", &[("name", name)], language_code);
            send_html(
                bot,
                chat_id,
                greeting,
                Some(ReplyMarkup::Keyboard(keyboards::home_keyboard())),
            )
            .await
        }
        Intent::ShowGenreMenu => {
            send_html(
                bot,
                chat_id,
                t_lang(localization, "genre-prompt", language_code),
                Some(ReplyMarkup::Keyboard(keyboards::films_keyboard())),
            )
            .await
        }
        Intent::ShowCinemaMenu => {
            send_html(
                bot,
                chat_id,
                t_lang(localization, "cinemas-prompt", language_code),
                Some(ReplyMarkup::Keyboard(keyboards::cinemas_keyboard())),
            )
            .await
        }
        Intent::NavigateBack => {
            send_html(
                bot,
                chat_id,
                t_lang(localization, "back-prompt", language_code),
                Some(ReplyMarkup::Keyboard(keyboards::home_keyboard())),
            )
            .await
        }
        Intent::ShowFilmsByGenre(genre) => {
            show_films_by_genre(bot, chat_id, pool, genre).await
        }
        Intent::ShowRandomFilm => show_random_film(bot, chat_id, pool).await,
        Intent::ShowFavorites => {
            show_favorite_films(bot, chat_id, from_user_id, pool, language_code, localization).await
        }
        Intent::ShowFilmDetail(uuid) => {
            show_film_detail(
                bot,
                chat_id,
                from_user_id,
                &uuid,
                pool,
                language_code,
                localization,
            )
            .await
        }
        Intent::ShowCinemaDetail(uuid) => {
            show_cinema_detail(bot, chat_id, &uuid, pool, language_code, localization).await
        }
        Intent::NearbyCinemas(coordinate) => {
            show_nearby_cinemas(bot, chat_id, coordinate, pool, language_code, localization).await
        }
        // Callback-only intents cannot arise on the message path
        _ => Ok(()),
    }
}

async fn show_films_by_genre(
    bot: &Bot,
    chat_id: ChatId,
    pool: &PgPool,
    genre: Genre,
) -> Result<()> {
    let films = db::find_films_by_genre(pool, genre).await?;
    send_html(
        bot,
        chat_id,
        format_film_list(&films),
        Some(ReplyMarkup::Keyboard(keyboards::films_keyboard())),
    )
    .await
}

async fn show_random_film(bot: &Bot, chat_id: ChatId, pool: &PgPool) -> Result<()> {
    let films: Vec<_> = db::find_random_film(pool).await?.into_iter().collect();
    send_html(
        bot,
        chat_id,
        format_film_list(&films),
        Some(ReplyMarkup::Keyboard(keyboards::films_keyboard())),
    )
    .await
}

async fn show_favorite_films(
    bot: &Bot,
    chat_id: ChatId,
    from_user_id: i64,
    pool: &PgPool,
    language_code: Option<&str>,
    localization: &LocalizationManager,
) -> Result<()> {
    let favorite_uuids = db::find_user(pool, from_user_id)
        .await?
        .map(|user| user.films)
        .unwrap_or_default();
    let films = db::find_films_by_uuids(pool, &favorite_uuids).await?;

    send_html(
        bot,
        chat_id,
        format_favorite_films(&films, language_code, localization),
        Some(ReplyMarkup::Keyboard(keyboards::home_keyboard())),
    )
    .await
}

async fn show_film_detail(
    bot: &Bot,
    chat_id: ChatId,
    from_user_id: i64,
    uuid: &str,
    pool: &PgPool,
    language_code: Option<&str>,
    localization: &LocalizationManager,
) -> Result<()> {
    let film = match db::find_film_by_uuid(pool, uuid).await? {
        Some(film) => film,
        None => {
            debug!(uuid = %uuid, "Film lookup miss");
            return send_html(
                bot,
                chat_id,
                t_lang(localization, "nothing-found", language_code),
                None,
            )
            .await;
        }
    };

    let is_favorite = db::find_user(pool, from_user_id)
        .await?
        .map(|user| user.films.contains(&film.uuid))
        .unwrap_or(false);

    let caption = format_film_caption(&film, language_code, localization);
    let keyboard = create_film_detail_keyboard(&film, is_favorite, language_code, localization)?;

    let picture = Url::parse(&film.picture)?;
    bot.send_photo(chat_id, InputFile::url(picture))
        .caption(caption)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboard)
        .await?;

    Ok(())
}

async fn show_cinema_detail(
    bot: &Bot,
    chat_id: ChatId,
    uuid: &str,
    pool: &PgPool,
    language_code: Option<&str>,
    localization: &LocalizationManager,
) -> Result<()> {
    let cinema = match db::find_cinema_by_uuid(pool, uuid).await? {
        Some(cinema) => cinema,
        None => {
            debug!(uuid = %uuid, "Cinema lookup miss");
            return send_html(
                bot,
                chat_id,
                t_lang(localization, "nothing-found", language_code),
                None,
            )
            .await;
        }
    };

    let title = t_args_lang(localization, "cinema-title", &[("name", &cinema.name)], language_code);
    let keyboard = create_cinema_detail_keyboard(&cinema, language_code, localization)?;

    bot.send_message(chat_id, title)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboard)
        .await?;

    Ok(())
}

async fn show_nearby_cinemas(
    bot: &Bot,
    chat_id: ChatId,
    coordinate: Coordinate,
    pool: &PgPool,
    language_code: Option<&str>,
    localization: &LocalizationManager,
) -> Result<()> {
    let cinemas = db::find_all_cinemas(pool).await?;
    let ranked = geo::rank(coordinate, cinemas);

    send_html(
        bot,
        chat_id,
        format_nearby_cinemas(&ranked, language_code, localization),
        Some(ReplyMarkup::Keyboard(keyboards::home_keyboard())),
    )
    .await
}

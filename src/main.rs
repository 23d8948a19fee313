use anyhow::Result;
use cinescope::bot;
use cinescope::config::AppConfig;
use cinescope::db;
use cinescope::localization;
use cinescope::observability;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use teloxide::prelude::*;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file first
    dotenvy::dotenv().ok();

    // Load and validate configuration early so a bad deployment fails fast
    let config = AppConfig::from_env()?;
    config.validate()?;

    // Initialize the observability stack (logging, metrics, liveness endpoint)
    observability::init_observability(&config.observability).await?;

    info!("Initializing database connection");

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(config.database.connect_timeout_secs))
        .connect(&config.database.url)
        .await?;

    // Initialize database schema; the catalog itself is seeded out-of-band
    // with the seed_catalog tool
    db::init_database_schema(&pool).await?;

    // Wrap pool in Arc for sharing across async tasks
    let shared_pool = Arc::new(pool);

    // Initialize localization manager
    let localization_manager = localization::create_localization_manager()?;

    // Initialize the bot with custom client configuration for better reliability
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.bot.http_timeout_secs))
        .build()?;

    let bot = Bot::with_client(config.bot.token.clone(), client);

    info!(
        http_timeout_secs = config.bot.http_timeout_secs,
        "Bot initialized, starting dispatcher"
    );

    // Set up the dispatcher with shared connection and localization
    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint({
            let pool = Arc::clone(&shared_pool);
            let localization = Arc::clone(&localization_manager);
            move |bot: Bot, msg: Message| {
                let pool = Arc::clone(&pool);
                let localization = Arc::clone(&localization);
                async move { bot::message_handler(bot, msg, pool, localization).await }
            }
        }))
        .branch(Update::filter_callback_query().endpoint({
            let pool = Arc::clone(&shared_pool);
            let localization = Arc::clone(&localization_manager);
            move |bot: Bot, q: CallbackQuery| {
                let pool = Arc::clone(&pool);
                let localization = Arc::clone(&localization);
                async move { bot::callback_handler(bot, q, pool, localization).await }
            }
        }))
        .branch(Update::filter_inline_query().endpoint({
            let pool = Arc::clone(&shared_pool);
            let localization = Arc::clone(&localization_manager);
            move |bot: Bot, q: InlineQuery| {
                let pool = Arc::clone(&pool);
                let localization = Arc::clone(&localization);
                async move { bot::inline_query_handler(bot, q, pool, localization).await }
            }
        }));

    Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

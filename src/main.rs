mod commands;
mod config;
mod imgur;
mod quotes;

use std::net::SocketAddr;
use std::sync::Arc;

use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::types::InputFile;
use teloxide::update_listeners::webhooks;
use tracing::{info, warn};
use tracing_subscriber::prelude::*;

use commands::{respond, Command, CommandReply};
use config::Config;
use imgur::ImgurClient;
use quotes::QuoteStore;

struct BotState {
    config: Config,
    quotes: QuoteStore,
    imgur: ImgurClient,
}

#[tokio::main]
async fn main() {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "wiibot.json".to_string());
    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    // Setup logging
    let log_dir = config.data_dir.join("logs");
    std::fs::create_dir_all(&log_dir).ok();
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("wiibot.log"))
        .expect("Failed to open log file");
    let (non_blocking, _guard) = tracing_appender::non_blocking(log_file);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_filter(
                    tracing_subscriber::EnvFilter::from_default_env()
                        .add_directive(tracing::Level::INFO.into()),
                ),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(
                    tracing_subscriber::EnvFilter::from_default_env()
                        .add_directive(tracing::Level::INFO.into()),
                ),
        )
        .init();

    info!("Starting wiibot...");
    info!("Loaded config from {config_path}");

    // Startup failures end here; everything past dispatch is per-request.
    let quotes = match QuoteStore::load(&config.quotes_file) {
        Ok(quotes) => {
            info!("Loaded {} quotes from {}", quotes.len(), config.quotes_file.display());
            quotes
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let imgur = ImgurClient::new(config.imgur_client_id.clone());
    let bot = Bot::new(&config.telegram_bot_token);

    let state = Arc::new(BotState {
        config,
        quotes,
        imgur,
    });

    let handler = Update::filter_message()
        .filter_command::<Command>()
        .endpoint(handle_command);

    let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
        .dependencies(dptree::deps![state.clone()])
        .enable_ctrlc_handler()
        .build();

    match state.config.webhook {
        Some(ref webhook) => {
            info!("Starting with webhook at {}", webhook.public_url);

            let url = match url::Url::parse(&webhook.public_url) {
                Ok(url) => url,
                Err(e) => {
                    panic!("invalid public_url '{}': {e}", webhook.public_url);
                }
            };
            let addr = SocketAddr::from(([0, 0, 0, 0], webhook.port));

            let listener = match webhooks::axum(bot, webhooks::Options::new(addr, url)).await {
                Ok(listener) => listener,
                Err(e) => {
                    panic!("Failed to set up webhook listener: {e}");
                }
            };

            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("An error from the update listener"),
                )
                .await;
        }
        None => {
            info!("Starting with long polling");
            dispatcher.dispatch().await;
        }
    }
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: Arc<BotState>,
) -> ResponseResult<()> {
    info!("{cmd:?} from chat {}", msg.chat.id);

    match respond(cmd, &state.quotes, &state.imgur, &state.config.sticker_dir).await {
        Ok(CommandReply::Text(text)) => {
            info!("Message: {text}");
            bot.send_message(msg.chat.id, text).await?;
        }
        Ok(CommandReply::Sticker(path)) => {
            info!("Sticker: {}", path.display());
            bot.send_sticker(msg.chat.id, InputFile::file(path)).await?;
        }
        Ok(CommandReply::ImageUrl(url)) => {
            info!("Image: {url}");
            bot.send_message(msg.chat.id, url).await?;
        }
        Err(e) => {
            warn!("{e}");
            bot.send_message(msg.chat.id, e.user_message()).await?;
        }
    }

    Ok(())
}

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the config file.
    ReadFile { path: PathBuf, source: std::io::Error },
    /// Failed to parse JSON.
    ParseJson { path: PathBuf, source: serde_json::Error },
    /// Validation error.
    Validation(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFile { path, source } => {
                write!(f, "failed to read config file '{}': {}", path.display(), source)
            }
            Self::ParseJson { path, source } => {
                write!(f, "failed to parse config file '{}': {}", path.display(), source)
            }
            Self::Validation(msg) => write!(f, "config validation error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReadFile { source, .. } => Some(source),
            Self::ParseJson { source, .. } => Some(source),
            Self::Validation(_) => None,
        }
    }
}

#[derive(Deserialize)]
struct ConfigFile {
    telegram_bot_token: String,
    /// Imgur Client-ID credential, sent on every gallery request.
    imgur_client_id: String,
    /// Quotes corpus, one quote per line.
    quotes_file: Option<String>,
    /// Directory holding the sticker .webp files.
    sticker_dir: Option<String>,
    /// Directory for state files (logs). Defaults to current directory.
    data_dir: Option<String>,
    /// Public HTTPS URL for webhook delivery. If unset, the bot long-polls.
    public_url: Option<String>,
    /// Local port the webhook listener binds. Required with public_url.
    port: Option<u16>,
}

pub struct Config {
    pub telegram_bot_token: String,
    pub imgur_client_id: String,
    pub quotes_file: PathBuf,
    pub sticker_dir: PathBuf,
    /// Directory for state files (logs).
    pub data_dir: PathBuf,
    /// Webhook endpoint, when configured; otherwise the bot long-polls.
    pub webhook: Option<WebhookConfig>,
}

pub struct WebhookConfig {
    pub public_url: String,
    pub port: u16,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config_path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&config_path)
            .map_err(|e| ConfigError::ReadFile { path: config_path.clone(), source: e })?;
        let file: ConfigFile = serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseJson { path: config_path.clone(), source: e })?;

        // Validate required fields
        if file.telegram_bot_token.is_empty() {
            return Err(ConfigError::Validation("telegram_bot_token is required".into()));
        }
        // Telegram tokens are formatted as {bot_id}:{secret} where bot_id is numeric
        let token_parts: Vec<&str> = file.telegram_bot_token.split(':').collect();
        if token_parts.len() != 2 || token_parts[0].parse::<u64>().is_err() || token_parts[1].is_empty() {
            return Err(ConfigError::Validation(
                "telegram_bot_token appears invalid (expected format: 123456789:ABCdefGHI...)".into()
            ));
        }
        if file.imgur_client_id.is_empty() {
            return Err(ConfigError::Validation("imgur_client_id is required".into()));
        }

        let webhook = match (file.public_url, file.port) {
            (Some(public_url), Some(port)) => Some(WebhookConfig { public_url, port }),
            (Some(_), None) => {
                return Err(ConfigError::Validation(
                    "port is required when public_url is set".into(),
                ));
            }
            _ => None,
        };

        let quotes_file = file
            .quotes_file
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data/quotes.txt"));
        let sticker_dir = file
            .sticker_dir
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data"));
        let data_dir = file
            .data_dir
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            telegram_bot_token: file.telegram_bot_token,
            imgur_client_id: file.imgur_client_id,
            quotes_file,
            sticker_dir,
            data_dir,
            webhook,
        })
    }
}

//! Bot commands and the mapping from a command to its reply.

use std::fmt;
use std::path::{Path, PathBuf};

use teloxide::utils::command::BotCommands;

use crate::imgur::{ImgurClient, ImgurError};
use crate::quotes::{QuoteError, QuoteStore};

#[derive(BotCommands, Clone, Copy, Debug, PartialEq)]
#[command(
    rename_rule = "snake_case",
    description = "These are not the commands you are looking for.."
)]
pub enum Command {
    #[command(description = "show this message")]
    Help,
    #[command(description = "show irc quote")]
    IrcQuote,
    #[command(description = "Byyyycicle Byyyycicle")]
    Bycicle,
    #[command(description = "FAP FAP FAP")]
    Fap,
    #[command(description = "everything is La Merda")]
    Lamerda,
    #[command(description = "ftttt ftttt")]
    Ftttt,
    #[command(description = "random pic from Russia")]
    Russia,
    #[command(description = "random pic from Star Trek")]
    Startrek,
    #[command(description = "random pic a cute cats")]
    Cats,
    #[command(description = "random pic of a cute dog")]
    Dogs,
    #[command(description = "random pic of Nintendo stuff")]
    Nintendo,
    #[command(description = "random pic of Mario")]
    Mario,
    #[command(description = "wow")]
    Doge,
}

/// What gets delivered back to the originating chat.
#[derive(Debug, PartialEq)]
pub enum CommandReply {
    Text(String),
    Sticker(PathBuf),
    ImageUrl(String),
}

/// A command that could not be served. Carries the component error for the
/// logs plus a canned user-facing message; the process keeps running.
#[derive(Debug)]
pub enum CommandError {
    Quote(QuoteError),
    Imgur(ImgurError),
}

impl CommandError {
    /// Short apology suitable for sending back to the chat.
    pub fn user_message(&self) -> &'static str {
        match self {
            CommandError::Quote(_) => "couldn't find a quote right now",
            CommandError::Imgur(_) => "couldn't fetch an image right now",
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Quote(e) => write!(f, "quote lookup failed: {e}"),
            CommandError::Imgur(e) => write!(f, "imgur lookup failed: {e}"),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommandError::Quote(e) => Some(e),
            CommandError::Imgur(e) => Some(e),
        }
    }
}

impl From<QuoteError> for CommandError {
    fn from(e: QuoteError) -> Self {
        CommandError::Quote(e)
    }
}

impl From<ImgurError> for CommandError {
    fn from(e: ImgurError) -> Self {
        CommandError::Imgur(e)
    }
}

/// Subreddit backing each gallery command.
fn subreddit(cmd: Command) -> Option<&'static str> {
    match cmd {
        Command::Russia => Some("ANormalDayInRussia"),
        Command::Startrek => Some("startrekgifs"),
        Command::Cats => Some("catgifs"),
        Command::Dogs => Some("doggifs"),
        Command::Nintendo => Some("nintendo"),
        Command::Mario => Some("mario"),
        Command::Doge => Some("doge"),
        _ => None,
    }
}

/// Produce the reply for one command. Component failures come back as a
/// typed error; the dispatcher decides the user-facing messaging.
pub async fn respond(
    cmd: Command,
    quotes: &QuoteStore,
    imgur: &ImgurClient,
    sticker_dir: &Path,
) -> Result<CommandReply, CommandError> {
    let reply = match cmd {
        Command::Help => CommandReply::Text(Command::descriptions().to_string()),
        Command::IrcQuote => CommandReply::Text(quotes.random_quote()?.to_string()),
        Command::Ftttt => {
            CommandReply::Text("@valedix https://i.imgur.com/3STgUHv.jpg".to_string())
        }
        Command::Bycicle => CommandReply::Sticker(sticker_dir.join("bycicle.webp")),
        Command::Fap => CommandReply::Sticker(sticker_dir.join("fap.webp")),
        Command::Lamerda => CommandReply::Sticker(sticker_dir.join("lamerda.webp")),
        Command::Russia
        | Command::Startrek
        | Command::Cats
        | Command::Dogs
        | Command::Nintendo
        | Command::Mario
        | Command::Doge => {
            // subreddit() covers every gallery command matched above
            let gallery = subreddit(cmd).unwrap_or("doge");
            CommandReply::ImageUrl(imgur.random_image(gallery).await?)
        }
    };

    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parsing() {
        let parse = |text: &str| Command::parse(text, "wiibot");

        assert_eq!(parse("/help").unwrap(), Command::Help);
        assert_eq!(parse("/irc_quote").unwrap(), Command::IrcQuote);
        assert_eq!(parse("/bycicle").unwrap(), Command::Bycicle);
        assert_eq!(parse("/doge").unwrap(), Command::Doge);
        assert_eq!(parse("/cats@wiibot").unwrap(), Command::Cats);
        assert!(parse("/unknown").is_err());
        assert!(parse("hello there").is_err());
    }

    #[test]
    fn test_help_lists_every_command() {
        let help = Command::descriptions().to_string();
        for cmd in [
            "/help",
            "/irc_quote",
            "/bycicle",
            "/fap",
            "/lamerda",
            "/ftttt",
            "/russia",
            "/startrek",
            "/cats",
            "/dogs",
            "/nintendo",
            "/mario",
            "/doge",
        ] {
            assert!(help.contains(cmd), "help text missing {cmd}:\n{help}");
        }
    }

    #[test]
    fn test_gallery_mapping() {
        assert_eq!(subreddit(Command::Russia), Some("ANormalDayInRussia"));
        assert_eq!(subreddit(Command::Startrek), Some("startrekgifs"));
        assert_eq!(subreddit(Command::Cats), Some("catgifs"));
        assert_eq!(subreddit(Command::Dogs), Some("doggifs"));
        assert_eq!(subreddit(Command::Nintendo), Some("nintendo"));
        assert_eq!(subreddit(Command::Mario), Some("mario"));
        assert_eq!(subreddit(Command::Doge), Some("doge"));
        assert_eq!(subreddit(Command::Help), None);
        assert_eq!(subreddit(Command::Bycicle), None);
    }

    #[tokio::test]
    async fn test_sticker_paths() {
        // Sticker replies resolve under the configured sticker directory.
        let quotes = QuoteStore::load_for_test(&["q"]);
        let imgur = ImgurClient::new("id".to_string());

        let reply = respond(Command::Lamerda, &quotes, &imgur, Path::new("data"))
            .await
            .unwrap();
        assert_eq!(reply, CommandReply::Sticker(PathBuf::from("data/lamerda.webp")));
    }

    #[tokio::test]
    async fn test_quote_reply_comes_from_corpus() {
        let quotes = QuoteStore::load_for_test(&["<nick> hi"]);
        let imgur = ImgurClient::new("id".to_string());

        let reply = respond(Command::IrcQuote, &quotes, &imgur, Path::new("data"))
            .await
            .unwrap();
        assert_eq!(reply, CommandReply::Text("<nick> hi".to_string()));
    }

    #[tokio::test]
    async fn test_static_text_reply() {
        let quotes = QuoteStore::load_for_test(&["q"]);
        let imgur = ImgurClient::new("id".to_string());

        let reply = respond(Command::Ftttt, &quotes, &imgur, Path::new("data"))
            .await
            .unwrap();
        assert!(matches!(reply, CommandReply::Text(ref t) if t.contains("imgur.com")));
    }
}

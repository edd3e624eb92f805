use crate::{Command, Error, Result};
use carcheck_core::{Locale, Resolver};
use std::{sync::Arc, time::Duration};
use teloxide::prelude::*;
use tokio::time::sleep;
use tracing::{info, warn};

/// Telegram front-end over a shared [`Resolver`].
#[derive(Clone)]
pub struct TelegramBot {
    /// Teloxide bot instance
    pub bot: Bot,
    /// Provider chain, shared by every chat
    pub resolver: Arc<Resolver>,
    /// Locale used when the user's language is not supported
    default_locale: Locale,
    /// Allowed chat IDs
    allowed_chats: Arc<Vec<i64>>,
}

impl TelegramBot {
    /// Create a new Telegram bot
    pub fn new(
        token: String,
        resolver: Arc<Resolver>,
        default_locale: Locale,
        allowed_chats: &[String],
    ) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(Error::Config("bot token is empty".into()));
        }

        // Parse allowed chat IDs
        let allowed_chats = allowed_chats
            .iter()
            .filter_map(|s| match s.trim().parse::<i64>() {
                Ok(id) => Some(id),
                Err(_) => {
                    warn!("Ignoring invalid chat id in allow_from: {s}");
                    None
                }
            })
            .collect();

        Ok(Self {
            bot: Bot::new(token),
            resolver,
            default_locale,
            allowed_chats: Arc::new(allowed_chats),
        })
    }

    /// Check if a chat is allowed
    #[must_use]
    pub fn is_allowed(&self, chat_id: i64) -> bool {
        self.allowed_chats.is_empty() || self.allowed_chats.contains(&chat_id)
    }

    /// Locale for a user's Telegram `language_code`.
    #[must_use]
    pub fn locale_for(&self, language_code: Option<&str>) -> Locale {
        language_code
            .and_then(Locale::from_language_code)
            .unwrap_or(self.default_locale)
    }

    /// Test connection to Telegram API with backoff retry.
    /// Starts at 2s, increases by 2s each attempt, max 10s delay.
    /// Retries indefinitely until connection succeeds.
    async fn test_connection(&self) {
        const INITIAL_DELAY_SECS: u64 = 2;
        const MAX_DELAY_SECS: u64 = 10;

        let mut attempt = 1u64;
        loop {
            match self.bot.get_me().await {
                Ok(me) => {
                    info!(
                        "Connected to Telegram API: @{} (id: {})",
                        me.user
                            .username
                            .as_deref()
                            .unwrap_or("no username"),
                        me.user.id
                    );
                    return;
                }
                Err(e) => {
                    let delay_secs = (INITIAL_DELAY_SECS * attempt).min(MAX_DELAY_SECS);

                    warn!("Connection attempt {attempt} failed: {e}. Retrying in {delay_secs}s...");

                    // Only show detailed help on first failure
                    if attempt == 1 {
                        warn!("This may be due to:");
                        warn!("  - Network connectivity issues");
                        warn!("  - Firewall blocking api.telegram.org");
                        warn!("  - Invalid bot token");
                        warn!("  - Telegram API being temporarily unavailable");
                    }

                    sleep(Duration::from_secs(delay_secs)).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Run the bot
    pub async fn run(self) -> Result<()> {
        use teloxide::dispatching::{Dispatcher, UpdateFilterExt};
        use teloxide::dptree;
        use teloxide::types::Update;

        self.test_connection().await;

        if let Err(e) = self
            .bot
            .set_my_commands(Command::bot_commands(self.default_locale))
            .await
        {
            warn!("Failed to register bot commands: {e}");
        }

        let bot = self.bot.clone();

        let schema = dptree::entry().branch(Update::filter_message().endpoint({
            let bot_clone = self.clone();
            move |_bot: Bot, msg: Message| {
                let bot_clone = bot_clone.clone();
                async move { crate::handler::handle_message(bot_clone, msg).await }
            }
        }));

        Dispatcher::builder(bot, schema)
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bot(allowed: &[&str]) -> TelegramBot {
        let allowed: Vec<String> = allowed.iter().map(ToString::to_string).collect();
        TelegramBot::new(
            "123:abc".to_string(),
            Arc::new(Resolver::new(Vec::new())),
            Locale::Ru,
            &allowed,
        )
        .unwrap()
    }

    #[test]
    fn empty_allowlist_admits_everyone() {
        assert!(bot(&[]).is_allowed(42));
    }

    #[test]
    fn allowlist_filters_chats_and_skips_garbage() {
        let bot = bot(&["42", "not-a-number", " -100 "]);
        assert!(bot.is_allowed(42));
        assert!(bot.is_allowed(-100));
        assert!(!bot.is_allowed(7));
    }

    #[test]
    fn locale_falls_back_to_default() {
        let bot = bot(&[]);
        assert_eq!(bot.locale_for(Some("en-GB")), Locale::En);
        assert_eq!(bot.locale_for(Some("de")), Locale::Ru);
        assert_eq!(bot.locale_for(None), Locale::Ru);
    }

    #[test]
    fn empty_token_is_rejected() {
        let result = TelegramBot::new(
            "  ".to_string(),
            Arc::new(Resolver::new(Vec::new())),
            Locale::En,
            &[],
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }
}

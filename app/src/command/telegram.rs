use crate::command::CommandStrategy;
use carcheck_config::Config;
use carcheck_providers::build_resolver;
use carcheck_telegram::TelegramBot;
use std::sync::Arc;
use tracing::info;

/// Input for Telegram bot command.
pub struct TelegramInput {
    /// Optional bot token (overrides config)
    pub token: Option<String>,
    /// Optional allowed chat IDs (overrides config)
    pub allow_from: Option<Vec<String>>,
}

/// Strategy for running Telegram bot.
pub struct TelegramStrategy;

impl CommandStrategy for TelegramStrategy {
    type Input = TelegramInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        // Get token from input or config
        let token = if let Some(t) = input.token {
            t
        } else if !config.telegram.token.is_empty() {
            config.telegram.token.clone()
        } else {
            anyhow::bail!(
                "Telegram bot token not configured. Set BOT_TOKEN or \"telegram.token\" in config"
            );
        };

        // Get allowed chats from input or config
        let allow_from = input
            .allow_from
            .unwrap_or_else(|| config.telegram.allow_from.clone());

        info!("Starting Telegram bot...");

        let resolver = Arc::new(build_resolver(&config.providers)?);
        let bot = TelegramBot::new(token, resolver, config.locale, &allow_from)?;

        info!("Telegram bot is running. Press Ctrl+C to stop.");
        bot.run().await?;

        Ok(())
    }
}

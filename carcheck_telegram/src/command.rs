use carcheck_core::Locale;
use teloxide::types::BotCommand;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
}

impl Command {
    #[must_use]
    pub fn bot_commands(locale: Locale) -> Vec<BotCommand> {
        let (start, help) = match locale {
            Locale::Ru => ("Начать работу", "Показать справку"),
            Locale::En => ("Get started", "Show help"),
        };
        vec![BotCommand::new("start", start), BotCommand::new("help", help)]
    }

    #[must_use]
    pub fn parse_from_text(text: &str) -> Option<Self> {
        let text = text.trim().to_lowercase();

        // Remove bot mention if present (e.g., "/start@my_bot")
        let command = text.split('@').next().unwrap_or(&text);

        match command {
            "/start" => Some(Self::Start),
            "/help" => Some(Self::Help),
            _ => None,
        }
    }

    #[must_use]
    pub const fn reply(self, locale: Locale) -> &'static str {
        match self {
            Self::Start => locale.welcome_text(),
            Self::Help => locale.help_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_commands() {
        assert_eq!(Command::parse_from_text("/start"), Some(Command::Start));
        assert_eq!(Command::parse_from_text(" /HELP "), Some(Command::Help));
        assert_eq!(
            Command::parse_from_text("/start@carcheck_bot"),
            Some(Command::Start)
        );
    }

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(Command::parse_from_text("1HGCM82633A004352"), None);
        assert_eq!(Command::parse_from_text("/reset"), None);
    }

    #[test]
    fn replies_follow_locale() {
        assert!(Command::Start.reply(Locale::En).contains("VIN"));
        assert_ne!(
            Command::Help.reply(Locale::En),
            Command::Help.reply(Locale::Ru)
        );
    }
}

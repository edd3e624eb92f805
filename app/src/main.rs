#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;

use carcheck_core::Locale;
use clap::{Parser, Subcommand};
use command::{
    CommandStrategy, InfoStrategy, InitStrategy, LookupInput, LookupStrategy, TelegramInput,
    TelegramStrategy, VersionStrategy,
};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "carcheck")]
#[command(about = "Vehicle history lookup bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the Telegram bot
    Telegram {
        /// Bot token (overrides config and BOT_TOKEN)
        #[arg(short, long)]
        token: Option<String>,

        /// Allowed chat IDs (overrides config)
        #[arg(short, long, num_args = 1..)]
        allow_from: Option<Vec<String>>,
    },
    /// Look up one VIN or plate number and print the report
    Lookup {
        /// VIN (17 characters) or plate number
        identifier: String,

        /// Report language: ru or en
        #[arg(short, long)]
        locale: Option<Locale>,
    },
    /// Initialize configuration
    Init,
    /// Show effective configuration
    Info,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Telegram { token, allow_from } => {
            TelegramStrategy
                .execute(TelegramInput { token, allow_from })
                .await
        }
        Commands::Lookup { identifier, locale } => {
            LookupStrategy
                .execute(LookupInput { identifier, locale })
                .await
        }
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Info => InfoStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lookup_with_locale() {
        let cli = Cli::try_parse_from(["carcheck", "lookup", "AA1234BC", "--locale", "en"]).unwrap();
        match cli.command {
            Commands::Lookup { identifier, locale } => {
                assert_eq!(identifier, "AA1234BC");
                assert_eq!(locale, Some(Locale::En));
            }
            _ => panic!("expected lookup"),
        }
    }

    #[test]
    fn parses_telegram_overrides() {
        let cli = Cli::try_parse_from(["carcheck", "telegram", "--allow-from", "1", "2"]).unwrap();
        match cli.command {
            Commands::Telegram { token, allow_from } => {
                assert!(token.is_none());
                assert_eq!(allow_from, Some(vec!["1".to_string(), "2".to_string()]));
            }
            _ => panic!("expected telegram"),
        }
    }
}

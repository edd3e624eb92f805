use crate::command::CommandStrategy;
use carcheck_config::Config;
use carcheck_core::{Locale, Query, format_report};
use carcheck_providers::build_resolver;
use tracing::info;

/// Input for a one-shot lookup from the command line.
pub struct LookupInput {
    /// VIN or plate number, sanitized before use
    pub identifier: String,
    /// Report language (overrides config)
    pub locale: Option<Locale>,
}

/// Strategy for resolving one identifier and printing the report.
#[derive(Debug, Clone, Copy)]
pub struct LookupStrategy;

impl CommandStrategy for LookupStrategy {
    type Input = LookupInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let locale = input.locale.unwrap_or(config.locale);

        let query = Query::parse(&input.identifier)
            .map_err(|e| anyhow::anyhow!("Invalid identifier {:?}: {e}", input.identifier))?;

        let resolver = build_resolver(&config.providers)?;
        info!("Looking up {query}");

        match resolver.resolve(&query).await {
            Some(record) => {
                let report = format_report(&record, locale);
                println!("{}", report.text);
                if let Some(photo) = report.photo_url {
                    println!();
                    println!("📷 {photo}");
                }
            }
            None => println!("{}", locale.not_found_text()),
        }

        Ok(())
    }
}

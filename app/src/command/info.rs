use carcheck_config::{Config, ProviderKind};

/// Strategy for displaying configuration information.
///
/// This strategy outputs the effective configuration (file plus environment):
/// - Telegram token (masked) and allowlist
/// - Report locale
/// - Provider order, timeout and which providers have credentials
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        println!("=== carcheck Configuration ===\n");

        println!("Config file: {}", Config::config_path()?.display());
        println!("Locale: {}", config.locale);
        println!();

        println!("Telegram:");
        println!("  Token: {}", mask_secret(&config.telegram.token));
        if config.telegram.allow_from.is_empty() {
            println!("  Allow From: (empty - all users allowed)");
        } else {
            println!("  Allow From: {}", config.telegram.allow_from.join(", "));
        }
        println!();

        let providers = &config.providers;
        println!("Providers (in lookup order):");
        println!("  Timeout: {}s", providers.timeout_secs);
        for (position, kind) in providers.order.iter().enumerate() {
            let status = if providers.is_enabled(*kind) {
                "enabled"
            } else {
                "disabled (no credentials)"
            };
            println!("  {}. {} - {status}", position + 1, provider_label(*kind));
            match kind {
                ProviderKind::Autoria => {
                    println!("     URL: {}", providers.autoria.base_url);
                    println!(
                        "     API Key: {}",
                        mask_secret(providers.autoria.api_key.as_deref().unwrap_or_default())
                    );
                }
                ProviderKind::Bazagai => {
                    println!("     URL: {}", providers.bazagai.base_url);
                    println!(
                        "     API Key: {}",
                        mask_secret(providers.bazagai.api_key().unwrap_or_default())
                    );
                }
                ProviderKind::VinDecoder => {
                    println!(
                        "     URL: {}",
                        providers.vin_decoder.base_url().unwrap_or("(not set)")
                    );
                    println!(
                        "     API Key: {}",
                        mask_secret(providers.vin_decoder.api_key().unwrap_or_default())
                    );
                }
            }
        }

        Ok(())
    }
}

const fn provider_label(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::Autoria => "AUTO.RIA",
        ProviderKind::Bazagai => "Baza-Gai",
        ProviderKind::VinDecoder => "VIN decoder",
    }
}

fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.is_empty() {
        "(not set)".to_string()
    } else if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secrets_are_masked() {
        assert_eq!(mask_secret(""), "(not set)");
        assert_eq!(mask_secret("short"), "***");
        assert_eq!(mask_secret("123456:ABCDEFGH"), "1234...EFGH");
    }
}

use carcheck_core::Locale;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::env;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub locale: Locale,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct TelegramConfig {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub allow_from: Vec<String>,
}

/// Provider identifiers as written in `providers.order`.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Autoria,
    Bazagai,
    VinDecoder,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    /// Lookup priority: first entry is tried first.
    #[serde(default = "ProvidersConfig::default_order")]
    pub order: Vec<ProviderKind>,
    /// Per-provider request deadline (seconds)
    #[serde(default = "ProvidersConfig::default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub autoria: AutoRiaConfig,
    #[serde(default)]
    pub bazagai: BazaGaiConfig,
    #[serde(default)]
    pub vin_decoder: VinDecoderConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            order: Self::default_order(),
            timeout_secs: Self::default_timeout_secs(),
            autoria: AutoRiaConfig::default(),
            bazagai: BazaGaiConfig::default(),
            vin_decoder: VinDecoderConfig::default(),
        }
    }
}

impl ProvidersConfig {
    fn default_order() -> Vec<ProviderKind> {
        vec![
            ProviderKind::Autoria,
            ProviderKind::Bazagai,
            ProviderKind::VinDecoder,
        ]
    }

    const fn default_timeout_secs() -> u64 {
        15
    }

    /// Whether the named provider has the credentials it needs.
    #[must_use]
    pub fn is_enabled(&self, kind: ProviderKind) -> bool {
        match kind {
            ProviderKind::Autoria => self.autoria.credentials().is_some(),
            ProviderKind::Bazagai => self.bazagai.api_key().is_some(),
            ProviderKind::VinDecoder => self.vin_decoder.base_url().is_some(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AutoRiaConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default = "AutoRiaConfig::default_base_url")]
    pub base_url: String,
}

impl Default for AutoRiaConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            user_id: None,
            base_url: Self::default_base_url(),
        }
    }
}

impl AutoRiaConfig {
    fn default_base_url() -> String {
        "https://developers.ria.com".to_string()
    }

    /// `(api_key, user_id)`, only when both are set.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((non_empty(self.api_key.as_ref())?, non_empty(self.user_id.as_ref())?))
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BazaGaiConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "BazaGaiConfig::default_base_url")]
    pub base_url: String,
}

impl Default for BazaGaiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: Self::default_base_url(),
        }
    }
}

impl BazaGaiConfig {
    fn default_base_url() -> String {
        "https://baza-gai.com.ua".to_string()
    }

    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        non_empty(self.api_key.as_ref())
    }
}

/// Generic VIN decoding service; enabled by its base URL, key optional.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct VinDecoderConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
}

impl VinDecoderConfig {
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        non_empty(self.api_key.as_ref())
    }

    #[must_use]
    pub fn base_url(&self) -> Option<&str> {
        non_empty(self.base_url.as_ref())
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("carcheck"))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Loads `~/carcheck/config.json` when present, then applies `.env` and
    /// process environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => info!("Loaded environment from {}", path.display()),
            Err(e) => debug!("No .env loaded: {e}"),
        }

        let config_path = Self::config_path()?;
        let mut config = if config_path.exists() {
            info!("Loading config from {}", config_path.display());
            Self::load_from(&config_path)?
        } else {
            debug!(
                "Config file not found at {}, using environment only",
                config_path.display()
            );
            Self::default()
        };

        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would make every lookup fail.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.providers.timeout_secs == 0 {
            anyhow::bail!("providers.timeout_secs must be at least 1");
        }
        Ok(())
    }

    /// Overrides file values with whatever `lookup` returns for the known
    /// variable names. Empty values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = get(env::BOT_TOKEN) {
            self.telegram.token = token;
        }
        if let Some(key) = get(env::AUTORIA_API_KEY) {
            self.providers.autoria.api_key = Some(key);
        }
        if let Some(user_id) = get(env::AUTORIA_USER_ID) {
            self.providers.autoria.user_id = Some(user_id);
        }
        if let Some(key) = get(env::BAZAGAI_API_KEY) {
            self.providers.bazagai.api_key = Some(key);
        }
        if let Some(key) = get(env::VIN_API_KEY) {
            self.providers.vin_decoder.api_key = Some(key);
        }
        if let Some(url) = get(env::VIN_API_URL) {
            self.providers.vin_decoder.base_url = Some(url);
        }
        if let Some(locale) = get(env::LOCALE) {
            match locale.parse::<Locale>() {
                Ok(locale) => self.locale = locale,
                Err(e) => tracing::warn!("Ignoring {}: {e}", env::LOCALE),
            }
        }
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        let config_template = r#"{
  "telegram": {
    "token": "your-telegram-bot-token-here",
    "allow_from": []
  },
  "locale": "ru",
  "providers": {
    "order": ["autoria", "bazagai", "vin_decoder"],
    "timeout_secs": 15,
    "autoria": {
      "api_key": null,
      "user_id": null,
      "base_url": "https://developers.ria.com"
    },
    "bazagai": {
      "api_key": null,
      "base_url": "https://baza-gai.com.ua"
    },
    "vin_decoder": {
      "api_key": null,
      "base_url": null
    }
  }
}"#;

        std::fs::write(&config_path, config_template)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Set your Telegram bot token (or export BOT_TOKEN)");
        println!("   2. Add credentials for at least one provider");
        println!("      (AUTORIA_API_KEY + AUTORIA_USER_ID, BAZAGAI_API_KEY, VIN_API_URL)");
        println!("   3. Run 'carcheck telegram' to start the bot");
        println!();
        println!("🔧 Configuration options:");
        println!("   - providers.order: lookup priority, first match wins");
        println!("   - providers.timeout_secs: deadline for each provider request");
        println!("   - locale: default report language (ru, en)");
        println!();
        Ok(())
    }
}

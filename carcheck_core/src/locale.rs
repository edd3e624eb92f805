use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::record::Placeholder;

/// Language of user-facing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ru,
    En,
}

/// Section labels and status strings for one locale.
#[derive(Debug, Clone, Copy)]
pub struct Labels {
    pub report_title: &'static str,
    pub source: &'static str,
    pub specs: &'static str,
    pub engine: &'static str,
    pub color: &'static str,
    pub history: &'static str,
    pub registrations: &'static str,
    pub mileage: &'static str,
    pub accidents: &'static str,
    pub status: &'static str,
    pub wanted: &'static str,
    pub clear: &'static str,
}

const RU: Labels = Labels {
    report_title: "Отчет по авто",
    source: "Источник",
    specs: "Характеристики",
    engine: "Двигатель",
    color: "Цвет",
    history: "История",
    registrations: "Записей о регистрации",
    mileage: "Пробег",
    accidents: "ДТП",
    status: "Статус",
    wanted: "🚨 <b>В РОЗЫСКЕ!</b>",
    clear: "✅ В розыске не числится",
};

const EN: Labels = Labels {
    report_title: "Vehicle report",
    source: "Source",
    specs: "Specifications",
    engine: "Engine",
    color: "Color",
    history: "History",
    registrations: "Registration records",
    mileage: "Mileage",
    accidents: "Accidents",
    status: "Status",
    wanted: "🚨 <b>WANTED!</b>",
    clear: "✅ Not on the wanted list",
};

impl Locale {
    /// Maps a Telegram `language_code` (IETF tag) to a supported locale.
    #[must_use]
    pub fn from_language_code(code: &str) -> Option<Self> {
        let primary = code.split(['-', '_']).next().unwrap_or_default();
        match primary.to_ascii_lowercase().as_str() {
            "ru" | "uk" => Some(Self::Ru),
            "en" => Some(Self::En),
            _ => None,
        }
    }

    #[must_use]
    pub const fn labels(self) -> &'static Labels {
        match self {
            Self::Ru => &RU,
            Self::En => &EN,
        }
    }

    #[must_use]
    pub const fn placeholder(self, placeholder: Placeholder) -> &'static str {
        match (self, placeholder) {
            (Self::Ru, Placeholder::Unknown) => "Неизвестно",
            (Self::Ru, Placeholder::NoData) => "Нет данных",
            (Self::Ru, Placeholder::NoRecords) => "Нет записей",
            (Self::En, Placeholder::Unknown) => "Unknown",
            (Self::En, Placeholder::NoData) => "No data",
            (Self::En, Placeholder::NoRecords) => "No records",
        }
    }

    #[must_use]
    pub const fn welcome_text(self) -> &'static str {
        match self {
            Self::Ru => {
                "👋 Привет! Отправь мне VIN-код автомобиля (17 символов) или госномер \
                 для получения отчета по базам Украины."
            }
            Self::En => {
                "👋 Hi! Send me a vehicle VIN (17 characters) or a license plate \
                 to get a report from Ukrainian registries."
            }
        }
    }

    #[must_use]
    pub const fn help_text(self) -> &'static str {
        match self {
            Self::Ru => {
                r"
🚘 Проверка авто

Команды:
/start - начать работу
/help  - показать эту справку

Просто отправьте VIN (17 символов, без I, O, Q) или госномер, например AA1234BC.
"
            }
            Self::En => {
                r"
🚘 Vehicle check

Commands:
/start - get started
/help  - show this help

Just send a VIN (17 characters, no I, O, Q) or a plate number, e.g. AA1234BC.
"
            }
        }
    }

    #[must_use]
    pub const fn wait_text(self) -> &'static str {
        match self {
            Self::Ru => "⏳ Запрашиваю данные по базам. Подождите...",
            Self::En => "⏳ Querying the registries. Please wait...",
        }
    }

    #[must_use]
    pub const fn not_found_text(self) -> &'static str {
        match self {
            Self::Ru => "❌ Данные по этому запросу не найдены или сервис временно недоступен.",
            Self::En => "❌ No data found for this identifier, or the service is temporarily unavailable.",
        }
    }

    #[must_use]
    pub const fn invalid_input_text(self) -> &'static str {
        match self {
            Self::Ru => {
                "⚠️ Неверный формат. Отправьте VIN-код (ровно 17 символов, латиница и цифры) \
                 или госномер (от 4 символов)."
            }
            Self::En => {
                "⚠️ Invalid format. Send a VIN (exactly 17 Latin letters and digits) \
                 or a plate number (at least 4 characters)."
            }
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ru => f.write_str("ru"),
            Self::En => f.write_str("en"),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_language_code(s.trim()).ok_or_else(|| format!("unsupported locale: {s}"))
    }
}

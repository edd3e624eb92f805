//! Environment variable names read on top of the config file.

pub const BOT_TOKEN: &str = "BOT_TOKEN";
pub const AUTORIA_API_KEY: &str = "AUTORIA_API_KEY";
pub const AUTORIA_USER_ID: &str = "AUTORIA_USER_ID";
pub const BAZAGAI_API_KEY: &str = "BAZAGAI_API_KEY";
pub const VIN_API_KEY: &str = "VIN_API_KEY";
pub const VIN_API_URL: &str = "VIN_API_URL";
pub const LOCALE: &str = "CARCHECK_LOCALE";

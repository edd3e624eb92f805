use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Unauthorized access from chat_id: {0}")]
    Unauthorized(i64),

    #[error("Configuration error: {0}")]
    Config(String),
}

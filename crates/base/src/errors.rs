use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type OrderBotResult<T> = Result<T, OrderBotError>;

#[derive(Debug, Error)]
pub enum OrderBotError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("order store {path:?} is corrupt")]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("order store {path:?} is unavailable")]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl OrderBotError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Text shown to the chat user when a command fails with this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidArgument(details) => format!("參數錯誤：{}", details),
            Self::CorruptStore { .. } => String::from("訂單資料損毀，無法讀取。"),
            Self::StorageUnavailable { .. } => {
                String::from("訂單資料暫時無法存取，請稍後再試。")
            }
            Self::Configuration(details) => format!("設定錯誤：{}", details),
        }
    }
}

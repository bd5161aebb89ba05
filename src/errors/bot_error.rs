//! Custom error types for the bot

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
        retry_count: u32,
    },

    #[error("API error from {provider}: {message}")]
    Api { provider: String, message: String },

    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Data parsing error: {context}")]
    DataParsing {
        context: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Storage error: {context}")]
    Storage {
        context: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Execution failed for {pool}: {message}")]
    Execution { pool: String, message: String },
}

pub type BotResult<T> = Result<T, BotError>;

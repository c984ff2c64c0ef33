// src/errors.rs

use thiserror::Error;

pub type ParleyResult<T> = Result<T, ParleyError>;

#[derive(Debug, Error)]
pub enum ParleyError {
    #[error("{0}")]
    Api(String),

    #[error("{0}")]
    Config(String),

    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ParleyError {
    pub fn api_error(msg: impl Into<String>) -> Self {
        ParleyError::Api(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        ParleyError::Config(msg.into())
    }
}

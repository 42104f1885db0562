//! Errors of the terminal client itself.
//!
//! Server-side failures do not land here: the client maps those to
//! `ClientError` so the screens can show them inline instead of
//! tearing the whole UI down.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("terminal error: {0}")]
    Terminal(String),
}

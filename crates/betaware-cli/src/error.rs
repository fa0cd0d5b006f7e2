use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] betaware_core::Error),
    #[error(transparent)]
    Gateway(#[from] betaware_core::GatewayError),
    #[error(transparent)]
    Face(#[from] betaware_core::face::FaceAuthError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Password cannot be empty")]
    EmptyPassword,
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),
    #[error("Could not read image {path}: {source}")]
    ImageRead { path: String, source: io::Error },
}

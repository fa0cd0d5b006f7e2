//! User-facing gateway errors.

use thiserror::Error;

use crate::remote::RemoteError;

pub(crate) const LOGIN_FAILED: &str = "Could not log in";
pub(crate) const REGISTRATION_FAILED: &str = "Could not complete registration";
pub(crate) const CREATE_BET_FAILED: &str = "Could not create bet";
pub(crate) const LIST_BETS_FAILED: &str = "Could not list bets";
pub(crate) const LIST_BETS_BY_RANGE_FAILED: &str = "Could not list bets for the selected period";

/// Every variant renders as a message that can be shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("User not found")]
    UserNotFound,
    #[error("{0}")]
    InvalidCredentials(String),
    #[error("This username is already in use")]
    UsernameTaken,
    #[error("This email is already in use")]
    EmailTaken,
    #[error("This CPF is already in use")]
    NationalIdTaken,
    #[error("{0}")]
    Registration(String),
    #[error("{0}")]
    CreateBet(String),
    #[error("{0}")]
    ListBets(String),
    #[error("{0}")]
    ListBetsByRange(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("Local storage error: {0}")]
    LocalStorage(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

impl From<crate::Error> for GatewayError {
    fn from(error: crate::Error) -> Self {
        Self::LocalStorage(error.to_string())
    }
}

/// The server's own message when it sent one, otherwise `fallback`.
pub(crate) fn remote_message(error: &RemoteError, fallback: &str) -> String {
    error
        .server_message()
        .map_or_else(|| fallback.to_string(), ToString::to_string)
}

/// Map a registration failure message to the field it complains about.
pub(crate) fn registration_conflict(message: &str) -> Option<GatewayError> {
    let message = message.to_ascii_lowercase();
    if message.contains("username") {
        Some(GatewayError::UsernameTaken)
    } else if message.contains("email") {
        Some(GatewayError::EmailTaken)
    } else if message.contains("cpf") {
        Some(GatewayError::NationalIdTaken)
    } else {
        None
    }
}

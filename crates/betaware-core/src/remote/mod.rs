//! Remote REST API contract.

mod http;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{Bet, Credentials, DateRange, NewBet, Session, User};

pub use http::{HttpRemoteApi, DEFAULT_API_BASE_URL};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error("Remote API request failed: {0}")]
    Transport(String),
    #[error("Remote API returned HTTP {status}{}", message_suffix(.message))]
    Api { status: u16, message: Option<String> },
    #[error("Invalid remote API payload: {0}")]
    InvalidPayload(String),
}

impl RemoteError {
    /// Message supplied by the server in its error body, if any
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api {
                message: Some(message),
                ..
            } => Some(message.as_str()),
            _ => None,
        }
    }

    /// Build an API error from a status code and raw response body.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        Self::Api {
            status,
            message: parse_error_message(body),
        }
    }
}

pub type RemoteResult<T> = Result<T, RemoteError>;

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|message| format!(": {message}"))
        .unwrap_or_default()
}

/// Operations offered by the BetAware REST API.
///
/// Every call except `health` carries the locally stored bearer token when
/// one exists.
#[async_trait]
pub trait RemoteApi: Send + Sync {
    /// `GET /health`
    async fn health(&self) -> RemoteResult<()>;

    /// `POST /auth/login`
    async fn login(&self, token: Option<&str>, credentials: &Credentials) -> RemoteResult<Session>;

    /// `POST /auth/register`
    async fn register(&self, token: Option<&str>, user: &User) -> RemoteResult<()>;

    /// `POST /auth/logout`
    async fn logout(&self, token: Option<&str>) -> RemoteResult<()>;

    /// `POST /apostas`
    async fn create_bet(&self, token: Option<&str>, bet: &NewBet) -> RemoteResult<Bet>;

    /// `GET /apostas`
    async fn list_bets(&self, token: Option<&str>) -> RemoteResult<Vec<Bet>>;

    /// `GET /apostas/periodo?inicio=&fim=`
    async fn list_bets_by_range(
        &self,
        token: Option<&str>,
        range: &DateRange,
    ) -> RemoteResult<Vec<Bet>>;
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    error: Option<String>,
}

fn parse_error_message(body: &str) -> Option<String> {
    let payload = serde_json::from_str::<ApiErrorBody>(body).ok()?;
    payload
        .message
        .or(payload.error)
        .map(|message| message.trim().to_string())
        .filter(|message| !message.is_empty())
}

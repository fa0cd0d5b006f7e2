//! reqwest-backed client for the BetAware REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::{RemoteApi, RemoteError, RemoteResult};
use crate::error::{Error, Result};
use crate::models::{Bet, Credentials, DateRange, NewBet, Session, User};
use crate::util::{compact_text, normalize_base_url};

/// Base URL used when nothing is configured
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/v1";

#[derive(Debug, Clone)]
pub struct HttpRemoteApi {
    base_url: String,
    client: Client,
}

impl HttpRemoteApi {
    /// Builds a client rooted at `base_url` (including the `/api/v1` prefix).
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self> {
        let base_url = normalize_base_url(base_url.as_ref()).map_err(Error::Config)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| Error::Config(format!("Failed to construct HTTP client: {error}")))?;
        Ok(Self { base_url, client })
    }

    /// Returns the normalized API base URL used by this client.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, route: &str, token: Option<&str>) -> RequestBuilder {
        let request = self
            .client
            .request(method, format!("{}{}", self.base_url, route))
            .header(reqwest::header::ACCEPT, "application/json");
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(request: RequestBuilder) -> RemoteResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|error| RemoteError::Transport(error.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!(
            "Remote API returned HTTP {}: {}",
            status.as_u16(),
            compact_text(&body)
        );
        Err(RemoteError::from_response(status.as_u16(), &body))
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> RemoteResult<T> {
        let response = Self::send(request).await?;
        let body = response
            .text()
            .await
            .map_err(|error| RemoteError::Transport(error.to_string()))?;
        serde_json::from_str(&body).map_err(|error| {
            RemoteError::InvalidPayload(format!("{error}: {}", compact_text(&body)))
        })
    }
}

#[async_trait]
impl RemoteApi for HttpRemoteApi {
    async fn health(&self) -> RemoteResult<()> {
        Self::send(self.request(Method::GET, "/health", None)).await?;
        Ok(())
    }

    async fn login(&self, token: Option<&str>, credentials: &Credentials) -> RemoteResult<Session> {
        tracing::debug!("POST /auth/login for {}", credentials.username);
        Self::send_json(
            self.request(Method::POST, "/auth/login", token)
                .json(credentials),
        )
        .await
    }

    async fn register(&self, token: Option<&str>, user: &User) -> RemoteResult<()> {
        tracing::debug!("POST /auth/register for {}", user.username);
        Self::send(
            self.request(Method::POST, "/auth/register", token)
                .json(user),
        )
        .await?;
        Ok(())
    }

    async fn logout(&self, token: Option<&str>) -> RemoteResult<()> {
        Self::send(self.request(Method::POST, "/auth/logout", token)).await?;
        Ok(())
    }

    async fn create_bet(&self, token: Option<&str>, bet: &NewBet) -> RemoteResult<Bet> {
        Self::send_json(self.request(Method::POST, "/apostas", token).json(bet)).await
    }

    async fn list_bets(&self, token: Option<&str>) -> RemoteResult<Vec<Bet>> {
        Self::send_json(self.request(Method::GET, "/apostas", token)).await
    }

    async fn list_bets_by_range(
        &self,
        token: Option<&str>,
        range: &DateRange,
    ) -> RemoteResult<Vec<Bet>> {
        let (start, end) = range.query_bounds();
        Self::send_json(
            self.request(Method::GET, "/apostas/periodo", token)
                .query(&[("inicio", start), ("fim", end)]),
        )
        .await
    }
}

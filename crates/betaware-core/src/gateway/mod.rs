//! Online/offline data-access gateway.
//!
//! Each operation reads the availability flag once and is routed either to
//! the remote API or to the local mirror. Successful remote reads and writes
//! are copied into the mirror so history stays available offline. Nothing is
//! reconciled between the two stores: the last write wins.

mod error;
#[cfg(test)]
pub(crate) mod test_support;

use chrono::Utc;

use crate::health::{HealthMonitor, HealthState};
use crate::mirror::LocalMirror;
use crate::models::{filter_by_range, Bet, BetId, Credentials, DateRange, NewBet, Session, User};
use crate::remote::RemoteApi;
use crate::store::KeyValueStore;

use error::{
    registration_conflict, remote_message, CREATE_BET_FAILED, LIST_BETS_BY_RANGE_FAILED,
    LIST_BETS_FAILED, LOGIN_FAILED, REGISTRATION_FAILED,
};
pub use error::{GatewayError, GatewayResult};

pub struct Gateway<R, S> {
    remote: R,
    mirror: LocalMirror<S>,
    health: HealthState,
}

impl<R: RemoteApi, S: KeyValueStore> Gateway<R, S> {
    pub const fn new(remote: R, store: S, health: HealthState) -> Self {
        Self {
            remote,
            mirror: LocalMirror::new(store),
            health,
        }
    }

    pub const fn health(&self) -> &HealthState {
        &self.health
    }

    pub const fn remote(&self) -> &R {
        &self.remote
    }

    pub const fn mirror(&self) -> &LocalMirror<S> {
        &self.mirror
    }

    /// A monitor that probes this gateway's remote and updates its flag.
    pub fn monitor(&self) -> HealthMonitor<R>
    where
        R: Clone,
    {
        HealthMonitor::new(self.remote.clone(), self.health.clone())
    }

    fn is_online(&self) -> bool {
        self.health.is_available()
    }

    pub async fn login(&self, credentials: &Credentials) -> GatewayResult<Session> {
        if !self.is_online() {
            let users = self.mirrored_users_or_empty().await;
            let Some(user) = users.iter().find(|user| user.matches(credentials)) else {
                return Err(GatewayError::UserNotFound);
            };

            let session = Session::offline(user);
            self.mirror.save_session(&session).await?;
            tracing::info!("Logged in offline as {}", session.username);
            return Ok(session);
        }

        let token = self.stored_token().await;
        let session = self
            .remote
            .login(token.as_deref(), credentials)
            .await
            .map_err(|error| {
                tracing::debug!("Remote login failed: {}", error);
                GatewayError::InvalidCredentials(remote_message(&error, LOGIN_FAILED))
            })?;

        self.mirror.save_session(&session).await?;
        tracing::info!("Logged in as {}", session.username);
        Ok(session)
    }

    pub async fn register(&self, user: &User) -> GatewayResult<()> {
        if !self.is_online() {
            let mut users = self.mirror.users().await?.unwrap_or_default();

            if users.iter().any(|existing| existing.username == user.username) {
                return Err(GatewayError::UsernameTaken);
            }
            if users.iter().any(|existing| existing.email == user.email) {
                return Err(GatewayError::EmailTaken);
            }
            if users
                .iter()
                .any(|existing| existing.national_id == user.national_id)
            {
                return Err(GatewayError::NationalIdTaken);
            }

            users.push(user.clone());
            self.mirror.save_users(&users).await?;
            tracing::info!("Registered {} in the local mirror", user.username);
            return Ok(());
        }

        let token = self.stored_token().await;
        self.remote
            .register(token.as_deref(), user)
            .await
            .map_err(|error| {
                tracing::debug!("Remote registration failed: {}", error);
                let message = remote_message(&error, REGISTRATION_FAILED);
                registration_conflict(&message).unwrap_or(GatewayError::Registration(message))
            })
    }

    pub async fn create_bet(&self, new_bet: NewBet) -> GatewayResult<Bet> {
        let new_bet = new_bet.normalized().map_err(GatewayError::InvalidInput)?;
        let local_bet = new_bet.clone().into_bet(BetId::now(), Utc::now());

        if !self.is_online() {
            self.mirror.append_bet(&local_bet).await?;
            tracing::debug!("Stored bet {} in the local mirror", local_bet.id);
            return Ok(local_bet);
        }

        let token = self.stored_token().await;
        let created = self
            .remote
            .create_bet(token.as_deref(), &new_bet)
            .await
            .map_err(|error| {
                tracing::debug!("Remote bet creation failed: {}", error);
                GatewayError::CreateBet(remote_message(&error, CREATE_BET_FAILED))
            })?;

        // The mirror keeps the server's record, not the client draft
        if let Err(error) = self.mirror.append_bet(&created).await {
            tracing::warn!("Failed to mirror created bet {}: {}", created.id, error);
        }
        Ok(created)
    }

    pub async fn list_bets(&self) -> GatewayResult<Vec<Bet>> {
        if !self.is_online() {
            return Ok(self.mirrored_bets().await.unwrap_or_default());
        }

        let token = self.stored_token().await;
        match self.remote.list_bets(token.as_deref()).await {
            Ok(bets) => {
                if let Err(error) = self.mirror.save_bets(&bets).await {
                    tracing::warn!("Failed to refresh the local bet mirror: {}", error);
                }
                Ok(bets)
            }
            Err(error) => {
                tracing::warn!("Listing bets remotely failed: {}", error);
                self.mirrored_bets().await.ok_or_else(|| {
                    GatewayError::ListBets(remote_message(&error, LIST_BETS_FAILED))
                })
            }
        }
    }

    pub async fn list_bets_by_range(&self, range: &DateRange) -> GatewayResult<Vec<Bet>> {
        if !self.is_online() {
            let bets = self.mirrored_bets().await.unwrap_or_default();
            return Ok(filter_by_range(bets, range));
        }

        let token = self.stored_token().await;
        match self.remote.list_bets_by_range(token.as_deref(), range).await {
            Ok(bets) => Ok(bets),
            Err(error) => {
                tracing::warn!("Listing bets by period remotely failed: {}", error);
                self.mirrored_bets()
                    .await
                    .map(|bets| filter_by_range(bets, range))
                    .ok_or_else(|| {
                        GatewayError::ListBetsByRange(remote_message(
                            &error,
                            LIST_BETS_BY_RANGE_FAILED,
                        ))
                    })
            }
        }
    }

    /// Best-effort remote logout; the local session is always cleared.
    pub async fn logout(&self) {
        if self.is_online() {
            let token = self.stored_token().await;
            if let Err(error) = self.remote.logout(token.as_deref()).await {
                tracing::warn!("Remote logout failed: {}", error);
            }
        }

        if let Err(error) = self.mirror.clear_session().await {
            tracing::warn!("Failed to clear the local session: {}", error);
        }
    }

    /// True when a token is stored locally. The token is not validated.
    pub async fn is_authenticated(&self) -> bool {
        self.stored_token().await.is_some()
    }

    pub async fn current_session(&self) -> GatewayResult<Option<Session>> {
        Ok(self.mirror.session().await?)
    }

    async fn stored_token(&self) -> Option<String> {
        match self.mirror.token().await {
            Ok(token) => token,
            Err(error) => {
                tracing::warn!("Failed to read the stored token: {}", error);
                None
            }
        }
    }

    async fn mirrored_users_or_empty(&self) -> Vec<User> {
        match self.mirror.users().await {
            Ok(users) => users.unwrap_or_default(),
            Err(error) => {
                tracing::warn!("Failed to read mirrored users: {}", error);
                Vec::new()
            }
        }
    }

    /// `None` when nothing is mirrored or the mirror cannot be read.
    async fn mirrored_bets(&self) -> Option<Vec<Bet>> {
        match self.mirror.bets().await {
            Ok(bets) => bets,
            Err(error) => {
                tracing::warn!("Failed to read mirrored bets: {}", error);
                None
            }
        }
    }
}

//! Typed view of the on-device mirror.
//!
//! Reads return `Ok(None)` when nothing is stored and `Err` when the stored
//! value could not be read or decoded, so callers can choose between
//! degrading silently and alerting the user.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::models::{Bet, Session, User};
use crate::store::KeyValueStore;

/// Raw bearer token
pub const TOKEN_KEY: &str = "token";
/// JSON-encoded [`Session`]
pub const SESSION_KEY: &str = "usuarioLogado";
/// JSON array of [`User`] registered while offline
pub const USERS_KEY: &str = "usuarios";
/// JSON array of [`Bet`]
pub const BETS_KEY: &str = "apostas";

pub struct LocalMirror<S> {
    store: S,
}

impl<S: KeyValueStore> LocalMirror<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub async fn token(&self) -> Result<Option<String>> {
        Ok(self
            .store
            .get(TOKEN_KEY)
            .await?
            .filter(|token| !token.is_empty()))
    }

    pub async fn set_token(&self, token: &str) -> Result<()> {
        self.store.set(TOKEN_KEY, token).await
    }

    pub async fn session(&self) -> Result<Option<Session>> {
        self.read_json(SESSION_KEY).await
    }

    /// Persist the session and its token together
    pub async fn save_session(&self, session: &Session) -> Result<()> {
        self.write_json(SESSION_KEY, session).await?;
        self.set_token(&session.token).await
    }

    /// Remove the token and the session; both removals are always attempted
    pub async fn clear_session(&self) -> Result<()> {
        let token = self.store.remove(TOKEN_KEY).await;
        let session = self.store.remove(SESSION_KEY).await;
        token.and(session)
    }

    pub async fn users(&self) -> Result<Option<Vec<User>>> {
        self.read_json(USERS_KEY).await
    }

    pub async fn save_users(&self, users: &[User]) -> Result<()> {
        self.write_json(USERS_KEY, users).await
    }

    pub async fn bets(&self) -> Result<Option<Vec<Bet>>> {
        self.read_json(BETS_KEY).await
    }

    pub async fn save_bets(&self, bets: &[Bet]) -> Result<()> {
        self.write_json(BETS_KEY, bets).await
    }

    /// Read-modify-write append; not atomic against concurrent appends
    pub async fn append_bet(&self, bet: &Bet) -> Result<()> {
        let mut bets = self.bets().await?.unwrap_or_default();
        bets.push(bet.clone());
        self.save_bets(&bets).await
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.store.get(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn write_json<T: Serialize + ?Sized + Sync>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw).await
    }
}

//! In-crate fakes for exercising the gateway without a server.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::error::{Error, Result};
use crate::models::{Bet, BetId, Credentials, DateRange, NewBet, Session, User};
use crate::remote::{RemoteApi, RemoteError, RemoteResult};
use crate::store::KeyValueStore;

/// IDs the fake server assigns, far from client-side millisecond IDs
const SERVER_ID_BASE: i64 = 1_000;

#[derive(Default)]
struct ServerState {
    unreachable: bool,
    users: Vec<User>,
    bets: Vec<Bet>,
    tokens_seen: Vec<Option<String>>,
    health_calls: usize,
    logout_calls: usize,
}

/// Behaves like the REST API: keeps users and bets, assigns IDs and can be
/// switched to unreachable.
#[derive(Clone, Default)]
pub struct ScriptedRemote {
    state: Arc<Mutex<ServerState>>,
}

impl ScriptedRemote {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, ServerState> {
        self.state.lock().unwrap()
    }

    pub fn set_reachable(&self, reachable: bool) {
        self.state().unreachable = !reachable;
    }

    pub fn add_user(&self, user: User) {
        self.state().users.push(user);
    }

    pub fn add_bet(&self, bet: Bet) {
        self.state().bets.push(bet);
    }

    pub fn bets(&self) -> Vec<Bet> {
        self.state().bets.clone()
    }

    pub fn health_calls(&self) -> usize {
        self.state().health_calls
    }

    pub fn logout_calls(&self) -> usize {
        self.state().logout_calls
    }

    pub fn last_token(&self) -> Option<String> {
        self.state().tokens_seen.last().cloned().flatten()
    }

    fn enter(&self, token: Option<&str>) -> RemoteResult<MutexGuard<'_, ServerState>> {
        let mut state = self.state();
        if state.unreachable {
            return Err(RemoteError::Transport("connection refused".to_string()));
        }
        state.tokens_seen.push(token.map(ToString::to_string));
        Ok(state)
    }
}

#[async_trait]
impl RemoteApi for ScriptedRemote {
    async fn health(&self) -> RemoteResult<()> {
        let mut state = self.state();
        state.health_calls += 1;
        if state.unreachable {
            Err(RemoteError::Transport("connection refused".to_string()))
        } else {
            Ok(())
        }
    }

    async fn login(&self, token: Option<&str>, credentials: &Credentials) -> RemoteResult<Session> {
        let state = self.enter(token)?;
        let user = state
            .users
            .iter()
            .find(|user| user.matches(credentials))
            .ok_or_else(|| {
                RemoteError::from_response(401, r#"{"message": "Invalid username or password"}"#)
            })?;
        Ok(Session {
            token: format!("server-token-{}", user.username),
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            role: "USER".to_string(),
        })
    }

    async fn register(&self, token: Option<&str>, user: &User) -> RemoteResult<()> {
        let mut state = self.enter(token)?;
        let conflict = state.users.iter().find_map(|existing| {
            if existing.username == user.username {
                Some("username already exists")
            } else if existing.email == user.email {
                Some("email already exists")
            } else if existing.national_id == user.national_id {
                Some("cpf already exists")
            } else {
                None
            }
        });
        if let Some(message) = conflict {
            return Err(RemoteError::Api {
                status: 409,
                message: Some(message.to_string()),
            });
        }
        state.users.push(user.clone());
        Ok(())
    }

    async fn logout(&self, token: Option<&str>) -> RemoteResult<()> {
        let mut state = self.enter(token)?;
        state.logout_calls += 1;
        Ok(())
    }

    async fn create_bet(&self, token: Option<&str>, bet: &NewBet) -> RemoteResult<Bet> {
        let mut state = self.enter(token)?;
        let id = SERVER_ID_BASE + i64::try_from(state.bets.len()).unwrap_or(0);
        // Server clock differs from the client's
        let created = bet
            .clone()
            .into_bet(BetId::new(id), Utc::now() - Duration::seconds(5));
        state.bets.push(created.clone());
        Ok(created)
    }

    async fn list_bets(&self, token: Option<&str>) -> RemoteResult<Vec<Bet>> {
        Ok(self.enter(token)?.bets.clone())
    }

    async fn list_bets_by_range(
        &self,
        token: Option<&str>,
        range: &DateRange,
    ) -> RemoteResult<Vec<Bet>> {
        let state = self.enter(token)?;
        Ok(state
            .bets
            .iter()
            .filter(|bet| range.contains(bet.created_at))
            .cloned()
            .collect())
    }
}

/// Store whose every operation fails, for the degraded-storage paths.
#[derive(Clone, Default)]
pub struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(Error::Database("disk I/O error".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Err(Error::Database("disk I/O error".to_string()))
    }

    async fn remove(&self, _key: &str) -> Result<()> {
        Err(Error::Database("disk I/O error".to_string()))
    }
}

pub fn sample_user(username: &str, email: &str, national_id: &str) -> User {
    User {
        username: username.to_string(),
        full_name: format!("{username} Silva"),
        email: email.to_string(),
        national_id: national_id.to_string(),
        postal_code: "01001000".to_string(),
        address: "Praça da Sé, São Paulo - SP".to_string(),
        password: "secret".to_string(),
    }
}

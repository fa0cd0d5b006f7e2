//! betaware-core - Core library for BetAware
//!
//! This crate contains the shared models, the on-device mirror, the remote
//! API client and the online/offline gateway used by BetAware front ends.

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod face;
pub mod gateway;
pub mod health;
pub mod mirror;
pub mod models;
pub mod remote;
pub mod report;
pub mod store;
pub mod util;

pub use error::{Error, Result};
pub use gateway::{Gateway, GatewayError, GatewayResult};
pub use health::{HealthMonitor, HealthState};
pub use models::{Bet, BetId, Credentials, DateRange, NewBet, Outcome, Session, User};

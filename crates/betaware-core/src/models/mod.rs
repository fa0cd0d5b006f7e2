//! Data models for BetAware

mod bet;
mod session;
mod user;

pub use bet::{filter_by_range, Bet, BetId, DateRange, NewBet, Outcome};
pub use session::{Session, DEFAULT_ROLE, OFFLINE_TOKEN};
pub use user::{Credentials, User};

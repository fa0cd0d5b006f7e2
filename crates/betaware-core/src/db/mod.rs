//! Database layer for the on-device mirror

mod connection;
mod migrations;

pub use connection::Database;

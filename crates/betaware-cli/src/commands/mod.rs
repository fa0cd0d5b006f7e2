pub mod auth_cmd;
pub mod bet;
pub mod catalog;
pub mod common;
pub mod completions;
pub mod face;
pub mod report;
pub mod status;

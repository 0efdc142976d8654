//! # Series Scoreboard
//!
//! A local scoreboard for esports match series: teams, per-match kills and finishing
//! positions, and cumulative standings.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (tournaments, teams, matches, standings)
//! - **calculate**: Point table, cumulative standings, rankings, series generation
//! - **session**: Operator state and validated mutations
//! - **storage**: Session state file
//! - **config**: Configuration loading and validation

pub mod calculate;
pub mod config;
pub mod models;
pub mod session;
pub mod storage;

pub use models::*;
pub use session::{Session, SessionError};

//! Core data models for the scoreboard.

mod ids;
mod matches;
mod snapshot;
mod standings;
mod team;
mod tournament;

pub use ids::*;
pub use matches::*;
pub use snapshot::*;
pub use standings::*;
pub use team::*;
pub use tournament::*;

//! Crate-wide error type
//!
//! The simulation itself never fails; errors only come from building
//! transforms and loading configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// A waypoint path whose speed list does not match its target list
    #[error("waypoint path has {targets} targets but {speeds} speeds")]
    PathLength { targets: usize, speeds: usize },

    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
}

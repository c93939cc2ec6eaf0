use super::config::ConfigError;
use crate::core::models::groups::GroupError;
use crate::core::models::points::PointSetError;
use crate::core::permutation::MatchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AlignError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Invalid point sets: {source}")]
    PointSet {
        #[from]
        source: PointSetError,
    },

    #[error("Invalid equivalence groups: {source}")]
    Groups {
        #[from]
        source: GroupError,
    },

    #[error("Permutation matching failed: {source}")]
    Matching {
        #[from]
        source: MatchError,
    },

    #[error("Internal logic error: {0}")]
    Internal(String),
}

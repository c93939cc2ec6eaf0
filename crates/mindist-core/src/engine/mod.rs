//! # Engine Module
//!
//! The stochastic rotation search and everything it needs to run.
//!
//! - **Configuration** ([`config`]) - search, landscape and assignment parameters with validation
//! - **Errors** ([`error`]) - the error type returned by alignment workflows
//! - **Progress** ([`progress`]) - optional callbacks for front ends
//! - **Candidates** ([`state`]) - the bounded, sorted collection of the best rotations found
//! - **Steps** ([`step`]) - random rotation proposals
//! - **Search** ([`basin_hopping`]) - Metropolis basin hopping over rotation space

pub mod basin_hopping;
pub mod config;
pub mod error;
pub mod progress;
pub mod state;
pub mod step;

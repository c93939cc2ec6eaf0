//! # mindist
//!
//! Minimum distance between two atomic clusters after removing translational,
//! global rotational and permutational symmetry.
//!
//! ## Architecture
//!
//! The library follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`PointSet`,
//!   `EquivalenceGroups`, `Permutation`, `AxisAngle`), rigid-body geometry,
//!   optimal assignment solvers and the permutation-invariant overlap landscape.
//!
//! - **[`engine`]: The Search.** Configuration, errors, progress reporting and the
//!   basin-hopping search over rotation space together with its bounded
//!   collection of best candidates.
//!
//! - **[`workflows`]: The Public API.** The alignment orchestrator that ties the
//!   search and the permutation matcher together and returns the final distance
//!   and aligned coordinates.

pub mod core;
pub mod engine;
pub mod workflows;

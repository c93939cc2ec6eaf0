//! # Core Module
//!
//! Stateless building blocks for cluster alignment.
//!
//! - **Data Models** ([`models`]) - point sets, equivalence groups, permutations and rotations
//! - **Geometry** ([`utils`]) - centering, rotation and exact rigid alignment
//! - **File I/O** ([`io`]) - reading and writing XYZ structure files
//! - **Assignment** ([`assignment`]) - optimal and heuristic solvers for the assignment problem
//! - **Permutation Matching** ([`permutation`]) - best relabeling within equivalence groups
//! - **Landscapes** ([`potentials`]) - the permutation-invariant overlap potential over rotations

pub mod assignment;
pub mod io;
pub mod models;
pub mod permutation;
pub mod potentials;
pub mod utils;

//! # Workflows Module
//!
//! High-level entry points that run a complete alignment from raw coordinates
//! to the final distance.
//!
//! ## Overview
//!
//! A workflow validates its inputs, removes translational symmetry, drives the
//! rotation search from [`crate::engine`], resolves permutations with the
//! assignment solvers from [`crate::core`] and returns a self-contained result.
//!
//! - **Alignment Workflow** ([`align`]) - minimum distance between two clusters
//!   under translation, rotation and in-group relabeling.

pub mod align;

//! Data models shared by every layer of the library.
//!
//! A [`points::PointSet`] is the working representation of a cluster. Equivalence
//! groups restrict which points may be relabeled, a [`permutation::Permutation`]
//! records one such relabeling, and [`rotation::AxisAngle`] is the rotation
//! parameterization explored by the search.

pub mod groups;
pub mod permutation;
pub mod points;
pub mod rotation;

//! Objective landscapes over rotation space.
//!
//! The basin-hopping search in [`crate::engine`] is generic over
//! [`RotationLandscape`]; [`overlap::OverlapPotential`] is the landscape used
//! for cluster alignment.

pub mod overlap;

use nalgebra::Rotation3;

/// The result of locally minimizing a landscape from a starting rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Relaxed {
    pub rotation: Rotation3<f64>,
    pub energy: f64,
    pub iterations: usize,
}

pub trait RotationLandscape {
    fn energy(&self, rotation: &Rotation3<f64>) -> f64;

    /// Local minimization starting at `start`. Landscapes without a local
    /// optimizer return the starting point unchanged.
    fn relax(&self, start: &Rotation3<f64>) -> Relaxed {
        Relaxed {
            rotation: *start,
            energy: self.energy(start),
            iterations: 0,
        }
    }

    /// The lowest energy attainable, when it is known in advance.
    fn global_minimum(&self) -> Option<f64> {
        None
    }
}

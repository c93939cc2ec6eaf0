use super::{Relaxed, RotationLandscape};
use crate::core::models::groups::EquivalenceGroups;
use crate::core::models::points::{PointSet, PointSetError};
use crate::core::utils::geometry::optimal_rotation;
use nalgebra::{Matrix3, Point3, Rotation3};
use tracing::trace;

const MIN_WEIGHT_NORM: f64 = 1e-300;

/// Permutation-invariant overlap between a fixed reference and a rotated
/// moving structure.
///
/// For a rotation `R` the energy is
///
/// ```text
/// E(R) = - Σ_blocks Σ_{i,j ∈ block} exp(-|a_i - R b_j|² / (2 L²))
/// ```
///
/// where blocks are the equivalence groups plus a singleton block for every
/// fixed index. Because every point of a block interacts with every other
/// point of the same block, relabeling within a block leaves `E` unchanged.
#[derive(Debug, Clone)]
pub struct OverlapPotential {
    reference: PointSet,
    moving: PointSet,
    blocks: Vec<Vec<usize>>,
    length_scale: f64,
    relax_schedule: Vec<f64>,
    relax_iterations: usize,
    relax_tolerance: f64,
    global_minimum: f64,
}

impl OverlapPotential {
    /// Both structures are expected to be centered on the origin.
    pub fn new(
        reference: &PointSet,
        moving: &PointSet,
        groups: &EquivalenceGroups,
        length_scale: f64,
    ) -> Result<Self, PointSetError> {
        reference.check_same_len(moving)?;
        if groups.num_points() != reference.len() {
            return Err(PointSetError::LengthMismatch {
                left: reference.len(),
                right: groups.num_points(),
            });
        }

        let blocks: Vec<Vec<usize>> = groups.blocks().collect();
        let global_minimum = -blocks
            .iter()
            .map(|block| {
                let s_ref = self_overlap(reference, block, length_scale);
                let s_mov = self_overlap(moving, block, length_scale);
                (s_ref * s_mov).sqrt()
            })
            .sum::<f64>();

        Ok(Self {
            reference: reference.clone(),
            moving: moving.clone(),
            blocks,
            length_scale,
            relax_schedule: vec![1.0],
            relax_iterations: 100,
            relax_tolerance: 1e-12,
            global_minimum,
        })
    }

    /// Configures local relaxation: one pass per entry of `schedule`, each at
    /// `length_scale * factor`, with at most `max_iterations` updates per pass.
    pub fn with_relaxation(
        mut self,
        schedule: &[f64],
        max_iterations: usize,
        tolerance: f64,
    ) -> Self {
        self.relax_schedule = if schedule.is_empty() {
            vec![1.0]
        } else {
            schedule.to_vec()
        };
        self.relax_iterations = max_iterations;
        self.relax_tolerance = tolerance;
        self
    }

    pub fn length_scale(&self) -> f64 {
        self.length_scale
    }

    pub fn energy_at_scale(&self, rotation: &Rotation3<f64>, length_scale: f64) -> f64 {
        let rotated = self.rotated_moving(rotation);
        let inv_two_l2 = 1.0 / (2.0 * length_scale * length_scale);
        -self
            .blocks
            .iter()
            .map(|block| {
                block
                    .iter()
                    .flat_map(|&i| block.iter().map(move |&j| (i, j)))
                    .map(|(i, j)| {
                        (-(self.reference[i] - rotated[j]).norm_squared() * inv_two_l2).exp()
                    })
                    .sum::<f64>()
            })
            .sum::<f64>()
    }

    fn rotated_moving(&self, rotation: &Rotation3<f64>) -> Vec<Point3<f64>> {
        self.moving.iter().map(|p| rotation * p).collect()
    }

    /// One majorize-minimize update: the exponential is convex in `a·Rb`, so
    /// the weighted rigid alignment with the current kernel weights never
    /// increases the energy at this length scale.
    fn relaxation_step(
        &self,
        rotation: &Rotation3<f64>,
        length_scale: f64,
    ) -> Option<Rotation3<f64>> {
        let rotated = self.rotated_moving(rotation);
        let inv_two_l2 = 1.0 / (2.0 * length_scale * length_scale);

        let mut covariance = Matrix3::zeros();
        for block in &self.blocks {
            for &i in block {
                let a = &self.reference[i];
                for &j in block {
                    let w = (-(a - rotated[j]).norm_squared() * inv_two_l2).exp();
                    covariance += w * self.moving[j].coords * a.coords.transpose();
                }
            }
        }

        if covariance.norm() < MIN_WEIGHT_NORM {
            return None;
        }
        Some(optimal_rotation(&covariance))
    }
}

fn self_overlap(points: &PointSet, block: &[usize], length_scale: f64) -> f64 {
    let inv_two_l2 = 1.0 / (2.0 * length_scale * length_scale);
    block
        .iter()
        .flat_map(|&i| block.iter().map(move |&j| (i, j)))
        .map(|(i, j)| (-(points[i] - points[j]).norm_squared() * inv_two_l2).exp())
        .sum()
}

impl RotationLandscape for OverlapPotential {
    fn energy(&self, rotation: &Rotation3<f64>) -> f64 {
        self.energy_at_scale(rotation, self.length_scale)
    }

    fn relax(&self, start: &Rotation3<f64>) -> Relaxed {
        let mut rotation = *start;
        let mut iterations = 0;

        for &factor in &self.relax_schedule {
            let scale = self.length_scale * factor;
            let mut energy = self.energy_at_scale(&rotation, scale);
            for _ in 0..self.relax_iterations {
                let Some(next) = self.relaxation_step(&rotation, scale) else {
                    break;
                };
                iterations += 1;
                let next_energy = self.energy_at_scale(&next, scale);
                let change = energy - next_energy;
                rotation = next;
                energy = next_energy;
                if change.abs() < self.relax_tolerance * energy.abs().max(1.0) {
                    break;
                }
            }
        }

        let energy = self.energy(&rotation);
        trace!(iterations, energy, "Relaxed rotation on overlap landscape.");
        Relaxed {
            rotation,
            energy,
            iterations,
        }
    }

    /// `-Σ_blocks sqrt(S_ref · S_mov)` with `S` the self-overlap of each
    /// structure within a block. The Gaussian kernel is positive definite, so
    /// by Cauchy–Schwarz no rotation can go below this value, and isomers reach
    /// it exactly.
    fn global_minimum(&self) -> Option<f64> {
        Some(self.global_minimum)
    }
}

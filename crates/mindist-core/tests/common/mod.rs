#![allow(dead_code)]

use mindist::core::models::groups::EquivalenceGroups;
use mindist::core::models::permutation::Permutation;
use mindist::core::models::points::PointSet;
use mindist::core::utils::geometry::random_rotation;
use nalgebra::{Point3, Rotation3};
use rand::Rng;
use rand::seq::SliceRandom;

pub const MIN_SEPARATION: f64 = 0.9;

/// Random cluster of `n` points with every pair at least [`MIN_SEPARATION`]
/// apart, packed into a cube whose volume grows with `n`.
pub fn random_cluster<R: Rng>(n: usize, rng: &mut R) -> PointSet {
    let half_side = 0.8 * (n as f64).cbrt();
    let mut points: Vec<Point3<f64>> = Vec::with_capacity(n);
    while points.len() < n {
        let candidate = Point3::new(
            rng.gen_range(-half_side..half_side),
            rng.gen_range(-half_side..half_side),
            rng.gen_range(-half_side..half_side),
        );
        if points
            .iter()
            .all(|p| (p - candidate).norm() >= MIN_SEPARATION)
        {
            points.push(candidate);
        }
    }
    PointSet::new(points)
}

pub fn random_proper_rotation<R: Rng>(rng: &mut R) -> Rotation3<f64> {
    random_rotation(rng)
}

/// A random permutation that only exchanges indices within the same group.
pub fn random_in_group_permutation<R: Rng>(groups: &EquivalenceGroups, rng: &mut R) -> Permutation {
    let mut mapping: Vec<usize> = (0..groups.num_points()).collect();
    for group in groups.groups() {
        let mut shuffled = group.clone();
        shuffled.shuffle(rng);
        for (&slot, &source) in group.iter().zip(shuffled.iter()) {
            mapping[slot] = source;
        }
    }
    Permutation::new(mapping).expect("shuffling within groups yields a bijection")
}

/// `P(R X)`: a rotated, relabeled copy of `points`.
pub fn make_isomer<R: Rng>(points: &PointSet, groups: &EquivalenceGroups, rng: &mut R) -> PointSet {
    let rotation = random_proper_rotation(rng);
    let permutation = random_in_group_permutation(groups, rng);
    points
        .rotated(&rotation)
        .permuted(&permutation)
        .expect("permutation has the cluster's length")
}

pub fn line(n: usize) -> PointSet {
    PointSet::from((1..=n).map(|z| [0.0, 0.0, z as f64]).collect::<Vec<_>>())
}

pub fn respects_groups(permutation: &Permutation, groups: &EquivalenceGroups) -> bool {
    permutation
        .iter()
        .enumerate()
        .all(|(i, &j)| groups.same_group(i, j))
}

mod common;

use common::*;
use mindist::core::models::groups::EquivalenceGroups;
use mindist::core::models::permutation::Permutation;
use mindist::engine::config::AlignmentConfig;
use mindist::workflows::align::{minimize_distance, minimize_distance_flat};
use nalgebra::Vector3;
use rand::SeedableRng;
use rand::rngs::StdRng;

const ISOMER_TOLERANCE: f64 = 1e-6;

fn search_config(iterations: usize) -> AlignmentConfig {
    AlignmentConfig::builder()
        .iterations(iterations)
        .build()
        .unwrap()
}

#[test]
fn rotated_and_relabeled_cluster_is_recognized_as_isomer() {
    let mut rng = StdRng::seed_from_u64(2024);
    let x = random_cluster(13, &mut rng);
    let groups = EquivalenceGroups::all(x.len());
    let y = make_isomer(&x, &groups, &mut rng).translated(&Vector3::new(2.0, -1.0, 0.5));

    let result = minimize_distance(&x, &y, None, &search_config(300), 7).unwrap();

    assert!(result.distance < ISOMER_TOLERANCE, "distance = {}", result.distance);
    assert!(result.isomer_found);
    assert!(result.steps_taken < 300);
}

#[test]
fn binary_cluster_isomer_respects_species() {
    let mut rng = StdRng::seed_from_u64(77);
    let x = random_cluster(13, &mut rng);
    let groups =
        EquivalenceGroups::new(vec![(0..8).collect(), (8..13).collect()], x.len()).unwrap();
    let y = make_isomer(&x, &groups, &mut rng);

    let result = minimize_distance(&x, &y, Some(&groups), &search_config(300), 11).unwrap();

    assert!(result.distance < ISOMER_TOLERANCE, "distance = {}", result.distance);
    assert!(respects_groups(&result.permutation, &groups));
}

#[test]
fn partially_fixed_labels_stay_in_place() {
    let mut rng = StdRng::seed_from_u64(5);
    let x = random_cluster(9, &mut rng);
    let groups = EquivalenceGroups::new(vec![(0..6).collect()], x.len()).unwrap();
    let y = make_isomer(&x, &groups, &mut rng);

    let result = minimize_distance(&x, &y, Some(&groups), &search_config(300), 3).unwrap();

    assert!(result.distance < ISOMER_TOLERANCE, "distance = {}", result.distance);
    for fixed in 6..9 {
        assert_eq!(result.permutation[fixed], fixed);
    }
}

#[test]
fn different_clusters_never_reach_zero_distance() {
    let mut rng = StdRng::seed_from_u64(99);
    let x = random_cluster(10, &mut rng);
    let y = random_cluster(10, &mut rng);

    for seed in 0..4 {
        let result = minimize_distance(&x, &y, None, &search_config(50), seed).unwrap();
        assert!(result.distance > 1e-3, "seed {} gave {}", seed, result.distance);
        assert!(!result.isomer_found);
    }
}

#[test]
fn exact_copy_keeps_identity_permutation() {
    let mut rng = StdRng::seed_from_u64(1);
    let x = random_cluster(8, &mut rng);

    let result = minimize_distance(&x, &x, None, &AlignmentConfig::default(), 0).unwrap();

    assert!(result.distance < 1e-10);
    assert!(result.permutation.is_identity());
}

#[test]
fn same_seed_gives_same_result() {
    let mut rng = StdRng::seed_from_u64(42);
    let x = random_cluster(7, &mut rng);
    let y = random_cluster(7, &mut rng);
    let config = search_config(40);

    let a = minimize_distance(&x, &y, None, &config, 123).unwrap();
    let b = minimize_distance(&x, &y, None, &config, 123).unwrap();

    assert_eq!(a.distance, b.distance);
    assert_eq!(a.permutation, b.permutation);
    assert_eq!(a.steps_taken, b.steps_taken);
}

#[test]
fn colinear_swap_of_last_two_points_is_resolved() {
    let x = line(3);
    let y = x.permuted(&Permutation::new(vec![0, 2, 1]).unwrap()).unwrap();

    let result = minimize_distance(&x, &y, None, &AlignmentConfig::default(), 0).unwrap();

    assert!(result.distance < 1e-10);
    assert_eq!(result.permutation.as_slice(), &[0, 2, 1]);
}

#[test]
fn in_group_swap_on_a_line_is_resolved() {
    let x = line(4);
    let groups = EquivalenceGroups::new(vec![vec![0, 2], vec![1, 3]], 4).unwrap();
    let y = x.permuted(&Permutation::new(vec![2, 1, 0, 3]).unwrap()).unwrap();

    let result = minimize_distance(&x, &y, Some(&groups), &AlignmentConfig::default(), 0).unwrap();

    assert!(result.distance < 1e-10);
    assert!(respects_groups(&result.permutation, &groups));
}

#[test]
fn cross_group_swap_on_a_line_leaves_positive_distance() {
    let x = line(4);
    let groups = EquivalenceGroups::new(vec![vec![0, 2], vec![1, 3]], 4).unwrap();
    let y = x.permuted(&Permutation::new(vec![0, 2, 1, 3]).unwrap()).unwrap();

    let result = minimize_distance(&x, &y, Some(&groups), &AlignmentConfig::default(), 0).unwrap();

    assert!(respects_groups(&result.permutation, &groups));
    assert!((result.distance - 2.0f64.sqrt()).abs() < 1e-6);
}

#[test]
fn flat_coordinates_are_accepted() {
    let mut rng = StdRng::seed_from_u64(8);
    let x = random_cluster(6, &mut rng);
    let groups = EquivalenceGroups::all(x.len());
    let y = make_isomer(&x, &groups, &mut rng);

    let result =
        minimize_distance_flat(&x.to_flat(), &y.to_flat(), None, &search_config(200), 4).unwrap();

    assert!(result.distance < ISOMER_TOLERANCE);
    assert_eq!(result.aligned.to_flat().len(), 18);
}

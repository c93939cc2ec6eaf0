use crate::core::models::groups::EquivalenceGroups;
use crate::core::models::permutation::Permutation;
use crate::core::models::points::{PointSet, PointSetError};
use crate::core::models::rotation::AxisAngle;
use crate::core::permutation::{PermutationMatch, find_best_permutation};
use crate::core::potentials::RotationLandscape;
use crate::core::potentials::overlap::OverlapPotential;
use crate::core::utils::geometry::{align_rotation, center_of_mass_to_origin};
use crate::engine::basin_hopping::BasinHopping;
use crate::engine::config::AlignmentConfig;
use crate::engine::error::AlignError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::state::{Candidate, CandidateSet};
use crate::engine::step::RandomRotationStep;
use nalgebra::Rotation3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument};

#[derive(Debug, Clone)]
pub struct AlignmentResult {
    /// Euclidean distance between `reference` and `aligned`.
    pub distance: f64,
    /// `aligned[i]` is the rotated copy of moving point `permutation[i]`.
    pub permutation: Permutation,
    /// Rotation applied to the centered moving structure before relabeling.
    pub rotation: AxisAngle,
    /// The reference structure, centered on the origin.
    pub reference: PointSet,
    /// The moving structure, centered, rotated and relabeled onto `reference`.
    pub aligned: PointSet,
    /// Whether the rotation search reached the overlap landscape's global minimum.
    pub isomer_found: bool,
    pub steps_taken: usize,
    pub candidates_evaluated: usize,
}

impl AlignmentResult {
    pub fn rmsd(&self) -> f64 {
        (self.distance * self.distance / self.reference.len() as f64).sqrt()
    }
}

/// Aligns `moving` onto `reference` and returns the smallest distance found.
///
/// `groups` defaults to a single group containing every point.
#[instrument(skip_all, name = "alignment_workflow")]
pub fn run<R: Rng + ?Sized>(
    reference: &PointSet,
    moving: &PointSet,
    groups: Option<&EquivalenceGroups>,
    config: &AlignmentConfig,
    rng: &mut R,
    reporter: &ProgressReporter,
) -> Result<AlignmentResult, AlignError> {
    // === Phase 0: Validation and centering ===
    config.validate()?;
    reference.check_same_len(moving)?;
    if reference.is_empty() {
        return Err(PointSetError::Empty.into());
    }
    let default_groups;
    let groups = match groups {
        Some(groups) => {
            if groups.num_points() != reference.len() {
                return Err(PointSetError::LengthMismatch {
                    left: reference.len(),
                    right: groups.num_points(),
                }
                .into());
            }
            groups
        }
        None => {
            default_groups = EquivalenceGroups::all(reference.len());
            &default_groups
        }
    };

    let x1 = center_of_mass_to_origin(reference);
    let x2_base = center_of_mass_to_origin(moving);
    info!(
        points = x1.len(),
        groups = groups.groups().len(),
        "Starting alignment."
    );

    // === Phase 1: Rotation search ===
    reporter.report(Progress::PhaseStart {
        name: "Rotation Search",
    });
    let overlap = &config.overlap;
    let landscape = OverlapPotential::new(&x1, &x2_base, groups, overlap.length_scale)?
        .with_relaxation(
            &overlap.relax_schedule,
            overlap.relax_iterations,
            overlap.relax_tolerance,
        );
    info!(
        initial = landscape.energy(&Rotation3::identity()),
        global_minimum = ?landscape.global_minimum(),
        "Built overlap landscape."
    );

    let search_config = &config.search;
    let mut search = BasinHopping::new(
        &landscape,
        RandomRotationStep::new(search_config.max_step_angle),
        search_config.temperature,
        CandidateSet::new(
            search_config.num_candidates,
            search_config.candidate_tolerance,
        ),
    );
    let outcome = search.run(
        search_config.iterations,
        search_config.isomer_tolerance,
        rng,
        reporter,
    );
    let candidates = search.into_candidates().into_sorted_vec();
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Permutation matching for every retained candidate ===
    reporter.report(Progress::PhaseStart {
        name: "Permutation Matching",
    });
    let (best_candidate, best_match) =
        evaluate_candidates(&x1, &x2_base, groups, &candidates, config, reporter)?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 3: Exact rotation for the chosen correspondence ===
    reporter.report(Progress::PhaseStart {
        name: "Final Alignment",
    });
    let (distance, aligned, correction) = align_rotation(&x1, &best_match.permuted)?;
    let rotation = AxisAngle::from_rotation(&(correction * best_candidate.rotation.to_rotation()));
    reporter.report(Progress::PhaseFinish);

    info!(
        distance,
        before_final_alignment = best_match.distance,
        isomer_found = outcome.isomer_found,
        "Alignment complete."
    );

    Ok(AlignmentResult {
        distance,
        permutation: best_match.permutation,
        rotation,
        reference: x1,
        aligned,
        isomer_found: outcome.isomer_found,
        steps_taken: outcome.steps_taken,
        candidates_evaluated: candidates.len(),
    })
}

/// Resolves the permutation for each candidate rotation and keeps the one
/// with the smallest true distance. Earlier (better scored) candidates win ties.
fn evaluate_candidates(
    x1: &PointSet,
    x2_base: &PointSet,
    groups: &EquivalenceGroups,
    candidates: &[Candidate],
    config: &AlignmentConfig,
    reporter: &ProgressReporter,
) -> Result<(Candidate, PermutationMatch), AlignError> {
    let mut best: Option<(usize, Candidate, PermutationMatch)> = None;

    for (rank, candidate) in candidates.iter().enumerate() {
        let rotated = x2_base.rotated(&candidate.rotation.to_rotation());
        let matched = find_best_permutation(x1, &rotated, groups, config.assignment)?;

        debug!(
            rank,
            score = candidate.score,
            distance = matched.distance,
            "Evaluated candidate rotation."
        );
        reporter.report(Progress::CandidateEvaluated {
            rank,
            score: candidate.score,
            distance: matched.distance,
        });

        let improves = best
            .as_ref()
            .is_none_or(|(_, _, current)| matched.distance < current.distance);
        if improves {
            best = Some((rank, *candidate, matched));
        }
    }

    let (rank, candidate, matched) = best
        .ok_or_else(|| AlignError::Internal("rotation search retained no candidates".to_string()))?;
    reporter.report(Progress::Message(format!(
        "Best candidate: rank {} of {}, distance {:.6}",
        rank,
        candidates.len(),
        matched.distance
    )));
    Ok((candidate, matched))
}

/// Convenience entry point with a seeded generator and no progress output.
pub fn minimize_distance(
    reference: &PointSet,
    moving: &PointSet,
    groups: Option<&EquivalenceGroups>,
    config: &AlignmentConfig,
    seed: u64,
) -> Result<AlignmentResult, AlignError> {
    let mut rng = StdRng::seed_from_u64(seed);
    run(
        reference,
        moving,
        groups,
        config,
        &mut rng,
        &ProgressReporter::new(),
    )
}

/// Like [`minimize_distance`] for flat `[x0, y0, z0, x1, ...]` coordinate arrays.
pub fn minimize_distance_flat(
    reference: &[f64],
    moving: &[f64],
    groups: Option<&EquivalenceGroups>,
    config: &AlignmentConfig,
    seed: u64,
) -> Result<AlignmentResult, AlignError> {
    let reference = PointSet::from_flat(reference)?;
    let moving = PointSet::from_flat(moving)?;
    minimize_distance(&reference, &moving, groups, config, seed)
}

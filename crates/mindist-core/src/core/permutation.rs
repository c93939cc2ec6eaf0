use crate::core::assignment::{AssignmentError, AssignmentMethod};
use crate::core::models::groups::{EquivalenceGroups, GroupError};
use crate::core::models::permutation::Permutation;
use crate::core::models::points::{PointSet, PointSetError};
use nalgebra::DMatrix;
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum MatchError {
    #[error("Invalid point sets: {source}")]
    PointSet {
        #[from]
        source: PointSetError,
    },
    #[error("Invalid equivalence groups: {source}")]
    Groups {
        #[from]
        source: GroupError,
    },
    #[error("Assignment failed for group {group}: {source}")]
    Assignment {
        group: usize,
        #[source]
        source: AssignmentError,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PermutationMatch {
    /// Euclidean distance between `reference` and `permuted` over all points.
    pub distance: f64,
    /// `permuted[i] = candidate[permutation[i]]`.
    pub permutation: Permutation,
    pub permuted: PointSet,
}

/// Relabels `candidate` within each equivalence group so that it is as close
/// as possible to `reference`, without moving any point.
///
/// Each group is solved independently as an assignment problem on squared
/// distances. Indices outside every group keep their position.
pub fn find_best_permutation(
    reference: &PointSet,
    candidate: &PointSet,
    groups: &EquivalenceGroups,
    method: AssignmentMethod,
) -> Result<PermutationMatch, MatchError> {
    reference.check_same_len(candidate)?;
    if groups.num_points() != reference.len() {
        return Err(PointSetError::LengthMismatch {
            left: reference.len(),
            right: groups.num_points(),
        }
        .into());
    }

    let mut mapping: Vec<usize> = (0..reference.len()).collect();

    for (group_idx, group) in groups.groups().iter().enumerate() {
        let cost = DMatrix::from_fn(group.len(), group.len(), |i, j| {
            (reference[group[i]] - candidate[group[j]]).norm_squared()
        });

        let solver = method.solver_for(group.len());
        let assignment = solver
            .solve(&cost)
            .map_err(|source| MatchError::Assignment {
                group: group_idx,
                source,
            })?;

        trace!(
            group = group_idx,
            size = group.len(),
            solver = solver.name(),
            "Solved group assignment."
        );

        for (i, &j) in assignment.iter().enumerate() {
            mapping[group[i]] = group[j];
        }
    }

    let permutation = Permutation::from_bijection(mapping);
    let permuted = candidate.permuted(&permutation)?;
    let distance = reference.distance(&permuted)?;

    Ok(PermutationMatch {
        distance,
        permutation,
        permuted,
    })
}

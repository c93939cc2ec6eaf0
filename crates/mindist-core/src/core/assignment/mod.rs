//! Solvers for the linear assignment problem.
//!
//! Given a square cost matrix, a solver returns `assignment` with
//! `assignment[row] = column`, a bijection between rows and columns. The exact
//! [`Hungarian`] solver minimizes the total cost; the [`Greedy`] solver only
//! guarantees a valid bijection and is meant for very large groups.

mod greedy;
mod hungarian;

pub use greedy::Greedy;
pub use hungarian::Hungarian;

use nalgebra::DMatrix;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum AssignmentError {
    #[error("Cost matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },
    #[error("Cost matrix contains a non-finite entry at ({row}, {col})")]
    NonFiniteCost { row: usize, col: usize },
    #[error("Solver '{solver}' produced an assignment that is not a bijection")]
    NotBijective { solver: &'static str },
}

pub trait AssignmentSolver: Send + Sync {
    fn name(&self) -> &'static str;

    fn solve(&self, cost: &DMatrix<f64>) -> Result<Vec<usize>, AssignmentError>;
}

/// Which solver the permutation matcher uses for each equivalence group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssignmentMethod {
    #[default]
    Hungarian,
    Greedy,
    /// Hungarian for groups of up to `max_exact_size` points, greedy above.
    Auto { max_exact_size: usize },
}

static HUNGARIAN: Hungarian = Hungarian;
static GREEDY: Greedy = Greedy;

impl AssignmentMethod {
    pub fn solver_for(&self, group_size: usize) -> &'static dyn AssignmentSolver {
        match *self {
            AssignmentMethod::Hungarian => &HUNGARIAN,
            AssignmentMethod::Greedy => &GREEDY,
            AssignmentMethod::Auto { max_exact_size } if group_size <= max_exact_size => {
                &HUNGARIAN
            }
            AssignmentMethod::Auto { .. } => &GREEDY,
        }
    }
}

pub(crate) fn check_square(cost: &DMatrix<f64>) -> Result<usize, AssignmentError> {
    let (rows, cols) = cost.shape();
    if rows != cols {
        return Err(AssignmentError::NotSquare { rows, cols });
    }
    if let Some((idx, _)) = cost.iter().enumerate().find(|(_, c)| !c.is_finite()) {
        // nalgebra stores matrices column-major.
        return Err(AssignmentError::NonFiniteCost {
            row: idx % rows,
            col: idx / rows,
        });
    }
    Ok(rows)
}

pub(crate) fn check_bijection(
    assignment: &[usize],
    solver: &'static str,
) -> Result<(), AssignmentError> {
    let mut used = vec![false; assignment.len()];
    for &col in assignment {
        if col >= used.len() || std::mem::replace(&mut used[col], true) {
            return Err(AssignmentError::NotBijective { solver });
        }
    }
    Ok(())
}

pub fn total_cost(cost: &DMatrix<f64>, assignment: &[usize]) -> f64 {
    assignment
        .iter()
        .enumerate()
        .map(|(row, &col)| cost[(row, col)])
        .sum()
}

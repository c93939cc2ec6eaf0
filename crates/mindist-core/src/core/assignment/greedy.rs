use super::{AssignmentError, AssignmentSolver, check_bijection, check_square};
use nalgebra::DMatrix;

/// Heuristic solver: repeatedly takes the cheapest pair whose row and column
/// are both still free. O(n² log n); always a bijection, not always optimal.
#[derive(Debug, Default, Clone, Copy)]
pub struct Greedy;

impl AssignmentSolver for Greedy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn solve(&self, cost: &DMatrix<f64>) -> Result<Vec<usize>, AssignmentError> {
        let n = check_square(cost)?;

        let mut pairs: Vec<(f64, usize, usize)> = (0..n)
            .flat_map(|row| (0..n).map(move |col| (row, col)))
            .map(|(row, col)| (cost[(row, col)], row, col))
            .collect();
        // Stable: equal costs keep row-major order.
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut assignment = vec![usize::MAX; n];
        let mut col_taken = vec![false; n];
        let mut remaining = n;
        for (_, row, col) in pairs {
            if remaining == 0 {
                break;
            }
            if assignment[row] != usize::MAX || col_taken[col] {
                continue;
            }
            assignment[row] = col;
            col_taken[col] = true;
            remaining -= 1;
        }

        check_bijection(&assignment, self.name())?;
        Ok(assignment)
    }
}

use super::{AssignmentError, AssignmentSolver, check_bijection, check_square};
use nalgebra::DMatrix;

/// Exact O(n³) solver: successive shortest augmenting paths with dual
/// potentials (the Kuhn–Munkres method in its Jonker–Volgenant form).
///
/// Ties are resolved towards the lowest column index scanned first, so the
/// result is deterministic for a given matrix.
#[derive(Debug, Default, Clone, Copy)]
pub struct Hungarian;

impl AssignmentSolver for Hungarian {
    fn name(&self) -> &'static str {
        "hungarian"
    }

    fn solve(&self, cost: &DMatrix<f64>) -> Result<Vec<usize>, AssignmentError> {
        let n = check_square(cost)?;
        if n == 0 {
            return Ok(Vec::new());
        }

        // 1-based; index 0 is the virtual source column.
        let mut u = vec![0.0; n + 1];
        let mut v = vec![0.0; n + 1];
        let mut row_of_col = vec![0usize; n + 1];
        let mut way = vec![0usize; n + 1];

        for row in 1..=n {
            row_of_col[0] = row;
            let mut j0 = 0;
            let mut min_slack = vec![f64::INFINITY; n + 1];
            let mut used = vec![false; n + 1];

            loop {
                used[j0] = true;
                let i0 = row_of_col[j0];
                let mut delta = f64::INFINITY;
                let mut j1 = 0;

                for j in 1..=n {
                    if used[j] {
                        continue;
                    }
                    let reduced = cost[(i0 - 1, j - 1)] - u[i0] - v[j];
                    if reduced < min_slack[j] {
                        min_slack[j] = reduced;
                        way[j] = j0;
                    }
                    if min_slack[j] < delta {
                        delta = min_slack[j];
                        j1 = j;
                    }
                }

                if j1 == 0 {
                    return Err(AssignmentError::NotBijective {
                        solver: self.name(),
                    });
                }

                for j in 0..=n {
                    if used[j] {
                        u[row_of_col[j]] += delta;
                        v[j] -= delta;
                    } else {
                        min_slack[j] -= delta;
                    }
                }

                j0 = j1;
                if row_of_col[j0] == 0 {
                    break;
                }
            }

            loop {
                let j1 = way[j0];
                row_of_col[j0] = row_of_col[j1];
                j0 = j1;
                if j0 == 0 {
                    break;
                }
            }
        }

        let mut assignment = vec![0; n];
        for col in 1..=n {
            assignment[row_of_col[col] - 1] = col - 1;
        }
        check_bijection(&assignment, self.name())?;
        Ok(assignment)
    }
}

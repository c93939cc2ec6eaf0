use super::permutation::Permutation;
use nalgebra::{Point3, Rotation3, Vector3};
use std::ops::Index;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum PointSetError {
    #[error("Flat coordinate array of length {0} is not a multiple of 3")]
    InvalidCoordinateLength(usize),
    #[error("Point sets differ in size: {left} vs {right} points")]
    LengthMismatch { left: usize, right: usize },
    #[error("Point set is empty")]
    Empty,
    #[error("Permutation of length {permutation} cannot be applied to {points} points")]
    PermutationLength { permutation: usize, points: usize },
}

/// An ordered set of points in 3-D space.
///
/// The order defines point identity: index `i` of one set is compared with
/// index `i` of another unless a [`Permutation`] says otherwise.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointSet {
    points: Vec<Point3<f64>>,
}

impl PointSet {
    pub fn new(points: Vec<Point3<f64>>) -> Self {
        Self { points }
    }

    /// Builds a point set from `[x0, y0, z0, x1, y1, z1, ...]`.
    pub fn from_flat(coords: &[f64]) -> Result<Self, PointSetError> {
        if coords.len() % 3 != 0 {
            return Err(PointSetError::InvalidCoordinateLength(coords.len()));
        }
        let points = coords
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
            .collect();
        Ok(Self { points })
    }

    pub fn to_flat(&self) -> Vec<f64> {
        self.points
            .iter()
            .flat_map(|p| [p.x, p.y, p.z])
            .collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point3<f64>> {
        self.points.iter()
    }

    /// Arithmetic mean of all points (uniform masses). The origin for an empty set.
    pub fn centroid(&self) -> Point3<f64> {
        if self.points.is_empty() {
            return Point3::origin();
        }
        let sum: Vector3<f64> = self.points.iter().map(|p| p.coords).sum();
        Point3::from(sum / self.points.len() as f64)
    }

    pub fn translated(&self, offset: &Vector3<f64>) -> Self {
        Self {
            points: self.points.iter().map(|p| p + offset).collect(),
        }
    }

    pub fn centered(&self) -> Self {
        let centroid = self.centroid();
        self.translated(&-centroid.coords)
    }

    pub fn rotated(&self, rotation: &Rotation3<f64>) -> Self {
        Self {
            points: self.points.iter().map(|p| rotation * p).collect(),
        }
    }

    /// Returns the set with `out[i] = self[permutation[i]]`.
    pub fn permuted(&self, permutation: &Permutation) -> Result<Self, PointSetError> {
        if permutation.len() != self.len() {
            return Err(PointSetError::PermutationLength {
                permutation: permutation.len(),
                points: self.len(),
            });
        }
        Ok(Self {
            points: permutation.iter().map(|&j| self.points[j]).collect(),
        })
    }

    pub fn squared_distance(&self, other: &PointSet) -> Result<f64, PointSetError> {
        self.check_same_len(other)?;
        Ok(self
            .points
            .iter()
            .zip(other.points.iter())
            .map(|(a, b)| (a - b).norm_squared())
            .sum())
    }

    /// Euclidean norm of the concatenated per-point differences.
    pub fn distance(&self, other: &PointSet) -> Result<f64, PointSetError> {
        Ok(self.squared_distance(other)?.sqrt())
    }

    pub fn rmsd(&self, other: &PointSet) -> Result<f64, PointSetError> {
        if self.is_empty() {
            return Err(PointSetError::Empty);
        }
        Ok((self.squared_distance(other)? / self.len() as f64).sqrt())
    }

    pub fn check_same_len(&self, other: &PointSet) -> Result<(), PointSetError> {
        if self.len() != other.len() {
            return Err(PointSetError::LengthMismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        Ok(())
    }
}

impl Index<usize> for PointSet {
    type Output = Point3<f64>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl From<Vec<Point3<f64>>> for PointSet {
    fn from(points: Vec<Point3<f64>>) -> Self {
        Self::new(points)
    }
}

impl From<Vec<[f64; 3]>> for PointSet {
    fn from(coords: Vec<[f64; 3]>) -> Self {
        Self::new(coords.into_iter().map(Point3::from).collect())
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point3<f64>;
    type IntoIter = std::slice::Iter<'a, Point3<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    fn line() -> PointSet {
        PointSet::from(vec![[0.0, 0.0, 1.0], [0.0, 0.0, 2.0], [0.0, 0.0, 3.0]])
    }

    #[test]
    fn from_flat_rejects_length_not_divisible_by_three() {
        let result = PointSet::from_flat(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(result, Err(PointSetError::InvalidCoordinateLength(4)));
    }

    #[test]
    fn flat_conversion_preserves_order() {
        let flat = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let set = PointSet::from_flat(&flat).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set[1], Point3::new(4.0, 5.0, 6.0));
        assert_eq!(set.to_flat(), flat);
    }

    #[test]
    fn centroid_of_line_is_middle_point() {
        let c = line().centroid();
        assert!((c - Point3::new(0.0, 0.0, 2.0)).norm() < TOLERANCE);
    }

    #[test]
    fn centered_set_has_zero_centroid() {
        let centered = line().centered();
        assert!(centered.centroid().coords.norm() < TOLERANCE);
    }

    #[test]
    fn permuted_reorders_points() {
        let perm = Permutation::new(vec![2, 0, 1]).unwrap();
        let permuted = line().permuted(&perm).unwrap();
        assert_eq!(permuted[0], Point3::new(0.0, 0.0, 3.0));
        assert_eq!(permuted[1], Point3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn permuted_rejects_wrong_length() {
        let perm = Permutation::identity(2);
        assert!(matches!(
            line().permuted(&perm),
            Err(PointSetError::PermutationLength { .. })
        ));
    }

    #[test]
    fn distance_is_norm_of_difference() {
        let a = line();
        let b = a.translated(&Vector3::new(1.0, 0.0, 0.0));
        let d = a.distance(&b).unwrap();
        assert!((d - 3.0f64.sqrt()).abs() < TOLERANCE);
        assert!((a.rmsd(&b).unwrap() - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn distance_rejects_mismatched_sizes() {
        let a = line();
        let b = PointSet::from(vec![[0.0, 0.0, 0.0]]);
        assert_eq!(
            a.distance(&b),
            Err(PointSetError::LengthMismatch { left: 3, right: 1 })
        );
    }
}

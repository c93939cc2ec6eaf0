use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum PermutationError {
    #[error("Index {index} is out of range for a permutation of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Index {0} appears more than once")]
    Repeated(usize),
}

/// A relabeling of point indices.
///
/// Applying it to a point set yields `out[i] = points[self[i]]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Permutation(Vec<usize>);

impl Permutation {
    pub fn new(mapping: Vec<usize>) -> Result<Self, PermutationError> {
        let len = mapping.len();
        let mut seen = vec![false; len];
        for &index in &mapping {
            if index >= len {
                return Err(PermutationError::IndexOutOfRange { index, len });
            }
            if std::mem::replace(&mut seen[index], true) {
                return Err(PermutationError::Repeated(index));
            }
        }
        Ok(Self(mapping))
    }

    pub fn identity(len: usize) -> Self {
        Self((0..len).collect())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_identity(&self) -> bool {
        self.0.iter().enumerate().all(|(i, &j)| i == j)
    }

    pub fn inverse(&self) -> Self {
        let mut inverse = vec![0; self.0.len()];
        for (i, &j) in self.0.iter().enumerate() {
            inverse[j] = i;
        }
        Self(inverse)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.0
    }

    /// Wraps a mapping already known to be a bijection.
    pub(crate) fn from_bijection(mapping: Vec<usize>) -> Self {
        debug_assert!(Self::new(mapping.clone()).is_ok());
        Self(mapping)
    }
}

impl std::ops::Index<usize> for Permutation {
    type Output = usize;

    fn index(&self, index: usize) -> &usize {
        &self.0[index]
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, j) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", j)?;
        }
        write!(f, "]")
    }
}

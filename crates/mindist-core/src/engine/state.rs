use crate::core::models::rotation::AxisAngle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub rotation: AxisAngle,
    pub score: f64,
}

/// The best candidates seen so far, sorted by ascending score.
///
/// Holds at most `capacity` entries. A new candidate displaces the worst entry
/// when the collection is full and it scores lower. Candidates whose score
/// lies within `tolerance` of an entry already present are treated as the same
/// minimum and ignored.
#[derive(Debug, Clone)]
pub struct CandidateSet {
    capacity: usize,
    tolerance: f64,
    entries: Vec<Candidate>,
}

impl CandidateSet {
    pub fn new(capacity: usize, tolerance: f64) -> Self {
        Self {
            capacity,
            tolerance,
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Offers a candidate; returns whether it was kept.
    pub fn insert(&mut self, candidate: Candidate) -> bool {
        if self.capacity == 0 || !candidate.score.is_finite() {
            return false;
        }
        let pos = self
            .entries
            .partition_point(|c| c.score < candidate.score);

        let near = |idx: usize| {
            self.entries
                .get(idx)
                .is_some_and(|c| (c.score - candidate.score).abs() < self.tolerance)
        };
        if near(pos) || (pos > 0 && near(pos - 1)) {
            return false;
        }

        if self.entries.len() == self.capacity {
            if pos == self.capacity {
                return false;
            }
            self.entries.pop();
        }
        self.entries.insert(pos, candidate);
        true
    }

    pub fn best(&self) -> Option<&Candidate> {
        self.entries.first()
    }

    pub fn worst(&self) -> Option<&Candidate> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.entries.iter()
    }

    pub fn into_sorted_vec(self) -> Vec<Candidate> {
        self.entries
    }
}

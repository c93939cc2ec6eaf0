use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GroupError {
    #[error("Equivalence group {group} is empty")]
    EmptyGroup { group: usize },
    #[error("Index {index} is listed more than once across equivalence groups")]
    DuplicateIndex { index: usize },
    #[error("Index {index} in equivalence group {group} is out of range for {len} points")]
    IndexOutOfRange {
        index: usize,
        group: usize,
        len: usize,
    },
}

/// A partition of (a subset of) point indices into interchangeable groups.
///
/// Points may only be matched to points of the same group. Indices that appear
/// in no group are fixed and always map to themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquivalenceGroups {
    groups: Vec<Vec<usize>>,
    num_points: usize,
}

impl EquivalenceGroups {
    /// Validates `groups` against a structure of `num_points` points.
    pub fn new(groups: Vec<Vec<usize>>, num_points: usize) -> Result<Self, GroupError> {
        let mut seen = vec![false; num_points];
        for (group_idx, group) in groups.iter().enumerate() {
            if group.is_empty() {
                return Err(GroupError::EmptyGroup { group: group_idx });
            }
            for &index in group {
                if index >= num_points {
                    return Err(GroupError::IndexOutOfRange {
                        index,
                        group: group_idx,
                        len: num_points,
                    });
                }
                if std::mem::replace(&mut seen[index], true) {
                    return Err(GroupError::DuplicateIndex { index });
                }
            }
        }
        Ok(Self { groups, num_points })
    }

    /// A single group in which every point is interchangeable.
    pub fn all(num_points: usize) -> Self {
        let groups = if num_points == 0 {
            Vec::new()
        } else {
            vec![(0..num_points).collect()]
        };
        Self { groups, num_points }
    }

    /// One group per distinct label, in order of first appearance.
    pub fn from_labels<T: PartialEq>(labels: &[T]) -> Self {
        let mut keys: Vec<&T> = Vec::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();
        for (index, label) in labels.iter().enumerate() {
            match keys.iter().position(|k| *k == label) {
                Some(g) => groups[g].push(index),
                None => {
                    keys.push(label);
                    groups.push(vec![index]);
                }
            }
        }
        Self {
            groups,
            num_points: labels.len(),
        }
    }

    pub fn groups(&self) -> &[Vec<usize>] {
        &self.groups
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }

    /// Indices not covered by any group, in ascending order.
    pub fn fixed_indices(&self) -> Vec<usize> {
        let mut listed = vec![false; self.num_points];
        for &index in self.groups.iter().flatten() {
            listed[index] = true;
        }
        (0..self.num_points).filter(|&i| !listed[i]).collect()
    }

    /// Whether `a` and `b` may be matched to each other.
    pub fn same_group(&self, a: usize, b: usize) -> bool {
        if a == b {
            return true;
        }
        self.groups
            .iter()
            .any(|group| group.contains(&a) && group.contains(&b))
    }

    /// All groups including the implicit singleton group of every fixed index.
    pub fn blocks(&self) -> impl Iterator<Item = Vec<usize>> + '_ {
        self.groups
            .iter()
            .cloned()
            .chain(self.fixed_indices().into_iter().map(|i| vec![i]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_covers_every_index() {
        let groups = EquivalenceGroups::all(4);
        assert_eq!(groups.groups(), &[vec![0, 1, 2, 3]]);
        assert!(groups.fixed_indices().is_empty());
    }

    #[test]
    fn from_labels_groups_equal_labels_in_first_seen_order() {
        let groups = EquivalenceGroups::from_labels(&["Ar", "Kr", "Ar", "Xe", "Kr"]);
        assert_eq!(groups.groups(), &[vec![0, 2], vec![1, 4], vec![3]]);
        assert_eq!(groups.num_points(), 5);
        assert!(groups.fixed_indices().is_empty());
    }

    #[test]
    fn new_rejects_empty_group() {
        let result = EquivalenceGroups::new(vec![vec![0, 1], vec![]], 3);
        assert_eq!(result, Err(GroupError::EmptyGroup { group: 1 }));
    }

    #[test]
    fn new_rejects_index_in_two_groups() {
        let result = EquivalenceGroups::new(vec![vec![0, 1], vec![1, 2]], 3);
        assert_eq!(result, Err(GroupError::DuplicateIndex { index: 1 }));
    }

    #[test]
    fn new_rejects_repeated_index_within_group() {
        let result = EquivalenceGroups::new(vec![vec![2, 2]], 3);
        assert_eq!(result, Err(GroupError::DuplicateIndex { index: 2 }));
    }

    #[test]
    fn new_rejects_out_of_range_index() {
        let result = EquivalenceGroups::new(vec![vec![0, 5]], 3);
        assert_eq!(
            result,
            Err(GroupError::IndexOutOfRange {
                index: 5,
                group: 0,
                len: 3
            })
        );
    }

    #[test]
    fn unlisted_indices_are_fixed_singletons() {
        let groups = EquivalenceGroups::new(vec![vec![0, 2]], 4).unwrap();
        assert_eq!(groups.fixed_indices(), vec![1, 3]);
        let blocks: Vec<_> = groups.blocks().collect();
        assert_eq!(blocks, vec![vec![0, 2], vec![1], vec![3]]);
        assert!(groups.same_group(0, 2));
        assert!(!groups.same_group(0, 1));
        assert!(groups.same_group(3, 3));
    }
}

use mindist::core::assignment::AssignmentMethod;
use std::ops::RangeInclusive;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty group in '{0}'. Expected index lists such as '0-19;20-24'.")]
    EmptyGroup(String),

    #[error("Invalid index '{token}' in group specification '{spec}'.")]
    InvalidIndex { token: String, spec: String },

    #[error("Invalid range '{token}' in group specification '{spec}': start exceeds end.")]
    ReversedRange { token: String, spec: String },

    #[error("Atom index {index} is out of range for a structure of {num_atoms} atoms.")]
    IndexOutOfRange { index: usize, num_atoms: usize },

    #[error("Unknown assignment method '{0}'. Expected 'hungarian', 'greedy' or 'auto'.")]
    UnknownAssignmentMethod(String),
}

/// How interchangeable atoms are chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupSpec {
    /// Every atom may be matched to every other atom.
    All,
    /// Atoms sharing an element label form a group.
    Species,
    /// Explicit index groups as inclusive ranges; unlisted indices stay fixed.
    /// Ranges are expanded by [`expand_groups`] once the atom count is known.
    Explicit(Vec<Vec<RangeInclusive<usize>>>),
}

/// Parses `all`, `species`, or `;`-separated groups of `,`-separated indices
/// and inclusive `a-b` ranges, e.g. `0-3,7;4-6`.
pub fn parse_groups(spec: &str) -> Result<GroupSpec, ParseError> {
    let trimmed = spec.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "all" => return Ok(GroupSpec::All),
        "species" => return Ok(GroupSpec::Species),
        _ => {}
    }

    let mut groups = Vec::new();
    for group_str in trimmed.split(';') {
        let mut group = Vec::new();
        for token in group_str.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let parse_index = |s: &str| {
                s.trim().parse::<usize>().map_err(|_| ParseError::InvalidIndex {
                    token: token.to_string(),
                    spec: spec.to_string(),
                })
            };
            match token.split_once('-') {
                Some((start, end)) => {
                    let (start, end) = (parse_index(start)?, parse_index(end)?);
                    if start > end {
                        return Err(ParseError::ReversedRange {
                            token: token.to_string(),
                            spec: spec.to_string(),
                        });
                    }
                    group.push(start..=end);
                }
                None => {
                    let index = parse_index(token)?;
                    group.push(index..=index);
                }
            }
        }
        if group.is_empty() {
            return Err(ParseError::EmptyGroup(spec.to_string()));
        }
        groups.push(group);
    }
    Ok(GroupSpec::Explicit(groups))
}

/// Expands parsed index ranges for a structure of `num_atoms` atoms, rejecting
/// any index past the end before anything is allocated for it.
pub fn expand_groups(
    groups: &[Vec<RangeInclusive<usize>>],
    num_atoms: usize,
) -> Result<Vec<Vec<usize>>, ParseError> {
    groups
        .iter()
        .map(|ranges| {
            let mut group = Vec::new();
            for range in ranges {
                if *range.end() >= num_atoms {
                    return Err(ParseError::IndexOutOfRange {
                        index: *range.end(),
                        num_atoms,
                    });
                }
                group.extend(range.clone());
            }
            Ok(group)
        })
        .collect()
}

pub fn parse_assignment_method(
    name: &str,
    max_exact_size: usize,
) -> Result<AssignmentMethod, ParseError> {
    match name.trim().to_ascii_lowercase().as_str() {
        "hungarian" => Ok(AssignmentMethod::Hungarian),
        "greedy" => Ok(AssignmentMethod::Greedy),
        "auto" => Ok(AssignmentMethod::Auto { max_exact_size }),
        _ => Err(ParseError::UnknownAssignmentMethod(name.to_string())),
    }
}

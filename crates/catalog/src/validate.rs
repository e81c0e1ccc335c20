//! Load-time integrity checks for the dependency graph.

use std::collections::{HashMap, HashSet};
use tinysteps_core::{Milestone, MilestoneId};
use crate::{CatalogError, Result};

/// What to do with `depends_on` ids that name no catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DanglingPolicy {
    /// Refuse to load the catalog
    #[default]
    Reject,
    /// Load it and log a warning; the reference never counts as met
    FailClosed,
}

/// A `depends_on` entry that names no catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    /// Milestone declaring the dependency
    pub milestone: MilestoneId,
    /// The id that could not be found
    pub missing: MilestoneId,
}

impl std::fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.milestone, self.missing)
    }
}

/// Reject duplicate ids; returns the id index on success.
pub(crate) fn index_ids(milestones: &[Milestone]) -> Result<HashMap<MilestoneId, usize>> {
    let mut by_id = HashMap::with_capacity(milestones.len());
    for (index, milestone) in milestones.iter().enumerate() {
        if by_id.insert(milestone.id.clone(), index).is_some() {
            return Err(CatalogError::DuplicateId(milestone.id.clone()));
        }
    }
    Ok(by_id)
}

/// All dependency references that point outside the catalog, in
/// declaration order.
pub(crate) fn find_dangling(
    milestones: &[Milestone],
    by_id: &HashMap<MilestoneId, usize>,
) -> Vec<DanglingReference> {
    milestones
        .iter()
        .flat_map(|m| {
            m.depends_on
                .iter()
                .filter(|dep| !by_id.contains_key(*dep))
                .map(|dep| DanglingReference {
                    milestone: m.id.clone(),
                    missing: dep.clone(),
                })
        })
        .collect()
}

/// Find a dependency cycle, returned as the path of ids that closes on
/// itself. Dangling references are skipped here.
pub(crate) fn find_cycle(
    milestones: &[Milestone],
    by_id: &HashMap<MilestoneId, usize>,
) -> Option<Vec<MilestoneId>> {
    let mut visited: HashSet<usize> = HashSet::new();
    let mut recursion_stack: HashSet<usize> = HashSet::new();

    for start in 0..milestones.len() {
        if !visited.contains(&start) {
            let mut path = Vec::new();
            if let Some(cycle) = visit(
                start,
                milestones,
                by_id,
                &mut visited,
                &mut recursion_stack,
                &mut path,
            ) {
                return Some(cycle.into_iter().map(|i| milestones[i].id.clone()).collect());
            }
        }
    }

    None
}

/// Depth-first walk along `depends_on` edges.
fn visit(
    node: usize,
    milestones: &[Milestone],
    by_id: &HashMap<MilestoneId, usize>,
    visited: &mut HashSet<usize>,
    recursion_stack: &mut HashSet<usize>,
    path: &mut Vec<usize>,
) -> Option<Vec<usize>> {
    visited.insert(node);
    recursion_stack.insert(node);
    path.push(node);

    for dep_id in &milestones[node].depends_on {
        let Some(&dep) = by_id.get(dep_id) else {
            continue;
        };

        if !visited.contains(&dep) {
            if let Some(cycle) = visit(dep, milestones, by_id, visited, recursion_stack, path) {
                return Some(cycle);
            }
        } else if recursion_stack.contains(&dep) {
            let start = path.iter().position(|&i| i == dep).unwrap_or(0);
            let mut cycle = path[start..].to_vec();
            cycle.push(dep);
            return Some(cycle);
        }
    }

    path.pop();
    recursion_stack.remove(&node);
    None
}

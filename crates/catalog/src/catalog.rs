//! The validated, read-only milestone catalog.

use std::collections::HashMap;
use std::path::Path;
use tinysteps_core::{Domain, Milestone, MilestoneId};
use tracing::{info, warn};
use crate::validate::{self, DanglingPolicy, DanglingReference};
use crate::{CatalogError, Result};

/// Bundled domain tables, in catalog declaration order.
const BUNDLED_TABLES: [(&str, &str); 3] = [
    ("gross_motor.json", include_str!("../data/gross_motor.json")),
    ("fine_motor.json", include_str!("../data/fine_motor.json")),
    ("social_emotional.json", include_str!("../data/social_emotional.json")),
];

/// Ordered collection of milestones with id and storage-key indexes.
///
/// A `Catalog` can only be obtained through validation: ids are unique and
/// the dependency graph is acyclic. Dangling references exist only if the
/// catalog was loaded with [`DanglingPolicy::FailClosed`].
#[derive(Debug, Clone)]
pub struct Catalog {
    milestones: Vec<Milestone>,
    by_id: HashMap<MilestoneId, usize>,
    by_storage_key: HashMap<MilestoneId, usize>,
    dangling: Vec<DanglingReference>,
}

impl Catalog {
    /// Validate and index a list of milestones.
    pub fn new(milestones: Vec<Milestone>, policy: DanglingPolicy) -> Result<Self> {
        let by_id = validate::index_ids(&milestones)?;

        let dangling = validate::find_dangling(&milestones, &by_id);
        if !dangling.is_empty() {
            match policy {
                DanglingPolicy::Reject => {
                    let first = &dangling[0];
                    return Err(CatalogError::DanglingDependency {
                        milestone: first.milestone.clone(),
                        missing: first.missing.clone(),
                    });
                }
                DanglingPolicy::FailClosed => {
                    for reference in &dangling {
                        warn!(
                            milestone = %reference.milestone,
                            missing = %reference.missing,
                            "dependency names no catalog entry; it will never be met"
                        );
                    }
                }
            }
        }

        if let Some(cycle) = validate::find_cycle(&milestones, &by_id) {
            return Err(CatalogError::Cycle(cycle));
        }

        let mut by_storage_key = HashMap::with_capacity(milestones.len());
        for (index, milestone) in milestones.iter().enumerate() {
            by_storage_key
                .entry(milestone.storage_key().clone())
                .or_insert(index);
        }

        Ok(Self {
            milestones,
            by_id,
            by_storage_key,
            dangling,
        })
    }

    /// Parse a JSON array of milestones and validate it.
    pub fn from_json_str(json: &str, policy: DanglingPolicy) -> Result<Self> {
        let milestones: Vec<Milestone> = serde_json::from_str(json)?;
        Self::new(milestones, policy)
    }

    /// Load a catalog file (JSON array of milestones).
    pub fn from_path(path: impl AsRef<Path>, policy: DanglingPolicy) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json, policy)?;
        info!(path = %path.display(), milestones = catalog.len(), "loaded milestone catalog");
        Ok(catalog)
    }

    /// The catalog shipped with the crate.
    ///
    /// It covers Gross Motor, Fine Motor and Social-Emotional, and two
    /// Social-Emotional entries depend on Adaptive/Self-Care milestones that
    /// are not part of it.
    pub fn bundled(policy: DanglingPolicy) -> Result<Self> {
        let mut milestones = Vec::new();
        for (name, json) in BUNDLED_TABLES {
            let table: Vec<Milestone> = serde_json::from_str(json).map_err(|source| {
                CatalogError::Table {
                    name: name.to_string(),
                    source,
                }
            })?;
            milestones.extend(table);
        }

        let catalog = Self::new(milestones, policy)?;
        info!(
            milestones = catalog.len(),
            dangling = catalog.dangling.len(),
            "loaded bundled milestone catalog"
        );
        Ok(catalog)
    }

    /// All milestones in declaration order.
    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    /// Look up by milestone id.
    pub fn get(&self, id: &MilestoneId) -> Option<&Milestone> {
        self.by_id.get(id).map(|&i| &self.milestones[i])
    }

    /// Position of a milestone in declaration order.
    pub fn position(&self, id: &MilestoneId) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// First milestone whose storage key is `key`.
    pub fn by_storage_key(&self, key: &MilestoneId) -> Option<&Milestone> {
        self.by_storage_key.get(key).map(|&i| &self.milestones[i])
    }

    /// Milestones of one domain, in declaration order.
    pub fn in_domain(&self, domain: Domain) -> impl Iterator<Item = &Milestone> {
        self.milestones.iter().filter(move |m| m.domain == domain)
    }

    /// Dependency references kept under [`DanglingPolicy::FailClosed`].
    pub fn dangling_references(&self) -> &[DanglingReference] {
        &self.dangling
    }

    /// Number of milestones.
    pub fn len(&self) -> usize {
        self.milestones.len()
    }

    /// Catalog has no milestones.
    pub fn is_empty(&self) -> bool {
        self.milestones.is_empty()
    }
}

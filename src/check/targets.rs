use std::path::PathBuf;

use crate::mount::fstab::MountTable;

/// Chooses which mountpoints a run evaluates. Implementations return paths
/// sorted and without duplicates.
pub trait TargetSelection {
    fn select(&self, table: &MountTable) -> Vec<PathBuf>;
}

/// Mountpoints named by the operator, whether or not fstab knows them.
#[derive(Debug, Clone, Default)]
pub struct ExplicitTargets {
    paths: Vec<PathBuf>,
}

impl ExplicitTargets {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

impl TargetSelection for ExplicitTargets {
    fn select(&self, _table: &MountTable) -> Vec<PathBuf> {
        sorted_unique(self.paths.clone())
    }
}

/// Every network filesystem entry of the mount table.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscoveredTargets;

impl TargetSelection for DiscoveredTargets {
    fn select(&self, table: &MountTable) -> Vec<PathBuf> {
        sorted_unique(table.paths())
    }
}

fn sorted_unique(mut paths: Vec<PathBuf>) -> Vec<PathBuf> {
    paths.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    paths.dedup();
    paths
}

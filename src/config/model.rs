use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::check::report::ReportStyle;
use crate::check::targets::{DiscoveredTargets, ExplicitTargets, TargetSelection};

/// On-disk YAML configuration. Every key is optional.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct FileConfig {
    #[serde(default, rename = "writeTest")]
    pub write_test: Option<bool>,
    #[serde(default)]
    pub mountpoints: Vec<PathBuf>,
    #[serde(default)]
    pub fstab: Option<PathBuf>,
    #[serde(default)]
    pub mounts: Option<PathBuf>,
    #[serde(default, rename = "probeTimeoutSecs")]
    pub probe_timeout_secs: Option<u64>,
    #[serde(default)]
    pub align: Option<bool>,
}

/// Values given on the command line; they take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub write_test: bool,
    pub mountpoints: Vec<PathBuf>,
    pub fstab: Option<PathBuf>,
    pub mounts: Option<PathBuf>,
    pub probe_timeout_secs: Option<u64>,
    pub align: bool,
}

/// Resolved configuration handed to the check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    pub write_test: bool,
    pub mountpoints: Vec<PathBuf>,
    pub fstab_path: PathBuf,
    pub mounts_path: PathBuf,
    pub probe_timeout: Option<Duration>,
    pub report_style: ReportStyle,
}

impl CheckConfig {
    /// No explicit mountpoints means every network entry of the mount table.
    pub fn target_selection(&self) -> Box<dyn TargetSelection> {
        if self.mountpoints.is_empty() {
            Box::new(DiscoveredTargets)
        } else {
            Box::new(ExplicitTargets::new(self.mountpoints.clone()))
        }
    }
}

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{CheckError, Result};
use crate::mount::fs_type::FsType;
use crate::mount::unescape_field;

pub const DEFAULT_MOUNTS: &str = "/proc/self/mounts";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LivePartition {
    pub device: String,
    pub mount_path: PathBuf,
    pub fs_type: FsType,
    pub raw_options: String,
}

/// Currently mounted network filesystems keyed by mountpoint.
#[derive(Debug, Clone, Default)]
pub struct LivePartitions {
    by_path: HashMap<PathBuf, LivePartition>,
}

impl LivePartitions {
    pub fn new(partitions: impl IntoIterator<Item = LivePartition>) -> Self {
        let mut by_path = HashMap::new();
        for partition in partitions {
            if !partition.fs_type.is_network() {
                continue;
            }
            // last mount on a path shadows the earlier ones
            by_path.insert(partition.mount_path.clone(), partition);
        }
        Self { by_path }
    }

    pub fn get(&self, path: &Path) -> Option<&LivePartition> {
        self.by_path.get(path)
    }
}

pub fn read_live_partitions(path: &Path) -> Result<LivePartitions> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CheckError::Partitions(format!("read {}: {}", path.display(), e)))?;
    let partitions = LivePartitions::new(parse_mounts(&contents));
    debug!(path = %path.display(), partitions = partitions.by_path.len(), "read live partitions");
    Ok(partitions)
}

pub fn parse_mounts(contents: &str) -> Vec<LivePartition> {
    let mut partitions = Vec::new();
    for line in contents.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            continue;
        }
        partitions.push(LivePartition {
            device: unescape_field(fields[0]),
            mount_path: PathBuf::from(unescape_field(fields[1])),
            fs_type: FsType::from_str(fields[2]),
            raw_options: fields[3].to_string(),
        });
    }
    partitions
}

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{CheckError, Result};
use crate::mount::fs_type::FsType;
use crate::mount::unescape_field;

pub const DEFAULT_FSTAB: &str = "/etc/fstab";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountTableEntry {
    pub device: String,
    pub path: PathBuf,
    pub fs_type: FsType,
    pub options: String,
}

/// Network filesystem entries of the persisted mount table, sorted by path.
#[derive(Debug, Clone, Default)]
pub struct MountTable {
    entries: Vec<MountTableEntry>,
}

impl MountTable {
    pub fn new(mut entries: Vec<MountTableEntry>) -> Self {
        entries.retain(|entry| entry.fs_type.is_network());
        entries.sort_by(|a, b| a.path.as_os_str().cmp(b.path.as_os_str()));
        Self { entries }
    }

    pub fn entries(&self) -> &[MountTableEntry] {
        &self.entries
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.entries.iter().map(|entry| entry.path.clone()).collect()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.iter().any(|entry| entry.path == path)
    }
}

pub fn read_mount_table(path: &Path) -> Result<MountTable> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CheckError::MountTable(format!("read {}: {}", path.display(), e)))?;
    let entries = parse_fstab(&contents)
        .map_err(|e| CheckError::MountTable(format!("parse {}: {}", path.display(), e)))?;
    let table = MountTable::new(entries);
    for entry in table.entries() {
        debug!(
            device = %entry.device,
            path = %entry.path.display(),
            fs_type = %entry.fs_type,
            options = %entry.options,
            "network mount table entry"
        );
    }
    debug!(path = %path.display(), entries = table.entries().len(), "read mount table");
    Ok(table)
}

/// Parse every entry of an fstab document, regardless of filesystem type.
pub fn parse_fstab(contents: &str) -> std::result::Result<Vec<MountTableEntry>, String> {
    let mut entries = Vec::new();
    for (idx, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        entries.push(parse_line(line).map_err(|e| format!("line {}: {}", idx + 1, e))?);
    }
    Ok(entries)
}

fn parse_line(line: &str) -> std::result::Result<MountTableEntry, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    // anything past the pass field is ignored
    if fields.len() < 4 {
        return Err(format!("expected at least 4 fields, got {}", fields.len()));
    }
    for (name, value) in ["dump", "pass"].iter().zip(fields.iter().skip(4)) {
        if value.parse::<u32>().is_err() {
            return Err(format!("{} field {:?} is not a number", name, value));
        }
    }
    Ok(MountTableEntry {
        device: unescape_field(fields[0]),
        path: PathBuf::from(unescape_field(fields[1])),
        fs_type: FsType::from_str(fields[2]),
        options: unescape_field(fields[3]),
    })
}

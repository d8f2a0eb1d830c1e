use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::check::report::ReportStyle;
use crate::config::model::{CheckConfig, ConfigOverrides, FileConfig};
use crate::error::{CheckError, ConfigError, Result};
use crate::mount::fstab::DEFAULT_FSTAB;
use crate::mount::inspect::DEFAULT_MOUNTS;
use crate::probe::DEFAULT_PROBE_TIMEOUT;

pub fn load_file_config(path: &Path) -> Result<FileConfig> {
    let mut contents = String::new();
    File::open(path)
        .map_err(|e| CheckError::message(format!("open config {}: {}", path.display(), e)))?
        .read_to_string(&mut contents)
        .map_err(CheckError::Io)?;
    if contents.trim().is_empty() {
        return Ok(FileConfig::default());
    }
    let cfg: FileConfig =
        serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
    Ok(cfg)
}

pub fn resolve_config(file: FileConfig, overrides: ConfigOverrides) -> Result<CheckConfig> {
    let mountpoints = if overrides.mountpoints.is_empty() {
        file.mountpoints
    } else {
        overrides.mountpoints
    };
    for mountpoint in &mountpoints {
        if !mountpoint.is_absolute() {
            return Err(ConfigError::Invalid(format!(
                "mountpoint {} must be absolute",
                mountpoint.display()
            ))
            .into());
        }
    }

    let timeout_secs = overrides.probe_timeout_secs.or(file.probe_timeout_secs);
    let probe_timeout = match timeout_secs {
        Some(0) => None,
        Some(secs) => Some(Duration::from_secs(secs)),
        None => Some(DEFAULT_PROBE_TIMEOUT),
    };

    let report_style = if overrides.align || file.align.unwrap_or(false) {
        ReportStyle::Aligned
    } else {
        ReportStyle::Plain
    };

    Ok(CheckConfig {
        write_test: overrides.write_test || file.write_test.unwrap_or(false),
        mountpoints,
        fstab_path: overrides
            .fstab
            .or(file.fstab)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FSTAB)),
        mounts_path: overrides
            .mounts
            .or(file.mounts)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MOUNTS)),
        probe_timeout,
        report_style,
    })
}

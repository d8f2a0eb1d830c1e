use std::fmt;
use std::path::PathBuf;

/// Monitoring-plugin status scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    #[default]
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Warning => "WARNING",
            Status::Critical => "CRITICAL",
            Status::Unknown => "UNKNOWN",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Status::Ok => 0,
            Status::Warning => 1,
            Status::Critical => 2,
            Status::Unknown => 3,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountResult {
    pub mount_path: PathBuf,
    pub status: Status,
    pub message: String,
}

impl MountResult {
    pub fn new(mount_path: impl Into<PathBuf>, status: Status, message: impl Into<String>) -> Self {
        Self {
            mount_path: mount_path.into(),
            status,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverallResult {
    pub status: Status,
    pub report: String,
}

impl OverallResult {
    pub fn unknown(report: impl Into<String>) -> Self {
        Self {
            status: Status::Unknown,
            report: report.into(),
        }
    }
}

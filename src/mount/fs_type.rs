use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsType {
    Nfs,
    Nfs4,
    Other(String),
}

impl FsType {
    pub fn from_str(value: &str) -> Self {
        match value {
            "nfs" => FsType::Nfs,
            "nfs4" => FsType::Nfs4,
            other => FsType::Other(other.to_string()),
        }
    }

    /// Network filesystems this check monitors.
    pub fn is_network(&self) -> bool {
        matches!(self, FsType::Nfs | FsType::Nfs4)
    }

    pub fn as_str(&self) -> &str {
        match self {
            FsType::Nfs => "nfs",
            FsType::Nfs4 => "nfs4",
            FsType::Other(name) => name,
        }
    }
}

impl fmt::Display for FsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use std::path::PathBuf;

use clap::Parser;

use crate::config::model::ConfigOverrides;

#[derive(Parser, Debug)]
#[command(
    name = "check-mountpoints",
    version,
    about = "Check that NFS mountpoints from fstab are mounted and writable"
)]
pub struct Cli {
    /// Run a create/write/close/remove test on read-write mounts
    #[arg(long, short = 'w')]
    pub write_test: bool,
    /// Mountpoint to check; repeat for several. Default: every NFS entry in fstab
    #[arg(long = "mountpoint", short = 'm', value_name = "PATH")]
    pub mountpoints: Vec<PathBuf>,
    #[arg(long, value_name = "PATH")]
    pub fstab: Option<PathBuf>,
    #[arg(long, value_name = "PATH")]
    pub mounts: Option<PathBuf>,
    /// Write test deadline in seconds; 0 disables it
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
    /// Align messages in the report
    #[arg(long)]
    pub align: bool,
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            write_test: self.write_test,
            mountpoints: self.mountpoints.clone(),
            fstab: self.fstab.clone(),
            mounts: self.mounts.clone(),
            probe_timeout_secs: self.timeout,
            align: self.align,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_mountpoints_are_collected() {
        let cli = Cli::try_parse_from([
            "check-mountpoints",
            "-w",
            "-m",
            "/data",
            "--mountpoint",
            "/backup",
            "--timeout",
            "0",
        ])
        .expect("parse");
        let overrides = cli.overrides();
        assert!(overrides.write_test);
        assert_eq!(
            overrides.mountpoints,
            vec![PathBuf::from("/data"), PathBuf::from("/backup")]
        );
        assert_eq!(overrides.probe_timeout_secs, Some(0));
    }

    #[test]
    fn no_flags_means_discovery_without_write_test() {
        let cli = Cli::try_parse_from(["check-mountpoints"]).expect("parse");
        assert!(!cli.write_test);
        assert!(cli.mountpoints.is_empty());
        assert!(cli.config.is_none());
    }
}

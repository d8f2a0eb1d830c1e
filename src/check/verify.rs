use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, warn};

use crate::check::targets::TargetSelection;
use crate::mount::fstab::MountTable;
use crate::mount::inspect::LivePartitions;
use crate::mount::options::parse_options;
use crate::probe::WriteProbe;
use crate::types::{MountResult, Status};

pub const MSG_NOT_IN_FSTAB: &str = "Path not found in fstab";
pub const MSG_NOT_MOUNTED: &str = "Path not mounted";
pub const MSG_MISSING: &str = "Path does not exist";
pub const MSG_RW_UNTESTED: &str = "Path mounted as rw but not tested";
pub const MSG_RW_WRITABLE: &str = "Path mounted as rw and writable";
pub const MSG_RO: &str = "Path mounted as ro";

/// Classifies mountpoints against one snapshot of fstab and the live mounts.
pub struct MountVerifier<'a, P: WriteProbe + ?Sized> {
    table: &'a MountTable,
    partitions: &'a LivePartitions,
    write_test: bool,
    probe: &'a P,
}

impl<'a, P: WriteProbe + ?Sized> MountVerifier<'a, P> {
    pub fn new(
        table: &'a MountTable,
        partitions: &'a LivePartitions,
        write_test: bool,
        probe: &'a P,
    ) -> Self {
        Self {
            table,
            partitions,
            write_test,
            probe,
        }
    }

    /// Evaluate every selected target in order. One target failing never
    /// stops the others.
    pub fn verify_all(&self, selection: &dyn TargetSelection) -> Vec<MountResult> {
        selection
            .select(self.table)
            .iter()
            .map(|path| self.verify(path))
            .collect()
    }

    pub fn verify(&self, path: &Path) -> MountResult {
        let result = self.classify(path);
        debug!(
            path = %path.display(),
            status = %result.status,
            message = %result.message,
            "mountpoint checked"
        );
        result
    }

    fn classify(&self, path: &Path) -> MountResult {
        if !self.table.contains(path) {
            return MountResult::new(path, Status::Unknown, MSG_NOT_IN_FSTAB);
        }
        let partition = match self.partitions.get(path) {
            Some(partition) => partition,
            None => return MountResult::new(path, Status::Critical, MSG_NOT_MOUNTED),
        };
        let mount_path = partition.mount_path.as_path();
        if let Err(err) = fs::metadata(mount_path) {
            if err.kind() == io::ErrorKind::NotFound {
                return MountResult::new(mount_path, Status::Critical, MSG_MISSING);
            }
            debug!(path = %mount_path.display(), error = %err, "stat failed; continuing");
        }

        debug!(
            path = %mount_path.display(),
            device = %partition.device,
            fs_type = %partition.fs_type,
            options = %partition.raw_options,
            "live partition"
        );
        let options = parse_options(&partition.raw_options);
        if !options.is_read_write() {
            return MountResult::new(mount_path, Status::Ok, MSG_RO);
        }
        if !self.write_test {
            return MountResult::new(mount_path, Status::Ok, MSG_RW_UNTESTED);
        }
        match self.probe.probe(mount_path) {
            Ok(()) => MountResult::new(mount_path, Status::Ok, MSG_RW_WRITABLE),
            Err(err) => {
                warn!(path = %mount_path.display(), error = %err, "write probe failed");
                MountResult::new(
                    mount_path,
                    Status::Critical,
                    format!("Path mounted as rw but not writable (step: {})", err.label()),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::targets::{DiscoveredTargets, ExplicitTargets};
    use crate::mount::fs_type::FsType;
    use crate::mount::fstab::MountTableEntry;
    use crate::mount::inspect::LivePartition;
    use crate::probe::{FileWriteProbe, ProbeFailure, ProbeStep};
    use std::cell::Cell;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct MockProbe {
        fail_at: Option<ProbeStep>,
        calls: Cell<usize>,
    }

    impl MockProbe {
        fn new(fail_at: Option<ProbeStep>) -> Self {
            Self {
                fail_at,
                calls: Cell::new(0),
            }
        }
    }

    impl WriteProbe for MockProbe {
        fn probe(&self, _dir: &Path) -> Result<(), ProbeFailure> {
            self.calls.set(self.calls.get() + 1);
            match self.fail_at {
                Some(step) => Err(ProbeFailure::Step {
                    step,
                    source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
                }),
                None => Ok(()),
            }
        }
    }

    fn entry(path: &Path) -> MountTableEntry {
        MountTableEntry {
            device: "nas:/srv".to_string(),
            path: path.to_path_buf(),
            fs_type: FsType::Nfs4,
            options: "rw".to_string(),
        }
    }

    fn partition(path: &Path, options: &str) -> LivePartition {
        LivePartition {
            device: "nas:/srv".to_string(),
            mount_path: path.to_path_buf(),
            fs_type: FsType::Nfs4,
            raw_options: options.to_string(),
        }
    }

    #[test]
    fn rw_mount_with_passing_probe_is_writable() {
        let dir = TempDir::new().expect("tempdir");
        let table = MountTable::new(vec![entry(dir.path())]);
        let live = LivePartitions::new(vec![partition(dir.path(), "rw,hard,timeo=600")]);
        let probe = MockProbe::new(None);
        let verifier = MountVerifier::new(&table, &live, true, &probe);
        let result = verifier.verify(dir.path());
        assert_eq!(result.status, Status::Ok);
        assert_eq!(result.message, MSG_RW_WRITABLE);
        assert_eq!(probe.calls.get(), 1);
    }

    #[test]
    fn rw_mount_with_real_probe_is_writable() {
        let dir = TempDir::new().expect("tempdir");
        let table = MountTable::new(vec![entry(dir.path())]);
        let live = LivePartitions::new(vec![partition(dir.path(), "rw")]);
        let probe = FileWriteProbe::new(None);
        let verifier = MountVerifier::new(&table, &live, true, &probe);
        assert_eq!(verifier.verify(dir.path()).message, MSG_RW_WRITABLE);
    }

    #[test]
    fn write_test_disabled_never_probes() {
        let dir = TempDir::new().expect("tempdir");
        let table = MountTable::new(vec![entry(dir.path())]);
        let live = LivePartitions::new(vec![partition(dir.path(), "rw")]);
        let probe = MockProbe::new(Some(ProbeStep::Create));
        let verifier = MountVerifier::new(&table, &live, false, &probe);
        let result = verifier.verify(dir.path());
        assert_eq!(result.status, Status::Ok);
        assert_eq!(result.message, "Path mounted as rw but not tested");
        assert_eq!(probe.calls.get(), 0);
    }

    #[test]
    fn probe_failure_reports_first_step() {
        let dir = TempDir::new().expect("tempdir");
        let table = MountTable::new(vec![entry(dir.path())]);
        let live = LivePartitions::new(vec![partition(dir.path(), "rw")]);
        let probe = MockProbe::new(Some(ProbeStep::Write));
        let verifier = MountVerifier::new(&table, &live, true, &probe);
        let result = verifier.verify(dir.path());
        assert_eq!(result.status, Status::Critical);
        assert_eq!(
            result.message,
            "Path mounted as rw but not writable (step: write file)"
        );
    }

    struct StalledProbe;

    impl WriteProbe for StalledProbe {
        fn probe(&self, _dir: &Path) -> Result<(), ProbeFailure> {
            Err(ProbeFailure::TimedOut(std::time::Duration::from_secs(30)))
        }
    }

    #[test]
    fn timed_out_write_test_is_critical() {
        let dir = TempDir::new().expect("tempdir");
        let table = MountTable::new(vec![entry(dir.path())]);
        let live = LivePartitions::new(vec![partition(dir.path(), "rw")]);
        let verifier = MountVerifier::new(&table, &live, true, &StalledProbe);
        let result = verifier.verify(dir.path());
        assert_eq!(result.status, Status::Critical);
        assert_eq!(
            result.message,
            "Path mounted as rw but not writable (step: timed out after 30s)"
        );
    }

    #[test]
    fn read_only_mount_is_not_probed() {
        let dir = TempDir::new().expect("tempdir");
        let table = MountTable::new(vec![entry(dir.path())]);
        let live = LivePartitions::new(vec![partition(dir.path(), "ro,relatime")]);
        let probe = MockProbe::new(None);
        let verifier = MountVerifier::new(&table, &live, true, &probe);
        let result = verifier.verify(dir.path());
        assert_eq!(result.status, Status::Ok);
        assert_eq!(result.message, MSG_RO);
        assert_eq!(probe.calls.get(), 0);
    }

    #[test]
    fn missing_path_is_critical() {
        let dir = TempDir::new().expect("tempdir");
        let gone = dir.path().join("gone");
        let table = MountTable::new(vec![entry(&gone)]);
        let live = LivePartitions::new(vec![partition(&gone, "rw")]);
        let probe = MockProbe::new(None);
        let verifier = MountVerifier::new(&table, &live, true, &probe);
        let result = verifier.verify(&gone);
        assert_eq!(result.status, Status::Critical);
        assert_eq!(result.message, MSG_MISSING);
        assert_eq!(probe.calls.get(), 0);
    }

    #[test]
    fn unmounted_and_unknown_paths() {
        let table = MountTable::new(vec![entry(Path::new("/backup"))]);
        let live = LivePartitions::default();
        let probe = MockProbe::new(None);
        let verifier = MountVerifier::new(&table, &live, true, &probe);
        let selection =
            ExplicitTargets::new(vec![PathBuf::from("/scratch"), PathBuf::from("/backup")]);
        let results = verifier.verify_all(&selection);
        assert_eq!(
            results,
            vec![
                MountResult::new("/backup", Status::Critical, MSG_NOT_MOUNTED),
                MountResult::new("/scratch", Status::Unknown, MSG_NOT_IN_FSTAB),
            ]
        );
    }

    #[test]
    fn discovery_evaluates_every_fstab_entry() {
        let dir = TempDir::new().expect("tempdir");
        let table = MountTable::new(vec![entry(dir.path()), entry(Path::new("/backup"))]);
        let live = LivePartitions::new(vec![partition(dir.path(), "ro")]);
        let probe = MockProbe::new(None);
        let verifier = MountVerifier::new(&table, &live, false, &probe);
        let results = verifier.verify_all(&DiscoveredTargets);
        assert_eq!(results.len(), 2);
        assert!(results
            .iter()
            .all(|r| r.status != Status::Unknown));
    }
}

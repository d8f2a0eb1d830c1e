use tracing::{info, warn};

use crate::check::report::aggregate;
use crate::check::verify::MountVerifier;
use crate::config::model::CheckConfig;
use crate::mount::fstab::{read_mount_table, MountTable};
use crate::mount::inspect::{read_live_partitions, LivePartitions};
use crate::probe::{FileWriteProbe, WriteProbe};
use crate::types::OverallResult;

pub mod report;
pub mod targets;
pub mod verify;

/// Plugin name printed in front of the status.
pub const CHECK_NAME: &str = "MountPoints";

/// Read both snapshots and evaluate them. Failing to read either one is
/// fatal and yields UNKNOWN without per-mount results.
pub fn run_check(config: &CheckConfig) -> OverallResult {
    let table = match read_mount_table(&config.fstab_path) {
        Ok(table) => table,
        Err(err) => {
            warn!(error = %err, "mount table unavailable");
            return OverallResult::unknown(format!("Failed to fetch fstab info: {}", err));
        }
    };
    let partitions = match read_live_partitions(&config.mounts_path) {
        Ok(partitions) => partitions,
        Err(err) => {
            warn!(error = %err, "live partitions unavailable");
            return OverallResult::unknown(format!("Failed to fetch disks info: {}", err));
        }
    };
    let probe = FileWriteProbe::new(config.probe_timeout);
    evaluate(config, &table, &partitions, &probe)
}

pub fn evaluate<P: WriteProbe + ?Sized>(
    config: &CheckConfig,
    table: &MountTable,
    partitions: &LivePartitions,
    probe: &P,
) -> OverallResult {
    let selection = config.target_selection();
    let verifier = MountVerifier::new(table, partitions, config.write_test, probe);
    let results = verifier.verify_all(selection.as_ref());
    let overall = aggregate(&results, config.report_style);
    info!(
        mounts = results.len(),
        status = %overall.status,
        "mountpoint check finished"
    );
    overall
}

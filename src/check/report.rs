use crate::types::{MountResult, OverallResult, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportStyle {
    /// `<path>: <message>`
    #[default]
    Plain,
    /// Messages column-aligned to the longest path.
    Aligned,
}

/// CRITICAL if any mount is CRITICAL, otherwise OK. UNKNOWN and WARNING
/// results never raise the overall status.
pub fn overall_status(results: &[MountResult]) -> Status {
    if results.iter().any(|r| r.status == Status::Critical) {
        Status::Critical
    } else {
        Status::Ok
    }
}

/// One line per mount, ordered by path bytes regardless of input order.
pub fn build_report(results: &[MountResult], style: ReportStyle) -> String {
    let mut sorted: Vec<(String, &str)> = results
        .iter()
        .map(|r| (r.mount_path.display().to_string(), r.message.as_str()))
        .collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));

    let width = sorted.iter().map(|(path, _)| path.chars().count()).max().unwrap_or(0);
    let lines: Vec<String> = sorted
        .iter()
        .map(|(path, message)| match style {
            ReportStyle::Plain => format!("{}: {}", path, message),
            ReportStyle::Aligned => {
                let padding = width - path.chars().count() + 1;
                format!("{}{}: {}", path, " ".repeat(padding), message)
            }
        })
        .collect();
    lines.join("\n")
}

pub fn aggregate(results: &[MountResult], style: ReportStyle) -> OverallResult {
    OverallResult {
        status: overall_status(results),
        report: build_report(results, style),
    }
}

use pkgdelta_operations::RunConfig;
use pkgdelta_operations::operations::RunOutput;

use super::{OutputFormatter, safe_name};

pub(crate) const CHANGED_VARIABLE: &str = "changed";

/// Builds the stdout report of a run: one version variable per resolved
/// package, then the aggregate changed list.
pub(crate) fn render_report(
    output: &RunOutput,
    config: &RunConfig,
    formatter: &dyn OutputFormatter,
) -> serde_json::Result<String> {
    let mut report = String::new();

    if config.version {
        for resolved in output.resolved() {
            report.push_str(&formatter.format_variable(&safe_name(&resolved.name), &resolved.version));
            report.push('\n');
        }
    }

    if output.snapshot_written {
        report.push_str("folder hashes written successfully\n");
    }

    if config.changed {
        let changed = serde_json::to_string(&output.changed)?;
        report.push_str(&format!("CHANGED - {changed}\n"));
        report.push_str(&formatter.format_variable(CHANGED_VARIABLE, &changed));
        report.push('\n');
    }

    Ok(report)
}

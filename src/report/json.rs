/*!
 * JSON Report
 */

use super::SimulationReport;
use crate::core::types::KernelResult;

/// Pretty-printed JSON rendering of the whole report
pub fn render_json(report: &SimulationReport) -> KernelResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/*!
 * Simulated Kernel - Main Entry Point
 *
 * Usage: kernel [JOB_FILE]
 *
 * Reads the job file (or stdin), runs every job to completion and prints the
 * report on stdout. Logs go to stderr.
 */

use miette::IntoDiagnostic;
use sim_kernel::{init_tracing, read_input, simulate, ReportFormat};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

fn main() -> miette::Result<()> {
    // Initialize structured tracing
    init_tracing();

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let format = ReportFormat::from_env();
    info!(input = ?path, ?format, "kernel starting");

    let input = read_input(path.as_deref())?;
    let report = simulate(input)?;
    let rendered = format.render(&report)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes()).into_diagnostic()?;
    stdout.flush().into_diagnostic()?;

    info!(
        run_id = %report.run_id,
        total_cpu_time = report.total_cpu_time,
        "kernel finished"
    );
    Ok(())
}

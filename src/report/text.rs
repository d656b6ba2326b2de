/*!
 * Text Report
 * Line-oriented transcript of a run
 */

use super::SimulationReport;
use crate::monitoring::{Event, Payload};
use crate::scheduler::CompletionRecord;
use std::fmt::{self, Write};

/// Render the transcript.
///
/// Load rejections come first, then the memory dump taken after loading, the
/// chronological run trace and finally the total CPU time line.
pub fn render_text(report: &SimulationReport) -> String {
    Transcript(report).to_string()
}

struct Transcript<'a>(&'a SimulationReport);

impl fmt::Display for Transcript<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;

        for event in report.events.iter().filter(|e| e.payload.is_load_phase()) {
            write_event(out, event)?;
        }

        for (index, value) in report.memory_after_load.iter().enumerate() {
            writeln!(out, "{index} : {value}")?;
        }

        for event in report.events.iter().filter(|e| !e.payload.is_load_phase()) {
            write_event(out, event)?;
        }

        writeln!(out, "Total CPU time used: {}.", report.total_cpu_time)
    }
}

fn write_event(out: &mut impl Write, event: &Event) -> fmt::Result {
    let pid = event.pid.unwrap_or_default();
    match &event.payload {
        Payload::ProcessLoaded { .. } | Payload::Idle { .. } => Ok(()),
        Payload::LoadRejected {
            insufficient_memory: true,
            ..
        } => writeln!(out, "Not enough memory for process {pid}"),
        Payload::LoadRejected { reason, .. } => writeln!(out, "Process {pid} rejected: {reason}"),
        Payload::Dispatched => writeln!(out, "Process {pid} has moved to Running."),
        Payload::Computed { .. } => writeln!(out, "compute"),
        Payload::Stored { .. } => writeln!(out, "stored"),
        Payload::StoreFault { .. } => writeln!(out, "stored\nstore error!"),
        Payload::Loaded { .. } => writeln!(out, "loaded"),
        Payload::LoadFault { .. } => writeln!(out, "loaded\nload error!"),
        Payload::IoRequested { .. } => writeln!(
            out,
            "Process {pid} issued an IOInterrupt and moved to the IOWaitingQueue."
        ),
        Payload::IoCompleted => writeln!(
            out,
            "print\nProcess {pid} completed I/O and is moved to the ReadyQueue."
        ),
        Payload::TimedOut => writeln!(
            out,
            "Process {pid} has a TimeOUT interrupt and is moved to the ReadyQueue."
        ),
        Payload::InvariantViolation { .. } => writeln!(out, "ERROR"),
        Payload::Terminated(record) => write_completion(out, record),
    }
}

/// PCB dump printed on termination.
///
/// "Program Counter" is the retired instruction count, which equals the
/// program length for a terminated process. It is not the address
/// `main_memory_base + 9` some reference transcripts print there, and header
/// cell 2 keeps the same instruction count.
fn write_completion(out: &mut impl Write, record: &CompletionRecord) -> fmt::Result {
    let header = &record.header;
    writeln!(out, "Process ID: {}", header.process_id)?;
    writeln!(out, "State: {}", header.state)?;
    writeln!(out, "Program Counter: {}", header.program_counter)?;
    writeln!(out, "Instruction Base: {}", header.instruction_base)?;
    writeln!(out, "Data Base: {}", header.data_base)?;
    writeln!(out, "Memory Limit: {}", header.memory_limit)?;
    writeln!(out, "CPU Cycles Used: {}", header.cpu_cycles_used)?;
    writeln!(out, "Register Value: {}", header.register_value)?;
    writeln!(out, "Max Memory Needed: {}", header.max_memory_needed)?;
    writeln!(out, "Main Memory Base: {}", header.main_memory_base)?;
    writeln!(out, "Total CPU Cycles Consumed: {}", record.total_execution_time)?;
    writeln!(
        out,
        "Process {} terminated. Entered running state at: {}. Terminated at: {}. Total Execution Time: {}.",
        header.process_id, record.started_at, record.terminated_at, record.total_execution_time
    )
}

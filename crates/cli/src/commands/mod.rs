//! CLI command implementations.

pub mod heartbeat;
pub mod reminders;
pub mod report;
pub mod seed;

use std::fs::OpenOptions;
use std::io::Write;

/// Append one line to a log file, creating it if needed.
pub(crate) fn append_log_line(path: &str, line: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")
}

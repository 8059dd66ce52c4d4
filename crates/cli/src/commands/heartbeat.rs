//! Liveness heartbeat: probe the server and append a log line.

use chrono::Local;
use tracing::info;

use super::append_log_line;

/// Probe `GET /health` and append a timestamped heartbeat line.
///
/// The line is written even when the endpoint is unreachable, so the log
/// shows the CRM process itself ran on schedule.
///
/// # Errors
///
/// Returns an error only if the log file cannot be written.
pub async fn run(base_url: &str, log_file: &str) -> Result<(), Box<dyn std::error::Error>> {
    let timestamp = Local::now().format("%d/%m/%Y-%H:%M:%S");
    let mut message = format!("{timestamp} CRM is alive");

    match probe(base_url).await {
        Ok(body) => message.push_str(&format!(" - endpoint responsive: {body}")),
        Err(e) => message.push_str(&format!(" - endpoint check failed: {e}")),
    }

    append_log_line(log_file, &message)?;
    info!("{message}");
    Ok(())
}

async fn probe(base_url: &str) -> Result<String, reqwest::Error> {
    reqwest::Client::new()
        .get(format!("{base_url}/health"))
        .send()
        .await?
        .error_for_status()?
        .text()
        .await
}

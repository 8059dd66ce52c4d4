//! Store-wide report: totals for customers, orders, and revenue.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use super::append_log_line;

#[derive(Debug, Deserialize)]
struct ReportResponse {
    total_customers: usize,
    total_orders: usize,
    total_revenue: Decimal,
}

/// Fetch `GET /report` and append a timestamped summary line.
///
/// # Errors
///
/// Returns an error on network failures or if the log file cannot be
/// written.
pub async fn run(base_url: &str, log_file: &str) -> Result<(), Box<dyn std::error::Error>> {
    let report: ReportResponse = reqwest::Client::new()
        .get(format!("{base_url}/report"))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let line = format!(
        "{} - Report: {} customers, {} orders, {} revenue",
        Utc::now().format("%Y-%m-%d %H:%M:%S"),
        report.total_customers,
        report.total_orders,
        report.total_revenue
    );
    append_log_line(log_file, &line)?;
    info!("{line}");
    Ok(())
}

//! Order reminders: log every order placed in the last N days together
//! with its customer's email.

use std::collections::HashMap;

use chrono::{Duration, SecondsFormat, Utc};
use tracing::info;

use clementine_core::{Customer, CustomerId, Order};

use super::append_log_line;

/// Fetch recent orders through the filter API and append one reminder line
/// per order.
///
/// # Errors
///
/// Returns an error on network failures or if the log file cannot be
/// written.
pub async fn run(
    base_url: &str,
    days: i64,
    log_file: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();
    let stamp = || Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();

    append_log_line(
        log_file,
        &format!("[{}] Starting order reminders processing...", stamp()),
    )?;

    let cutoff = (Utc::now() - Duration::days(days)).to_rfc3339_opts(SecondsFormat::Secs, true);
    let orders: Vec<Order> = client
        .get(format!("{base_url}/orders"))
        .query(&[("order_date_gte", cutoff.as_str())])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    // One lookup for all owner emails.
    let customers: Vec<Customer> = client
        .get(format!("{base_url}/customers"))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    let emails: HashMap<CustomerId, &str> = customers
        .iter()
        .map(|c| (c.id, c.email.as_str()))
        .collect();

    if orders.is_empty() {
        append_log_line(
            log_file,
            &format!("[{}] No orders found in the last {days} days.", stamp()),
        )?;
    } else {
        for order in &orders {
            let email = emails.get(&order.customer_id).copied().unwrap_or("unknown");
            append_log_line(
                log_file,
                &format!(
                    "[{}] Order ID: {}, Customer Email: {email}",
                    stamp(),
                    order.id
                ),
            )?;
        }
    }

    append_log_line(
        log_file,
        &format!(
            "[{}] Order reminders processed! Total orders: {}",
            stamp(),
            orders.len()
        ),
    )?;
    info!(total = orders.len(), "Order reminders processed!");
    Ok(())
}

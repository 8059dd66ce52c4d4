//! Clementine CLI - seeding and maintenance one-shots.
//!
//! Every command talks HTTP to a running `clementine-server`; scheduling
//! (cron, systemd timers) stays outside this binary.
//!
//! # Usage
//!
//! ```bash
//! # Seed the server with sample data
//! clem-cli seed --customers 10 --products 15 --orders 20
//!
//! # Log a liveness heartbeat
//! clem-cli heartbeat
//!
//! # Log reminders for orders placed in the last 7 days
//! clem-cli order-reminders
//!
//! # Print store totals
//! clem-cli report
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "clem-cli")]
#[command(author, version, about = "Clementine CRM CLI tools")]
struct Cli {
    /// Base URL of the running CRM server.
    #[arg(long, global = true, default_value = "http://127.0.0.1:8000")]
    base_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the server with sample customers, products, and orders
    Seed {
        /// Number of customers to create
        #[arg(long, default_value_t = 10)]
        customers: usize,

        /// Number of products to create
        #[arg(long, default_value_t = 15)]
        products: usize,

        /// Number of orders to create
        #[arg(long, default_value_t = 20)]
        orders: usize,
    },
    /// Check server liveness and append a heartbeat log line
    Heartbeat {
        /// File the heartbeat line is appended to
        #[arg(long, default_value = "/tmp/crm_heartbeat_log.txt")]
        log_file: String,
    },
    /// Log reminder lines for recently placed orders
    OrderReminders {
        /// How many days back counts as recent
        #[arg(long, default_value_t = 7)]
        days: i64,

        /// File the reminder lines are appended to
        #[arg(long, default_value = "/tmp/order_reminders_log.txt")]
        log_file: String,
    },
    /// Fetch and log store-wide totals
    Report {
        /// File the report line is appended to
        #[arg(long, default_value = "/tmp/crm_report_log.txt")]
        log_file: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed {
            customers,
            products,
            orders,
        } => commands::seed::run(&cli.base_url, customers, products, orders).await?,
        Commands::Heartbeat { log_file } => {
            commands::heartbeat::run(&cli.base_url, &log_file).await?;
        }
        Commands::OrderReminders { days, log_file } => {
            commands::reminders::run(&cli.base_url, days, &log_file).await?;
        }
        Commands::Report { log_file } => commands::report::run(&cli.base_url, &log_file).await?,
    }
    Ok(())
}

//! # Roster - Admin Dashboard
//!
//! The main binary for Roster.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                 apps/roster (THE BINARY)              │
//! │                                                       │
//! │  ┌─────────────┐   ┌─────────────┐   ┌────────────┐   │
//! │  │    CLI      │   │   Config    │   │ MockSource │   │
//! │  │   (clap)    │   │   (toml)    │   │  (tokio)   │   │
//! │  └──────┬──────┘   └──────┬──────┘   └─────┬──────┘   │
//! │         └─────────────────┼────────────────┘          │
//! │                           ▼                           │
//! │                   ┌───────────────┐                   │
//! │                   │  roster-core  │                   │
//! │                   │  (THE LOGIC)  │                   │
//! │                   └───────────────┘                   │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! roster login ada@example.com
//! roster users list --role admin --sort name
//! roster products export -o products.csv --in-stock
//! roster navigate /workflows
//! ```

use clap::Parser;
use roster::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Initialize tracing: ROSTER_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("ROSTER_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "roster=info".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

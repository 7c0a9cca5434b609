//! # Roster
//!
//! Command-line front end for the Roster admin dashboard.
//!
//! The binary in `main.rs` only sets up tracing and calls [`cli::execute`];
//! everything else lives here so integration tests can drive it.

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod notifier;
pub mod source;

pub use config::{Config, ConfigError};
pub use context::AppContext;
pub use error::AppError;
pub use notifier::ConsoleNotifier;
pub use source::MockSource;

//! # Mock Data Source
//!
//! Serves the fixed demo datasets after a simulated network delay.

use crate::config::DataConfig;
use chrono::{DateTime, Utc};
use roster_core::fixtures::{mock_products, mock_users};
use roster_core::{Product, RecordSource, RosterError, User};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct MockSource {
    latency: Duration,
    submit_latency: Duration,
    fail_fetch: bool,
    now: DateTime<Utc>,
}

impl MockSource {
    #[must_use]
    pub fn new(config: &DataConfig) -> Self {
        Self {
            latency: config.latency(),
            submit_latency: config.submit_latency(),
            fail_fetch: config.fail_fetch,
            now: Utc::now(),
        }
    }

    /// Pretend to send a form.
    pub async fn submit(&self) -> Result<(), RosterError> {
        tokio::time::sleep(self.submit_latency).await;
        Ok(())
    }

    async fn respond<T>(&self, records: Vec<T>) -> Result<Vec<T>, RosterError> {
        tokio::time::sleep(self.latency).await;
        if self.fail_fetch {
            return Err(RosterError::Fetch("mock source configured to fail".into()));
        }
        Ok(records)
    }
}

impl RecordSource<User> for MockSource {
    async fn fetch(&self) -> Result<Vec<User>, RosterError> {
        self.respond(mock_users(self.now)).await
    }
}

impl RecordSource<Product> for MockSource {
    async fn fetch(&self) -> Result<Vec<Product>, RosterError> {
        self.respond(mock_products(self.now)).await
    }
}

use thiserror::Error;

use crate::traits::Stats;

#[derive(Debug, Clone, Error)]
pub enum ReportingError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for ReportingError {
    fn from(e: sqlx::Error) -> Self {
        ReportingError::DatabaseError(e.to_string())
    }
}

/// Read-only aggregate queries for the admin dashboard.
#[allow(async_fn_in_trait)]
pub trait ReportingManagement {
    /// Counts principals, menu items and payments, and sums the price of every payment. Revenue is zero when there are
    /// no payments.
    async fn fetch_stats(&self) -> Result<Stats, ReportingError>;
}

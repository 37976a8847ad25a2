use std::fmt::Debug;

use crate::traits::{ReportingError, ReportingManagement, Stats};

/// Aggregate reporting for the admin dashboard. Read-only.
pub struct StatsApi<B> {
    db: B,
}

impl<B: Debug> Debug for StatsApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StatsApi ({:?})", self.db)
    }
}

impl<B> StatsApi<B>
where B: ReportingManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn stats(&self) -> Result<Stats, ReportingError> {
        self.db.fetch_stats().await
    }
}

//! Occurrence source clients.

pub mod gbif;

use async_trait::async_trait;
use occurra_common::Result;

use crate::models::OccurrenceTable;
use crate::query::OccurrenceQuery;

/// Common interface for occurrence databases.
#[async_trait]
pub trait OccurrenceSource: Send + Sync {
    /// Run one search and return the rows that carry coordinates.
    async fn search(&self, query: &OccurrenceQuery) -> Result<OccurrenceTable>;
}

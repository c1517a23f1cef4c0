//! occurra-ingestion — Occurrence retrieval and shaping.
//! - Query building (species, limit, year range, bounding box)
//! - GBIF occurrence search client
//! - Flattening results into table rows
//! - CSV export
//! - Summary statistics for the charts

pub mod export;
pub mod models;
pub mod query;
pub mod sources;
pub mod summary;

pub use models::{MapPoint, OccurrenceRecord, OccurrenceTable};
pub use query::{BoundingBox, OccurrenceQuery, YearRange};
pub use summary::Summary;

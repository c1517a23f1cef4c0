//! Data models for occurrence results.

use serde::{Deserialize, Serialize};

/// One species sighting with coordinates, flattened from a GBIF result.
///
/// Field names serialize to the column headers of the exported CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccurrenceRecord {
    pub species: String,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
    pub country: Option<String>,
    #[serde(rename = "date")]
    pub event_date: Option<String>,
    #[serde(rename = "basisOfRecord")]
    pub basis_of_record: Option<String>,
}

/// A marker position on the occurrence map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapPoint {
    pub lat: f64,
    pub lon: f64,
}

/// The rows returned by one query, in API order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OccurrenceTable {
    records: Vec<OccurrenceRecord>,
}

impl OccurrenceTable {
    pub fn new(records: Vec<OccurrenceRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[OccurrenceRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<OccurrenceRecord> {
        self.records
    }

    /// First `n` rows, for the on-screen table.
    pub fn preview(&self, n: usize) -> &[OccurrenceRecord] {
        &self.records[..n.min(self.records.len())]
    }

    pub fn map_points(&self) -> Vec<MapPoint> {
        self.records
            .iter()
            .map(|r| MapPoint { lat: r.latitude, lon: r.longitude })
            .collect()
    }
}

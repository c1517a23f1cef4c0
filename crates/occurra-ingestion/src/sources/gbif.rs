//! GBIF occurrence search client.
//!
//! Endpoint: https://api.gbif.org/v1/occurrence/search
//!
//! Each result becomes an OccurrenceRecord with:
//!   - species         = scientificName
//!   - latitude        = decimalLatitude
//!   - longitude       = decimalLongitude
//!   - country         = country
//!   - event_date      = eventDate
//!   - basis_of_record = basisOfRecord
//!
//! Results without both coordinates are dropped.

use std::time::Duration;

use async_trait::async_trait;
use occurra_common::sandbox::SandboxClient as Client;
use occurra_common::Result;
use occurra_config::GbifConfig;
use tracing::{debug, instrument};

use crate::models::{OccurrenceRecord, OccurrenceTable};
use crate::query::OccurrenceQuery;
use super::OccurrenceSource;

pub const GBIF_SEARCH_URL: &str = "https://api.gbif.org/v1/occurrence/search";

pub struct GbifClient {
    client: Client,
    endpoint: String,
}

impl GbifClient {
    pub fn new() -> Result<Self> {
        Ok(Self { client: Client::new()?, endpoint: GBIF_SEARCH_URL.to_string() })
    }

    /// Build a client for the configured endpoint and timeout.
    pub fn from_config(cfg: &GbifConfig) -> Result<Self> {
        let mut client = Client::with_timeout(Duration::from_secs(cfg.timeout_secs))?;
        client.allow_url_host(&cfg.endpoint)?;
        Ok(Self { client, endpoint: cfg.endpoint.clone() })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn search_raw(&self, query: &OccurrenceQuery) -> Result<serde_json::Value> {
        let body = self.client
            .get(&self.endpoint)?
            .query(&query.to_params())
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;
        Ok(body)
    }
}

#[async_trait]
impl OccurrenceSource for GbifClient {
    #[instrument(skip(self, query), fields(species = %query.species, limit = query.limit))]
    async fn search(&self, query: &OccurrenceQuery) -> Result<OccurrenceTable> {
        query.validate()?;

        let body = self.search_raw(query).await?;
        let records = results_to_records(&body);
        debug!(
            returned = body["results"].as_array().map(|r| r.len()).unwrap_or(0),
            kept = records.len(),
            "GBIF occurrences retrieved"
        );

        Ok(OccurrenceTable::new(records))
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────

/// Flatten a search response into rows, keeping only results with coordinates.
pub fn results_to_records(body: &serde_json::Value) -> Vec<OccurrenceRecord> {
    body["results"]
        .as_array()
        .map(|results| results.iter().filter_map(result_to_record).collect())
        .unwrap_or_default()
}

fn result_to_record(result: &serde_json::Value) -> Option<OccurrenceRecord> {
    let latitude = result["decimalLatitude"].as_f64()?;
    let longitude = result["decimalLongitude"].as_f64()?;
    // empty text is stored as absent so it survives a CSV round trip
    let text = |field: &str| result[field].as_str().filter(|s| !s.is_empty()).map(String::from);

    Some(OccurrenceRecord {
        species: text("scientificName").unwrap_or_default(),
        latitude,
        longitude,
        country: text("country"),
        event_date: text("eventDate"),
        basis_of_record: text("basisOfRecord"),
    })
}

//! CSV export of occurrence tables.
//!
//! Layout: `species,lat,lon,country,date,basisOfRecord`, one row per record,
//! absent optional fields as empty cells.

use occurra_common::{OccurraError, Result};

use crate::models::{OccurrenceRecord, OccurrenceTable};

impl OccurrenceTable {
    /// Serialize every row (not just the preview) as UTF-8 CSV.
    pub fn to_csv(&self) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        if self.is_empty() {
            // serde only emits headers alongside the first record
            writer.write_record(CSV_HEADERS)?;
        }
        for record in self.records() {
            writer.serialize(record)?;
        }
        writer
            .into_inner()
            .map_err(|e| OccurraError::Csv(csv::Error::from(e.into_error())))
    }

    pub fn from_csv(bytes: &[u8]) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(bytes);
        let records = reader
            .deserialize::<OccurrenceRecord>()
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self::new(records))
    }
}

pub const CSV_HEADERS: [&str; 6] = ["species", "lat", "lon", "country", "date", "basisOfRecord"];

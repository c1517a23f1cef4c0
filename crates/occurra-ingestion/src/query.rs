//! Occurrence search filters and their mapping to GBIF query parameters.
//!
//! API docs: https://techdocs.gbif.org/en/openapi/v1/occurrence#/Searching%20occurrences
//!
//! Parameters produced:
//!   - scientificName   = species name, verbatim
//!   - limit            = max records
//!   - hasCoordinate    = always `true`
//!   - year             = "start,end" (optional)
//!   - decimalLatitude  = "min,max"  (optional, with bounding box)
//!   - decimalLongitude = "min,max"  (optional, with bounding box)

use occurra_common::{OccurraError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn to_param(&self) -> String {
        format!("{},{}", self.start, self.end)
    }
}

/// Rectangular geographic filter in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    pub fn new(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> Self {
        Self { lat_min, lat_max, lon_min, lon_max }
    }

    fn validate(&self) -> Result<()> {
        let in_lat = |v: f64| (-90.0..=90.0).contains(&v);
        let in_lon = |v: f64| (-180.0..=180.0).contains(&v);
        if !(in_lat(self.lat_min) && in_lat(self.lat_max)) {
            return Err(OccurraError::InvalidQuery(
                "bounding box latitudes must lie within [-90, 90]".to_string(),
            ));
        }
        if !(in_lon(self.lon_min) && in_lon(self.lon_max)) {
            return Err(OccurraError::InvalidQuery(
                "bounding box longitudes must lie within [-180, 180]".to_string(),
            ));
        }
        if self.lat_min > self.lat_max || self.lon_min > self.lon_max {
            return Err(OccurraError::InvalidQuery(format!(
                "bounding box minimum exceeds maximum (lat {}..{}, lon {}..{})",
                self.lat_min, self.lat_max, self.lon_min, self.lon_max
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccurrenceQuery {
    pub species: String,
    pub limit: u32,
    pub year_range: Option<YearRange>,
    pub bbox: Option<BoundingBox>,
}

impl OccurrenceQuery {
    pub fn new(species: impl Into<String>, limit: u32) -> Self {
        Self { species: species.into(), limit, year_range: None, bbox: None }
    }

    pub fn with_year_range(mut self, start: i32, end: i32) -> Self {
        self.year_range = Some(YearRange::new(start, end));
        self
    }

    pub fn with_bbox(mut self, bbox: BoundingBox) -> Self {
        self.bbox = Some(bbox);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.species.trim().is_empty() {
            return Err(OccurraError::InvalidQuery("species name is empty".to_string()));
        }
        if self.limit == 0 {
            return Err(OccurraError::InvalidQuery("limit must be at least 1".to_string()));
        }
        if let Some(years) = self.year_range {
            if years.start > years.end {
                return Err(OccurraError::InvalidQuery(format!(
                    "year range start {} is after end {}",
                    years.start, years.end
                )));
            }
        }
        if let Some(bbox) = &self.bbox {
            bbox.validate()?;
        }
        Ok(())
    }

    /// Query-string pairs for the occurrence search endpoint.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("scientificName", self.species.clone()),
            ("limit", self.limit.to_string()),
            ("hasCoordinate", "true".to_string()),
        ];

        if let Some(years) = &self.year_range {
            params.push(("year", years.to_param()));
        }

        if let Some(bbox) = &self.bbox {
            params.push(("decimalLatitude", format!("{},{}", bbox.lat_min, bbox.lat_max)));
            params.push(("decimalLongitude", format!("{},{}", bbox.lon_min, bbox.lon_max)));
        }

        params
    }

    /// File name offered for the CSV download, e.g. `Danaus_plexippus_occurrences.csv`.
    pub fn download_file_name(&self) -> String {
        format!("{}_occurrences.csv", self.species.trim().replace(' ', "_"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn param<'a>(params: &'a [(&'static str, String)], name: &str) -> Option<&'a str> {
        params.iter().find(|(k, _)| *k == name).map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_year_range_without_bbox() {
        let q = OccurrenceQuery::new("Danaus plexippus", 500).with_year_range(2000, 2020);
        let params = q.to_params();
        assert_eq!(param(&params, "scientificName"), Some("Danaus plexippus"));
        assert_eq!(param(&params, "year"), Some("2000,2020"));
        assert_eq!(param(&params, "hasCoordinate"), Some("true"));
        assert_eq!(param(&params, "limit"), Some("500"));
        assert_eq!(param(&params, "decimalLatitude"), None);
        assert_eq!(param(&params, "decimalLongitude"), None);
    }

    #[test]
    fn test_minimal_query_params() {
        let params = OccurrenceQuery::new("Apis mellifera", 100).to_params();
        assert_eq!(
            params,
            vec![
                ("scientificName", "Apis mellifera".to_string()),
                ("limit", "100".to_string()),
                ("hasCoordinate", "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_bbox_params() {
        let q = OccurrenceQuery::new("Danaus plexippus", 500)
            .with_bbox(BoundingBox::new(20.0, 50.5, -130.0, -60.25));
        let params = q.to_params();
        assert_eq!(param(&params, "decimalLatitude"), Some("20,50.5"));
        assert_eq!(param(&params, "decimalLongitude"), Some("-130,-60.25"));
        assert_eq!(param(&params, "year"), None);
    }

    #[test]
    fn test_species_kept_verbatim() {
        let name = "Quercus robur L. × petraea";
        let q = OccurrenceQuery::new(name, 100);
        assert_eq!(param(&q.to_params(), "scientificName"), Some(name));
    }

    #[test]
    fn test_validate_rejects_bad_filters() {
        assert!(OccurrenceQuery::new("   ", 100).validate().is_err());
        assert!(OccurrenceQuery::new("Danaus plexippus", 0).validate().is_err());
        assert!(OccurrenceQuery::new("Danaus plexippus", 100)
            .with_year_range(2020, 2000)
            .validate()
            .is_err());
        assert!(OccurrenceQuery::new("Danaus plexippus", 100)
            .with_bbox(BoundingBox::new(50.0, 20.0, -130.0, -60.0))
            .validate()
            .is_err());
        assert!(OccurrenceQuery::new("Danaus plexippus", 100)
            .with_bbox(BoundingBox::new(-95.0, 20.0, -130.0, -60.0))
            .validate()
            .is_err());
        assert!(OccurrenceQuery::new("Danaus plexippus", 100)
            .with_bbox(BoundingBox::new(20.0, 50.0, -130.0, 181.0))
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_accepts_defaults() {
        let q = OccurrenceQuery::new("Danaus plexippus", 500)
            .with_year_range(2000, 2020)
            .with_bbox(BoundingBox::new(20.0, 50.0, -130.0, -60.0));
        assert!(q.validate().is_ok());
        assert!(OccurrenceQuery::new("x", 1).with_year_range(2010, 2010).validate().is_ok());
    }

    #[test]
    fn test_download_file_name() {
        let q = OccurrenceQuery::new("Danaus plexippus", 500);
        assert_eq!(q.download_file_name(), "Danaus_plexippus_occurrences.csv");
    }
}

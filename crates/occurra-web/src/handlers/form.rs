//! Search controls submitted from the dashboard sidebar.

use std::str::FromStr;

use occurra_common::{OccurraError, Result};
use occurra_config::SearchConfig;
use occurra_ingestion::{BoundingBox, OccurrenceQuery};
use serde::{Deserialize, Serialize};

/// Raw query-string form. Every field is optional and numbers arrive as text,
/// since an emptied number input submits `name=`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    pub species: Option<String>,
    pub limit: Option<String>,
    pub year_start: Option<String>,
    pub year_end: Option<String>,
    pub lat_min: Option<String>,
    pub lat_max: Option<String>,
    pub lon_min: Option<String>,
    pub lon_max: Option<String>,
    /// Checkbox: present when ticked.
    pub apply_bbox: Option<String>,
}

/// The control values after defaults and clamping, echoed back into the form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Controls {
    pub species: String,
    pub limit: u32,
    pub year_start: i32,
    pub year_end: i32,
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
    pub apply_bbox: bool,
}

fn parse_or<T: FromStr>(field: &str, raw: &Option<String>, default: T) -> Result<T> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(s) => s
            .parse()
            .map_err(|_| OccurraError::InvalidQuery(format!("{field}: not a number: {s:?}"))),
    }
}

impl SearchForm {
    pub fn resolve(&self, cfg: &SearchConfig) -> Result<Controls> {
        let defaults = Controls::defaults(cfg);
        let limit = parse_or("limit", &self.limit, defaults.limit)?;
        let years = cfg.clamp_years((
            parse_or("year_start", &self.year_start, defaults.year_start)?,
            parse_or("year_end", &self.year_end, defaults.year_end)?,
        ));

        Ok(Controls {
            species: self.species.clone().unwrap_or(defaults.species),
            limit: cfg.clamp_limit(limit),
            year_start: years.0,
            year_end: years.1,
            lat_min: parse_or("lat_min", &self.lat_min, defaults.lat_min)?,
            lat_max: parse_or("lat_max", &self.lat_max, defaults.lat_max)?,
            lon_min: parse_or("lon_min", &self.lon_min, defaults.lon_min)?,
            lon_max: parse_or("lon_max", &self.lon_max, defaults.lon_max)?,
            apply_bbox: self.apply_bbox.is_some(),
        })
    }

    /// Controls for re-rendering a form that failed to resolve. The species,
    /// checkbox and every field that does parse are kept; the rest revert to defaults.
    pub fn echo(&self, cfg: &SearchConfig) -> Controls {
        let d = Controls::defaults(cfg);
        Controls {
            species: self.species.clone().unwrap_or(d.species),
            limit: cfg.clamp_limit(keep_or(&self.limit, d.limit)),
            year_start: keep_or(&self.year_start, d.year_start).clamp(cfg.min_year, cfg.max_year),
            year_end: keep_or(&self.year_end, d.year_end).clamp(cfg.min_year, cfg.max_year),
            lat_min: keep_or(&self.lat_min, d.lat_min),
            lat_max: keep_or(&self.lat_max, d.lat_max),
            lon_min: keep_or(&self.lon_min, d.lon_min),
            lon_max: keep_or(&self.lon_max, d.lon_max),
            apply_bbox: self.apply_bbox.is_some(),
        }
    }
}

fn keep_or<T: FromStr + Copy>(raw: &Option<String>, default: T) -> T {
    parse_or("", raw, default).unwrap_or(default)
}

impl Controls {
    pub fn defaults(cfg: &SearchConfig) -> Self {
        Self {
            species: cfg.default_species.clone(),
            limit: cfg.clamp_limit(cfg.default_limit),
            year_start: cfg.default_year_range.0,
            year_end: cfg.default_year_range.1,
            lat_min: cfg.default_bbox.lat_min,
            lat_max: cfg.default_bbox.lat_max,
            lon_min: cfg.default_bbox.lon_min,
            lon_max: cfg.default_bbox.lon_max,
            apply_bbox: false,
        }
    }

    /// `None` when the species box is blank: the page shows only the form.
    pub fn to_query(&self) -> Option<OccurrenceQuery> {
        if self.species.trim().is_empty() {
            return None;
        }
        let mut query = OccurrenceQuery::new(self.species.clone(), self.limit)
            .with_year_range(self.year_start, self.year_end);
        if self.apply_bbox {
            query = query.with_bbox(BoundingBox::new(self.lat_min, self.lat_max, self.lon_min, self.lon_max));
        }
        Some(query)
    }

    /// Query string reproducing these controls, for the download link.
    pub fn query_string(&self) -> String {
        let mut ser = url::form_urlencoded::Serializer::new(String::new());
        ser.append_pair("species", &self.species)
            .append_pair("limit", &self.limit.to_string())
            .append_pair("year_start", &self.year_start.to_string())
            .append_pair("year_end", &self.year_end.to_string())
            .append_pair("lat_min", &self.lat_min.to_string())
            .append_pair("lat_max", &self.lat_max.to_string())
            .append_pair("lon_min", &self.lon_min.to_string())
            .append_pair("lon_max", &self.lon_max.to_string());
        if self.apply_bbox {
            ser.append_pair("apply_bbox", "on");
        }
        ser.finish()
    }
}

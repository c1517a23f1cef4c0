//! Aggregates behind the dashboard charts: records per country and per year.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::models::{OccurrenceRecord, OccurrenceTable};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryCount {
    pub country: String,
    pub records: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub records: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub per_country: Vec<CountryCount>,
    pub per_year: Vec<YearCount>,
}

impl OccurrenceTable {
    pub fn summary(&self) -> Summary {
        Summary {
            total: self.len(),
            per_country: records_per_country(self.records()),
            per_year: records_per_year(self.records()),
        }
    }
}

/// Most frequent country first; ties broken alphabetically. Rows without a country are skipped.
pub fn records_per_country(records: &[OccurrenceRecord]) -> Vec<CountryCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for country in records.iter().filter_map(|r| r.country.as_deref()) {
        *counts.entry(country).or_default() += 1;
    }

    let mut out: Vec<CountryCount> = counts
        .into_iter()
        .map(|(country, records)| CountryCount { country: country.to_string(), records })
        .collect();
    out.sort_by(|a, b| b.records.cmp(&a.records).then_with(|| a.country.cmp(&b.country)));
    out
}

/// Ascending by year. Rows whose event date is absent or unparseable are skipped.
pub fn records_per_year(records: &[OccurrenceRecord]) -> Vec<YearCount> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for year in records.iter().filter_map(|r| r.event_date.as_deref().and_then(event_year)) {
        *counts.entry(year).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(year, records)| YearCount { year, records })
        .collect()
}

/// Year of a GBIF `eventDate`.
///
/// Accepts RFC 3339 timestamps, naive date-times, `YYYY-MM-DD`, `YYYY-MM` and `YYYY`.
/// For an interval `start/end` the start is used.
pub fn event_year(raw: &str) -> Option<i32> {
    let s = raw.split('/').next()?.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.year());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.year());
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d.year());
    }
    if let Ok(d) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
        return Some(d.year());
    }
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        return s.parse().ok();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rec(country: Option<&str>, date: Option<&str>) -> OccurrenceRecord {
        OccurrenceRecord {
            species: "Danaus plexippus".to_string(),
            latitude: 0.0,
            longitude: 0.0,
            country: country.map(String::from),
            event_date: date.map(String::from),
            basis_of_record: None,
        }
    }

    #[test]
    fn test_event_year_formats() {
        assert_eq!(event_year("2019-07-14T10:22:00"), Some(2019));
        assert_eq!(event_year("2019-07-14T10:22:00.123"), Some(2019));
        assert_eq!(event_year("2018-12-31T23:00:00Z"), Some(2018));
        assert_eq!(event_year("2018-12-31T23:00:00+02:00"), Some(2018));
        assert_eq!(event_year("2004-05-01"), Some(2004));
        assert_eq!(event_year("2004-05"), Some(2004));
        assert_eq!(event_year("1999"), Some(1999));
        assert_eq!(event_year("2010-06-01/2010-06-30"), Some(2010));
    }

    #[test]
    fn test_event_year_rejects_garbage() {
        assert_eq!(event_year(""), None);
        assert_eq!(event_year("unknown"), None);
        assert_eq!(event_year("2004-13-01"), None);
        assert_eq!(event_year("20"), None);
    }

    #[test]
    fn test_records_per_country_sorted() {
        let records = vec![
            rec(Some("Mexico"), None),
            rec(Some("United States of America"), None),
            rec(Some("Mexico"), None),
            rec(Some("Canada"), None),
            rec(None, None),
        ];
        assert_eq!(
            records_per_country(&records),
            vec![
                CountryCount { country: "Mexico".into(), records: 2 },
                CountryCount { country: "Canada".into(), records: 1 },
                CountryCount { country: "United States of America".into(), records: 1 },
            ]
        );
    }

    #[test]
    fn test_records_per_year_skips_unparseable() {
        let records = vec![
            rec(None, Some("2015-08-01")),
            rec(None, Some("2012")),
            rec(None, Some("2015-09-10T12:00:00")),
            rec(None, Some("sometime")),
            rec(None, None),
        ];
        assert_eq!(
            records_per_year(&records),
            vec![YearCount { year: 2012, records: 1 }, YearCount { year: 2015, records: 2 }]
        );
    }

    #[test]
    fn test_summary_total_counts_all_rows() {
        let table = OccurrenceTable::new(vec![rec(None, None), rec(Some("Peru"), Some("2001"))]);
        let s = table.summary();
        assert_eq!(s.total, 2);
        assert_eq!(s.per_country.len(), 1);
        assert_eq!(s.per_year, vec![YearCount { year: 2001, records: 1 }]);
    }
}

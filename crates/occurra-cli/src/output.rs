use occurra_ingestion::{OccurrenceRecord, OccurrenceTable, Summary};
use serde::Serialize;

pub const NO_RECORDS: &str = "No records found. Try changing filters or species name.";

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Serialize)]
pub struct SearchReport<'a> {
    pub species: &'a str,
    pub count: usize,
    pub records: &'a [OccurrenceRecord],
    pub summary: Summary,
}

pub fn print_json<T: Serialize>(data: T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&JsonOut { ok: true, data })?);
    Ok(())
}

pub fn print_search(species: &str, table: &OccurrenceTable, preview: usize) {
    println!("Found {} records for {}", table.len(), species);
    println!();
    println!("species\tlat\tlon\tcountry\tdate\tbasisOfRecord");
    for r in table.preview(preview) {
        println!("{}", row(r));
    }
    if table.len() > preview {
        println!("... {} more", table.len() - preview);
    }

    let summary = table.summary();
    println!();
    println!("Records per country:");
    for c in &summary.per_country {
        println!("  {}\t{}", c.country, c.records);
    }
    println!("Records per year:");
    for y in &summary.per_year {
        println!("  {}\t{}", y.year, y.records);
    }
}

fn row(r: &OccurrenceRecord) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        r.species,
        r.latitude,
        r.longitude,
        r.country.as_deref().unwrap_or("-"),
        r.event_date.as_deref().unwrap_or("-"),
        r.basis_of_record.as_deref().unwrap_or("-"),
    )
}

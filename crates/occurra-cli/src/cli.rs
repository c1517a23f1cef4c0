use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use occurra_config::SearchConfig;
use occurra_ingestion::{BoundingBox, OccurrenceQuery, YearRange};

#[derive(Parser, Debug)]
#[command(name = "occurra", version, about = "Search, summarise and export GBIF species occurrences")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(long, global = true, env = "OCCURRA_CONFIG", help = "Path to occurra.toml")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a preview of matching records and per-country / per-year counts
    Search {
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long, default_value_t = 20, help = "Rows to print")]
        preview: usize,
    },
    /// Write every matching record as CSV
    Export {
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long, help = "Output file, or - for stdout [default: <species>_occurrences.csv]")]
        out: Option<String>,
    },
    /// Run the web dashboard
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    #[arg(long, help = "Scientific name [default: from config]")]
    pub species: Option<String>,
    #[arg(long, help = "Max records to retrieve [default: from config]")]
    pub limit: Option<u32>,
    #[arg(long, value_parser = parse_years, help = "Year range START,END [default: from config]")]
    pub years: Option<YearRange>,
    #[arg(long, conflicts_with = "years", help = "Do not filter by year")]
    pub all_years: bool,
    #[arg(
        long,
        value_parser = parse_bbox,
        allow_hyphen_values = true,
        help = "Bounding box LAT_MIN,LAT_MAX,LON_MIN,LON_MAX"
    )]
    pub bbox: Option<BoundingBox>,
}

impl FilterArgs {
    pub fn to_query(&self, cfg: &SearchConfig) -> OccurrenceQuery {
        let species = self.species.clone().unwrap_or_else(|| cfg.default_species.clone());
        let mut query = OccurrenceQuery::new(species, self.limit.unwrap_or(cfg.default_limit));
        if !self.all_years {
            let (start, end) = self
                .years
                .map(|y| (y.start, y.end))
                .unwrap_or(cfg.default_year_range);
            query = query.with_year_range(start, end);
        }
        if let Some(bbox) = self.bbox {
            query = query.with_bbox(bbox);
        }
        query
    }
}

fn parse_numbers<T: std::str::FromStr>(s: &str, expected: usize, what: &str) -> Result<Vec<T>, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != expected {
        return Err(format!("expected {what}"));
    }
    parts
        .iter()
        .map(|p| p.parse().map_err(|_| format!("not a number: {p:?}")))
        .collect()
}

fn parse_years(s: &str) -> Result<YearRange, String> {
    let v: Vec<i32> = parse_numbers(s, 2, "START,END")?;
    Ok(YearRange::new(v[0], v[1]))
}

fn parse_bbox(s: &str) -> Result<BoundingBox, String> {
    let v: Vec<f64> = parse_numbers(s, 4, "LAT_MIN,LAT_MAX,LON_MIN,LON_MAX")?;
    Ok(BoundingBox::new(v[0], v[1], v[2], v[3]))
}

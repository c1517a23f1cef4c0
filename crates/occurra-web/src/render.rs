//! Template environment and the view model behind the dashboard page.

use minijinja::Environment;
use occurra_common::Result;
use occurra_config::SearchConfig;
use occurra_ingestion::summary::{CountryCount, YearCount};
use occurra_ingestion::{MapPoint, OccurrenceRecord, OccurrenceTable};
use serde::Serialize;

use crate::handlers::form::Controls;

pub fn environment() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.add_template("base.html", include_str!("../templates/base.html"))?;
    env.add_template("dashboard.html", include_str!("../templates/dashboard.html"))?;
    Ok(env)
}

/// Slider and number-input bounds for the sidebar.
#[derive(Debug, Serialize)]
pub struct Bounds {
    pub min_limit: u32,
    pub max_limit: u32,
    pub limit_step: u32,
    pub min_year: i32,
    pub max_year: i32,
}

impl From<&SearchConfig> for Bounds {
    fn from(cfg: &SearchConfig) -> Self {
        Self {
            min_limit: cfg.min_limit,
            max_limit: cfg.max_limit,
            limit_step: cfg.limit_step,
            min_year: cfg.min_year,
            max_year: cfg.max_year,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Results {
    pub total: usize,
    pub preview: Vec<OccurrenceRecord>,
    pub map_points: Vec<MapPoint>,
    pub per_country: Vec<CountryCount>,
    pub per_year: Vec<YearCount>,
    pub download_href: String,
}

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub controls: Controls,
    pub bounds: Bounds,
    /// Set once a search ran, even if it came back empty.
    pub searched: bool,
    pub error: Option<String>,
    pub results: Option<Results>,
}

impl DashboardView {
    pub fn form_only(controls: Controls, cfg: &SearchConfig) -> Self {
        Self { controls, bounds: cfg.into(), searched: false, error: None, results: None }
    }

    pub fn failed(controls: Controls, cfg: &SearchConfig, error: String) -> Self {
        Self { error: Some(error), ..Self::form_only(controls, cfg) }
    }

    pub fn with_table(controls: Controls, cfg: &SearchConfig, table: &OccurrenceTable, preview_rows: usize) -> Self {
        let results = (!table.is_empty()).then(|| {
            let summary = table.summary();
            Results {
                total: summary.total,
                preview: table.preview(preview_rows).to_vec(),
                map_points: table.map_points(),
                per_country: summary.per_country,
                per_year: summary.per_year,
                download_href: format!("/download?{}", controls.query_string()),
            }
        });
        Self { searched: true, results, ..Self::form_only(controls, cfg) }
    }
}

pub fn render_dashboard(env: &Environment<'static>, view: &DashboardView) -> Result<String> {
    Ok(env.get_template("dashboard.html")?.render(view)?)
}

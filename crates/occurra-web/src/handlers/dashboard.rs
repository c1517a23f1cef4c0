//! Dashboard handler — search controls plus map, table and chart tabs.

use axum::{
    extract::{Query, State},
    response::Html,
};
use occurra_common::Result;
use tracing::{info, warn};

use crate::handlers::form::SearchForm;
use crate::render::{render_dashboard, DashboardView};
use crate::state::SharedState;

/// GET / - runs the search described by the query string (or the defaults).
pub async fn dashboard(
    State(state): State<SharedState>,
    Query(form): Query<SearchForm>,
) -> Result<Html<String>> {
    let search_cfg = &state.config.search;

    let view = match form.resolve(search_cfg) {
        Err(e) => DashboardView::failed(form.echo(search_cfg), search_cfg, e.to_string()),
        Ok(controls) => match controls.to_query() {
            None => DashboardView::form_only(controls, search_cfg),
            Some(query) => match state.source.search(&query).await {
                Ok(table) => {
                    info!(species = %query.species, records = table.len(), "Occurrence search complete");
                    DashboardView::with_table(controls, search_cfg, &table, state.config.web.preview_rows)
                }
                Err(e) => {
                    warn!(species = %query.species, error = %e, "Occurrence search failed");
                    DashboardView::failed(controls, search_cfg, e.to_string())
                }
            },
        },
    };

    Ok(Html(render_dashboard(&state.templates, &view)?))
}

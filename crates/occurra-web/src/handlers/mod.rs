//! HTTP handlers for all web routes.

pub mod api;
pub mod dashboard;
pub mod download;
pub mod form;

use occurra_common::{OccurraError, Result};
use occurra_ingestion::{OccurrenceQuery, OccurrenceTable};

use crate::state::SharedState;
use form::SearchForm;

/// Resolve the form against configured defaults and run the search it describes.
/// Shared by the download and JSON endpoints, which need a species to do anything.
pub(crate) async fn search_from_form(
    state: &SharedState,
    form: &SearchForm,
) -> Result<(OccurrenceQuery, OccurrenceTable)> {
    let controls = form.resolve(&state.config.search)?;
    let query = controls
        .to_query()
        .ok_or_else(|| OccurraError::InvalidQuery("species name is empty".to_string()))?;
    let table = state.source.search(&query).await?;
    Ok((query, table))
}

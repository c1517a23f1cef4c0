//! JSON endpoints over the same search parameters as the dashboard.

use axum::{
    extract::{Query, State},
    Json,
};
use occurra_common::Result;
use occurra_ingestion::{OccurrenceRecord, Summary};
use serde::Serialize;

use crate::handlers::form::SearchForm;
use crate::handlers::search_from_form;
use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct OccurrencesResponse {
    pub species: String,
    pub count: usize,
    pub records: Vec<OccurrenceRecord>,
}

/// GET /api/occurrences
pub async fn api_occurrences(
    State(state): State<SharedState>,
    Query(form): Query<SearchForm>,
) -> Result<Json<OccurrencesResponse>> {
    let (query, table) = search_from_form(&state, &form).await?;
    Ok(Json(OccurrencesResponse {
        species: query.species,
        count: table.len(),
        records: table.into_records(),
    }))
}

/// GET /api/summary
pub async fn api_summary(
    State(state): State<SharedState>,
    Query(form): Query<SearchForm>,
) -> Result<Json<Summary>> {
    let (_, table) = search_from_form(&state, &form).await?;
    Ok(Json(table.summary()))
}

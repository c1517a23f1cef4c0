//! CSV download of the full occurrence table.

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use occurra_common::Result;

use crate::handlers::form::SearchForm;
use crate::handlers::search_from_form;
use crate::state::SharedState;

/// GET /download - same parameters as the dashboard, answers with `text/csv`.
pub async fn download_csv(
    State(state): State<SharedState>,
    Query(form): Query<SearchForm>,
) -> Result<impl IntoResponse> {
    let (query, table) = search_from_form(&state, &form).await?;
    let body = table.to_csv()?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        header_safe_file_name(&query.download_file_name())
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

/// Header values must be visible ASCII; anything else becomes `_`.
fn header_safe_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') { c } else { '_' })
        .collect()
}

use axum::{extract::Path, Json};
use serde_json::Value;

use crate::filters;
use crate::models::*;

use super::ApiError;

/// List every template filter name
pub async fn list_filters() -> Json<FilterListResponse> {
    Json(FilterListResponse {
        filters: filters::filter_names(),
    })
}

/// Run one filter against a value
pub async fn apply_filter(
    Path(name): Path<String>,
    Json(req): Json<ApplyFilterRequest>,
) -> Result<Json<ValueResponse<Value>>, ApiError> {
    let value = filters::apply_filter(&name, &req.value, &req.args)?;
    Ok(Json(ValueResponse { value }))
}

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::actions::AclAction;
use crate::models::*;
use crate::AppState;

use super::ApiError;

/// Blocking half of a render: confine `src` to the templates directory,
/// then read and render the templates
fn render_blocking(action: AclAction, state: &AppState, mut req: RenderAclsRequest) -> crate::Result<RenderResult> {
    if let Some(src) = &req.src {
        let path = state.locator.contained_src(src)?;
        req.src = Some(path.to_string_lossy().into_owned());
    }
    action.run(&state.locator, &req)
}

async fn run(action: AclAction, state: Arc<AppState>, req: RenderAclsRequest) -> Result<Json<RenderResult>, ApiError> {
    let result = tokio::task::spawn_blocking(move || render_blocking(action, &state, req))
        .await
        .map_err(|e| ApiError::internal(format!("Render task join error: {}", e)))??;

    tracing::info!(
        "rendered {} {} line(s)",
        result.configs.rendered_lines.len(),
        action.hostvars_key()
    );
    Ok(Json(result))
}

/// Render standard ACLs for one device
pub async fn render_standard_acls(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RenderAclsRequest>,
) -> Result<Json<RenderResult>, ApiError> {
    run(AclAction::Standard, state, req).await
}

/// Render extended ACLs for one device
pub async fn render_extended_acls(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RenderAclsRequest>,
) -> Result<Json<RenderResult>, ApiError> {
    run(AclAction::Extended, state, req).await
}

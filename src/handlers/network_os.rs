use axum::Json;

use crate::models::*;
use crate::normalizers::{network_os_normalize, NetworkOs};

use super::ApiError;

/// Normalize an ansible_network_os alias to its canonical tag
pub async fn normalize(Json(req): Json<NormalizeRequest>) -> Result<Json<ValueResponse<NetworkOs>>, ApiError> {
    let value = network_os_normalize(&req.value)?;
    Ok(Json(ValueResponse { value }))
}

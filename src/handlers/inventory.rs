use axum::{extract::State, Json};
use std::path::Path;
use std::sync::Arc;

use crate::inventory::{self, Inventory};
use crate::AppState;

use super::ApiError;

/// Load the inventory described by INVENTORY_CONFIG
pub async fn get_inventory(State(state): State<Arc<AppState>>) -> Result<Json<Inventory>, ApiError> {
    let path = state
        .config
        .inventory_config
        .as_deref()
        .ok_or_else(|| crate::Error::InventoryConfig("INVENTORY_CONFIG is not set".to_string()))?;

    let inventory = inventory::load_from_file(Path::new(path)).await?;
    Ok(Json(inventory))
}

pub mod filters;
#[cfg(feature = "mongo-inventory")]
pub mod inventory;
pub mod network_os;
pub mod render;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Error response body: {"error": "message", "kind": "..."}
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
}

/// API error type
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    kind: Option<&'static str>,
}

impl ApiError {
    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
            kind: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
                kind: self.kind,
            }),
        )
            .into_response()
    }
}

impl From<crate::Error> for ApiError {
    fn from(err: crate::Error) -> Self {
        use crate::Error::*;

        let status = match &err {
            UnsupportedPlatform { .. } | Validation { .. } | Normalization { .. } | Render { .. } => {
                StatusCode::BAD_REQUEST
            }
            InventoryConfig(_) => StatusCode::BAD_REQUEST,
            TemplateNotFound { .. } => StatusCode::NOT_FOUND,
            TemplatesDirectoryNotFound { .. } | TemplateRead { .. } | InventorySource(_) => {
                tracing::warn!("{}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        Self {
            status,
            message: err.to_string(),
            kind: Some(err.kind()),
        }
    }
}

/// Healthcheck endpoint, returns 200 OK with status
pub async fn healthcheck() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "forge-render",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

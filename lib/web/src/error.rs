use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(thiserror::Error, Debug)]
pub enum FarmGraphServerError {
    #[error("No data found for plot {plot_id} in {year}")]
    NotFound { plot_id: String, year: i32 },
    #[error("Internal server error: {0}")]
    Internal(anyhow::Error),
}

impl IntoResponse for FarmGraphServerError {
    fn into_response(self) -> Response {
        match self {
            FarmGraphServerError::NotFound { plot_id, year } => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "No data found",
                    "plot_id": plot_id,
                    "year": year,
                })),
            )
                .into_response(),
            FarmGraphServerError::Internal(error) => {
                tracing::error!(%error, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": error.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

// HTTP response mapping for chart errors
use crate::domain::error::ChartError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

impl ChartError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ChartError::NotFound { .. } => StatusCode::NOT_FOUND,
            ChartError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            e if e.is_validation() => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ChartError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Chart request failed: {:#}", self);
        } else {
            tracing::debug!("Chart request rejected: {}", self);
        }

        let body = serde_json::json!({
            "error": self.code(),
            "message": self.to_string(),
        });

        (status, Json(body)).into_response()
    }
}

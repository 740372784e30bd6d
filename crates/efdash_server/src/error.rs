//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use efdash_core::ServiceError;
use log::error;
use serde_json::json;

pub const GENERIC_INTERNAL_MESSAGE: &str = "An internal error occurred while reading funding data.";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Maps a service failure; data-source details are hidden unless `detailed`.
    pub fn from_service(err: ServiceError, detailed: bool) -> Self {
        match err {
            ServiceError::Validation(message) => Self::BadRequest(message),
            ServiceError::NotFound(message) => Self::NotFound(message),
            ServiceError::DataSource(_) => {
                error!(
                    "event=data_source_failure module=server status=error error={}",
                    err
                );
                Self::internal(err.to_string(), detailed)
            }
        }
    }

    pub fn internal(message: String, detailed: bool) -> Self {
        if detailed {
            Self::Internal(message)
        } else {
            Self::Internal(GENERIC_INTERNAL_MESSAGE.to_string())
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "success": false,
            "message": self.to_string(),
        });
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiError, GENERIC_INTERNAL_MESSAGE};
    use axum::http::StatusCode;
    use efdash_core::{RepoError, ServiceError};

    fn data_source_error() -> ServiceError {
        ServiceError::DataSource(RepoError::InvalidData("bad amount".to_string()))
    }

    #[test]
    fn service_errors_map_to_status_codes() {
        let cases = [
            (ServiceError::Validation("x".to_string()), StatusCode::BAD_REQUEST),
            (ServiceError::NotFound("x".to_string()), StatusCode::NOT_FOUND),
            (data_source_error(), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from_service(err, true).status(), status);
        }
    }

    #[test]
    fn internal_details_are_hidden_when_disabled() {
        let hidden = ApiError::from_service(data_source_error(), false);
        assert_eq!(hidden.to_string(), GENERIC_INTERNAL_MESSAGE);

        let shown = ApiError::from_service(data_source_error(), true);
        assert!(shown.to_string().contains("bad amount"));
    }
}

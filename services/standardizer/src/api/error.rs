use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use phdi_fhir_harmonization::HarmonizationError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::document::{DocumentValidationError, RESOURCE_TYPE_FIELD};
use crate::standardization::{StandardizationError, StandardizationKind};

use super::types::ErrorResponse;

pub type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Body(#[from] JsonRejection),
    #[error(transparent)]
    Document(#[from] DocumentValidationError),
    #[error(transparent)]
    Standardization(#[from] StandardizationError),
    #[error("standardization failed: {0}")]
    Harmonization(#[from] HarmonizationError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Body(rejection) => rejection.status(),
            ApiError::Document(_) | ApiError::Standardization(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Harmonization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Body(_) => "INVALID_BODY",
            ApiError::Document(DocumentValidationError::MissingResourceType) => {
                "MISSING_RESOURCE_TYPE"
            }
            ApiError::Standardization(StandardizationError::Unsupported { .. }) => {
                "UNSUPPORTED_STANDARDIZATION"
            }
            ApiError::Standardization(StandardizationError::InvalidParameters { .. }) => {
                "INVALID_PARAMETERS"
            }
            ApiError::Harmonization(_) => "STANDARDIZATION_FAILED",
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::Body(_) => None,
            ApiError::Document(_) => Some(json!({ "field": format!("data.{RESOURCE_TYPE_FIELD}") })),
            ApiError::Standardization(err) => match err {
                StandardizationError::Unsupported { .. } => Some(json!({
                    "field": err.field(),
                    "supported": StandardizationKind::supported_names(),
                })),
                StandardizationError::InvalidParameters { reason, .. } => {
                    Some(json!({ "field": err.field(), "reason": reason }))
                }
            },
            ApiError::Harmonization(err) => Some(json!({ "path": err.path() })),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "standardization request failed");
        } else {
            warn!(error = %self, status = status.as_u16(), "standardization request rejected");
        }

        let body = ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
            details: self.details(),
        };
        (status, Json(body)).into_response()
    }
}

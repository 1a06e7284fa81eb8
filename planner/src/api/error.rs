use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use super::kakao::SearchError;

#[derive(Debug, Error)]
pub(crate) enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("KAKAO_REST_API_KEY is not configured")]
    MissingCredential,

    #[error(
        "Kakao Local API service is not enabled. Please enable 'OPEN_MAP_AND_LOCAL' service in your Kakao Developers console."
    )]
    CapabilityDisabled,

    #[error("Kakao API error: {0}")]
    Upstream(String),
}

impl ApiError {
    pub(crate) fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::MissingCredential => "CONFIGURATION_ERROR",
            ApiError::CapabilityDisabled => "SERVICE_NOT_ENABLED",
            ApiError::Upstream(_) => "UPSTREAM_ERROR",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingCredential => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::CapabilityDisabled => StatusCode::FORBIDDEN,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.error_code(),
            "message": self.to_string(),
        }))
    }
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::MissingCredential => ApiError::MissingCredential,
            SearchError::NotEnabled(body) => {
                log::warn!("Kakao rejected the keyword search capability: {body}");
                ApiError::CapabilityDisabled
            }
            other => {
                log::error!("Kakao search failed: {other}");
                ApiError::Upstream(other.to_string())
            }
        }
    }
}

//! JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use spendwise_core::AnalyticsError;
use spendwise_shared::AppError;
use tracing::{error, warn};

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// An `AppError` rendered as `{ "success": false, "error": CODE, "message": ... }`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<AnalyticsError> for ApiError {
    fn from(err: AnalyticsError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(error = %self.0, code = self.0.error_code(), "Request failed");
        } else {
            warn!(error = %self.0, code = self.0.error_code(), "Request rejected");
        }

        (
            status,
            Json(json!({
                "success": false,
                "error": self.0.error_code(),
                "message": self.0.to_string(),
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::Validation("bad".into()), StatusCode::BAD_REQUEST, "VALIDATION_ERROR")]
    #[case(AppError::NotFound("user".into()), StatusCode::NOT_FOUND, "NOT_FOUND")]
    #[case(AppError::Source("down".into()), StatusCode::SERVICE_UNAVAILABLE, "SOURCE_UNAVAILABLE")]
    #[case(AppError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")]
    #[tokio::test]
    async fn test_error_body(
        #[case] err: AppError,
        #[case] status: StatusCode,
        #[case] code: &str,
    ) {
        let message = err.to_string();
        let response = ApiError(err).into_response();
        assert_eq!(response.status(), status);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], code);
        assert_eq!(json["message"], message);
    }

    #[test]
    fn test_analytics_error_is_validation() {
        let err = ApiError::from(AnalyticsError::UnknownPeriodKind("fortnight".into()));
        assert_eq!(err.0.error_code(), "VALIDATION_ERROR");
    }
}

//! HTTP error responses for the blogurdu API.
//!
//! Every failure is rendered as `{error, code, message, stage?}` JSON.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use blogurdu_core::Error;
use serde::Serialize;

/// A core error tagged with the operation that failed.
#[derive(Debug, thiserror::Error)]
#[error("{context}: {source}")]
pub struct ApiError {
    context: &'static str,
    #[source]
    source: Error,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    stage: Option<&'static str>,
}

impl ApiError {
    pub fn new(context: &'static str, source: Error) -> Self {
        Self { context, source }
    }

    /// Attach `context` to a core error, for use with `map_err`.
    pub fn with(context: &'static str) -> impl FnOnce(Error) -> Self {
        move |source| Self::new(context, source)
    }

    pub fn status(&self) -> StatusCode {
        match self.source {
            Error::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            Error::BlogNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        let error = match self.source {
            Error::BlogNotFound(_) => "Blog not found",
            _ => self.context,
        };
        let stage = match &self.source {
            Error::Pipeline(e) => Some(e.stage().as_str()),
            _ => None,
        };

        ErrorBody { error, code: self.source.code(), message: self.source.user_message(), stage }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        (status, Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blogurdu_core::FetchError;

    #[test]
    fn test_status_mapping() {
        let err = ApiError::new("Failed to process blog", Error::InvalidUrl("empty".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = ApiError::new("Failed to fetch blog", Error::BlogNotFound("7".into()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err = ApiError::new("Failed to process blog", FetchError::Timeout.into());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_pipeline_body_carries_stage() {
        let err = ApiError::new("Failed to process blog", FetchError::NotFound.into());
        let body = serde_json::to_value(err.body()).unwrap();
        assert_eq!(body["error"], "Failed to process blog");
        assert_eq!(body["code"], "FETCH_NOT_FOUND");
        assert_eq!(body["message"], "Blog post not found (404)");
        assert_eq!(body["stage"], "fetch");
    }

    #[test]
    fn test_not_found_body() {
        let err = ApiError::new("Failed to fetch blog", Error::BlogNotFound("7".into()));
        let body = serde_json::to_value(err.body()).unwrap();
        assert_eq!(body["error"], "Blog not found");
        assert!(body.get("stage").is_none());
    }
}

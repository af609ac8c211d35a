//! Handler errors and the failure kinds the gateway reports.

use std::borrow::Cow;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::handler::response::ErrorResponse;

/// Handler result; the error side renders as a JSON [`ErrorResponse`].
pub type Result<T, E = Error<'static>> = std::result::Result<T, E>;

/// A failed request.
///
/// The client sees the kind's summary followed by the optional detail, and
/// the resource (query parameter or blob) the failure concerns.
#[derive(Debug, Clone)]
#[must_use = "errors do nothing unless returned"]
pub struct Error<'a> {
    kind: ErrorKind,
    detail: Option<Cow<'a, str>>,
    resource: Option<Cow<'a, str>>,
}

impl<'a> Error<'a> {
    /// Names the resource the failure concerns.
    pub fn with_resource(mut self, resource: impl Into<Cow<'a, str>>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    fn into_body(self) -> ErrorResponse<'a> {
        let kind = self.kind;
        let message = match self.detail {
            Some(detail) => Cow::Owned(format!("{}: {detail}", kind.summary())),
            None => Cow::Borrowed(kind.summary()),
        };

        let body = ErrorResponse::new(kind.status(), kind.name(), message);
        match self.resource {
            Some(resource) => body.with_resource(resource),
            None => body,
        }
    }
}

impl fmt::Display for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind;
        write!(f, "{} ({}): {}", kind.name(), kind.status(), kind.summary())?;

        if let Some(ref detail) = self.detail {
            write!(f, ": {detail}")?;
        }
        if let Some(ref resource) = self.resource {
            write!(f, " [{resource}]")?;
        }

        Ok(())
    }
}

impl std::error::Error for Error<'_> {}

impl IntoResponse for Error<'_> {
    fn into_response(self) -> Response {
        self.into_body().into_response()
    }
}

/// What went wrong, independent of the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The `path` query parameter is absent or empty.
    MissingQueryParam,
    /// The query string could not be decoded.
    BadRequest,
    /// No route matched.
    NotFound,
    /// Timeouts, panics and other middleware failures.
    InternalServerError,
    /// Storage credentials are not configured.
    MissingConfiguration,
    /// The storage backend refused or failed the read.
    StorageFailure,
}

impl ErrorKind {
    /// Creates an [`Error`] of this kind whose message ends with `detail`.
    pub fn with_message<'a>(self, detail: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error {
            kind: self,
            detail: Some(detail.into()),
            resource: None,
        }
    }

    fn status(self) -> StatusCode {
        match self {
            Self::MissingQueryParam | Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InternalServerError | Self::MissingConfiguration | Self::StorageFailure => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::MissingQueryParam => "missing_query_param",
            Self::BadRequest => "bad_request",
            Self::NotFound => "not_found",
            Self::InternalServerError => "internal_server_error",
            Self::MissingConfiguration => "missing_configuration",
            Self::StorageFailure => "storage_failure",
        }
    }

    fn summary(self) -> &'static str {
        match self {
            Self::MissingQueryParam => "Invalid request",
            Self::BadRequest => "Malformed query string",
            Self::NotFound => "The requested resource was not found",
            Self::InternalServerError => "Internal server error",
            Self::MissingConfiguration => "Storage is not configured",
            Self::StorageFailure => "Error retrieving video",
        }
    }
}

impl IntoResponse for ErrorKind {
    fn into_response(self) -> Response {
        ErrorResponse::new(self.status(), self.name(), self.summary()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn storage_failure_carries_backend_description() {
        let response = ErrorKind::StorageFailure
            .with_message("not found: BlobNotFound")
            .with_resource("videos/a/b.mp4")
            .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["name"], "storage_failure");
        assert_eq!(body["message"], "Error retrieving video: not found: BlobNotFound");
        assert_eq!(body["resource"], "videos/a/b.mp4");
    }

    #[tokio::test]
    async fn bare_kind_uses_summary_without_resource() {
        let response = ErrorKind::NotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["message"], "The requested resource was not found");
        assert!(body.get("resource").is_none());
    }

    #[test]
    fn client_errors_are_bad_requests() {
        assert_eq!(ErrorKind::MissingQueryParam.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorKind::BadRequest.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorKind::MissingConfiguration.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn display_names_kind_status_and_resource() {
        let error = ErrorKind::MissingQueryParam
            .with_message("path query parameter is missing")
            .with_resource("path");

        assert_eq!(
            error.to_string(),
            "missing_query_param (400 Bad Request): Invalid request: \
             path query parameter is missing [path]"
        );
    }
}

use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// JSON body of a failed request.
#[must_use = "error responses do nothing unless returned"]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse<'a> {
    /// Stable identifier of the failure kind, e.g. `storage_failure`.
    pub name: &'a str,
    /// Human-readable description.
    pub message: Cow<'a, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Cow<'a, str>>,
    /// Sent as the status line only.
    #[serde(skip)]
    pub status: StatusCode,
}

impl<'a> ErrorResponse<'a> {
    /// Creates a body without a resource.
    pub fn new(status: StatusCode, name: &'a str, message: impl Into<Cow<'a, str>>) -> Self {
        Self {
            name,
            message: message.into(),
            resource: None,
            status,
        }
    }

    /// Sets the resource the failure concerns.
    pub fn with_resource(mut self, resource: impl Into<Cow<'a, str>>) -> Self {
        self.resource = Some(resource.into());
        self
    }
}

impl IntoResponse for ErrorResponse<'_> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

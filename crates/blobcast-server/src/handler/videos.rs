//! Video streaming handler.
//!
//! `GET /video?path=<blob>` streams the blob `<blob>` from the `videos`
//! container straight into the response body.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use blobcast_storage::{BlobLocator, BlobStreamOpener};

use crate::handler::{ErrorKind, Result};
use crate::service::{CredentialSource, ServiceState};
use crate::tracing_targets::TRACING_TARGET_VIDEOS as TRACING_TARGET;

/// Content type of every successful response.
const VIDEO_CONTENT_TYPE: &str = "video/mp4";

/// Name of the query parameter carrying the blob path.
const PATH_PARAM: &str = "path";

/// Returns the first `path` value, or an empty string when there is none.
///
/// Later duplicates are ignored, so `?path=a&path=b` reads `a`.
fn first_path(pairs: Vec<(String, String)>) -> String {
    pairs
        .into_iter()
        .find(|(name, _)| name == PATH_PARAM)
        .map(|(_, value)| value)
        .unwrap_or_default()
}

/// Streams a single blob to the client.
#[tracing::instrument(skip_all, fields(method = %method))]
async fn stream_video(
    method: Method,
    State(credentials): State<Arc<dyn CredentialSource>>,
    State(opener): State<Arc<dyn BlobStreamOpener>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Response> {
    if method != Method::GET {
        return Ok((
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, "GET")],
            "Method not allowed",
        )
            .into_response());
    }

    let credentials = credentials.resolve().map_err(|err| {
        tracing::error!(
            target: TRACING_TARGET,
            error = %err,
            "Storage credentials are not configured"
        );

        ErrorKind::MissingConfiguration.with_message("Environment variables not set")
    })?;

    let path = match query {
        Ok(Query(pairs)) => first_path(pairs),
        Err(rejection) => {
            tracing::debug!(
                target: TRACING_TARGET,
                error = %rejection,
                "Rejected malformed query string"
            );

            return Err(ErrorKind::BadRequest
                .with_message(rejection.body_text())
                .with_resource(PATH_PARAM));
        }
    };

    let locator = BlobLocator::in_default_container(path).map_err(|_| {
        ErrorKind::MissingQueryParam
            .with_message("path query parameter is missing")
            .with_resource(PATH_PARAM)
    })?;

    tracing::info!(
        target: TRACING_TARGET,
        container = %locator.container(),
        path = %locator.path(),
        "Retrieving blob"
    );

    let stream = opener.open(&credentials, &locator).await.map_err(|err| {
        tracing::error!(
            target: TRACING_TARGET,
            blob = %locator,
            error = %err,
            "Error retrieving blob"
        );

        ErrorKind::StorageFailure
            .with_message(err.to_string())
            .with_resource(locator.to_string())
    })?;

    tracing::info!(
        target: TRACING_TARGET,
        blob = %locator,
        "Blob retrieved successfully"
    );

    let headers = [(header::CONTENT_TYPE, VIDEO_CONTENT_TYPE)];
    Ok((headers, Body::from_stream(stream)).into_response())
}

/// Returns a [`Router`] with the video route, bound for every method.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/video", any(stream_video))
}

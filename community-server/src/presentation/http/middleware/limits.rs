use std::time::Duration;

use axum::{
    BoxError, Router,
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    response::{IntoResponse, Response},
};
use tower::ServiceBuilder;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower::timeout::error::Elapsed;
use tracing::warn;

use crate::infrastructure::settings::Settings;
use crate::presentation::http::app_error::AppError;

/// Body size cap, per-request timeout and a concurrency cap shared by all routes.
pub(crate) fn apply_limits(router: Router, settings: &Settings) -> Router {
    router
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_limit_error))
                .timeout(Duration::from_secs(settings.http_request_timeout_secs))
                .layer(GlobalConcurrencyLimitLayer::new(
                    settings.http_concurrency_limit,
                )),
        )
        .layer(DefaultBodyLimit::max(settings.http_request_body_limit_bytes))
}

async fn handle_limit_error(err: BoxError) -> Response {
    if err.is::<Elapsed>() {
        warn!("request timed out");
        return AppError::Timeout.into_response();
    }
    AppError::Internal(err.to_string()).into_response()
}

//! Rate governor middleware keyed by request path

use std::sync::Arc;
use std::time::Duration;

use axum::Json;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::server::error::ErrorBody;
use crate::server::governor::{RateGovernor, RateLimitResult};

pub const HEADER_LIMIT: &str = "x-ratelimit-limit";
pub const HEADER_REMAINING: &str = "x-ratelimit-remaining";
pub const HEADER_RESET: &str = "x-ratelimit-reset";

/// Admit the request through the governor or answer 429 without running
/// the rest of the stack.
pub async fn rate_limit(
    State(governor): State<Arc<RateGovernor>>,
    request: Request,
    next: Next,
) -> Response {
    let decision = governor.check(request.uri().path());

    if !decision.allowed {
        warn!(
            path = request.uri().path(),
            retry_after = ?decision.retry_after,
            "rate limit exceeded"
        );
        return rate_limit_response(&decision);
    }

    let mut response = next.run(request).await;
    apply_headers(response.headers_mut(), &decision);
    response
}

/// Rate limit exceeded response.
pub fn rate_limit_response(decision: &RateLimitResult) -> Response {
    let retry_after = decision.retry_after.map(ceil_secs).unwrap_or(1);
    let body = ErrorBody {
        error: "rate limit exceeded".to_string(),
        retry_after: Some(retry_after),
    };

    let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
    let headers = response.headers_mut();
    apply_headers(headers, decision);
    headers.insert(
        axum::http::header::RETRY_AFTER,
        HeaderValue::from(retry_after),
    );
    response
}

fn apply_headers(headers: &mut HeaderMap, decision: &RateLimitResult) {
    headers.insert(HEADER_LIMIT, HeaderValue::from(decision.limit));
    headers.insert(HEADER_REMAINING, HeaderValue::from(decision.remaining));
    headers.insert(
        HEADER_RESET,
        HeaderValue::from(ceil_secs(decision.reset_after)),
    );
}

/// Whole seconds, rounded up so clients never retry too early.
fn ceil_secs(duration: Duration) -> u64 {
    let secs = duration.as_secs();
    if duration.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs
    }
}

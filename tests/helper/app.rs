//! Router construction and request helpers

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use parking_lot::Mutex;
use tower::ServiceExt;

use pyversion_server::scan::{ChannelUrls, HttpPageSource, Scanner};
use pyversion_server::server::governor::{Clock, Quota, RateGovernor};
use pyversion_server::server::routes::{AppState, router};

/// Clock that only moves when told to
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(Instant::now()),
        })
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}

/// Build the full router against the given listing pages, with a manual clock
/// driving the rate governor.
pub fn test_app(urls: ChannelUrls, quota: Quota) -> (Router, Arc<ManualClock>) {
    let source = HttpPageSource::new(Duration::from_secs(5)).unwrap();
    let scanner = Scanner::new(Arc::new(source), urls).unwrap();

    let clock = ManualClock::new();
    let governor = Arc::new(RateGovernor::with_clock(quota, clock.clone()));

    (router(AppState::new(Arc::new(scanner)), governor), clock)
}

/// Send a request through the router and collect status, headers and body.
pub async fn request(app: &Router, method: Method, path: &str) -> (StatusCode, HeaderMap, String) {
    let request = Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, headers, String::from_utf8(body.to_vec()).unwrap())
}

pub async fn get(app: &Router, path: &str) -> (StatusCode, HeaderMap, String) {
    request(app, Method::GET, path).await
}

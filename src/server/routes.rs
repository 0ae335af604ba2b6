//! Version endpoints

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::scan::{Channel, Scanner};
use crate::server::error::ApiError;
use crate::server::governor::RateGovernor;
use crate::server::middleware::rate_limit;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    scanner: Arc<Scanner>,
}

impl AppState {
    pub fn new(scanner: Arc<Scanner>) -> Self {
        Self { scanner }
    }
}

/// Build the router: both version endpoints behind the rate governor.
///
/// The governor wraps the whole router, so unknown paths and wrong methods
/// are counted against their own path as well.
pub fn router(state: AppState, governor: Arc<RateGovernor>) -> Router {
    Channel::ALL
        .into_iter()
        .fold(Router::new(), |router, channel| {
            router.route(
                channel.path(),
                get(move |State(state): State<AppState>| latest_version(state, channel)),
            )
        })
        .layer(axum::middleware::from_fn_with_state(governor, rate_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn latest_version(state: AppState, channel: Channel) -> Result<String, ApiError> {
    let version = state
        .scanner
        .scan(channel)
        .await
        .map_err(|source| ApiError::Scan { channel, source })?;
    Ok(version.to_string())
}

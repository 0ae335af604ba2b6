use thiserror::Error;

use crate::version::VersionError;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Upstream {url} returned status {status}")]
    UpstreamStatus { url: String, status: u16 },

    #[error("Invalid selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },

    #[error("Malformed version candidate: {0}")]
    Version(#[from] VersionError),
}

//! Shared test utilities
#![allow(dead_code, unused_imports)]

mod app;
mod upstream;

pub use app::{ManualClock, get, request, test_app};
pub use upstream::{EMPTY_PAGE, FTP_LISTING, STABLE_PAGE, channel_urls, mock_upstream};

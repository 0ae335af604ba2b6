//! Listing page scanning
//!
//! A scan fetches a listing page through a [`PageSource`], selects the
//! links relevant to a [`Channel`] and folds their targets into the highest
//! version found.
//!
//! # Modules
//!
//! - [`source`]: Fetch seam and its reqwest implementation
//! - [`document`]: Selector matching over a parsed HTML document
//! - [`scanner`]: Channel definitions and the scan itself
//! - [`error`]: Error types for fetching and scanning

pub mod document;
pub mod error;
pub mod scanner;
pub mod source;

pub use error::ScanError;
pub use scanner::{Channel, ChannelUrls, Scanner};
pub use source::{HttpPageSource, PageSource};

//! Version handling for scraped download listings
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │    href     │────▶│  Extractor  │────▶│   Tracker   │
//! │   (text)    │     │  (regex)    │     │ (max fold)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                                ▼
//!                                         ┌─────────────┐
//!                                         │   Version   │
//!                                         │  (compare)  │
//!                                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`number`]: Dotted numeric version with zero-padded ordering
//! - [`extract`]: Finds the first dotted numeric run in a piece of text
//! - [`tracker`]: Folds candidate texts into the highest version seen
//! - [`error`]: Error types for version parsing

pub mod error;
pub mod extract;
pub mod number;
pub mod tracker;

pub use error::VersionError;
pub use extract::extract;
pub use number::Version;
pub use tracker::{fold, track_max};

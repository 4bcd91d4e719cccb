//! # Campground Watch
//!
//! This crate polls the Recreation.gov availability API for a fixed set of
//! campgrounds and detects newly available dates inside a configured
//! day-of-month window.

/// Configuration and error types for watch operations
mod watch_types;
pub use watch_types::*;

/// Client for the Recreation.gov monthly availability API
mod rec_gov_client;
pub use rec_gov_client::*;

/// Extraction of available dates from an availability payload
mod availability;
pub use availability::*;

/// Polling loop that detects and reports new availability
mod executor;
pub use executor::*;

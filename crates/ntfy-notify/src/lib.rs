//! # Ntfy Notify
//!
//! This crate delivers push notifications through ntfy.sh topics.

/// Push delivery service and the trait it implements
mod service;
pub use service::*;

/// Error types for push delivery
mod types;
pub use types::*;

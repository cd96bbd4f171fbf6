//! Character 4-gram language identification.
//!
//! This crate provides a small statistical classifier including:
//! - Fixed-width character gram extraction
//! - Per-class add-one smoothed frequency models over a shared vocabulary
//! - Log-probability scoring with an "unknown" fallback
//! - Configuration, error types and line-oriented I/O helpers
//!
//! Models are trained and used within a single run; nothing is persisted.

/// Run configuration (labels, label policy, unseen threshold).
pub mod config;

/// Error type shared by the whole crate.
pub mod error;

/// Gram models, training and classification.
pub mod model;

/// I/O utilities (line reading, prediction writing).
pub mod io;

pub use config::Config;
pub use error::{Error, Result};

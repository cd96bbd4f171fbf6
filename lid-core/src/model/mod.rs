//! Top-level module for the language identification models.
//!
//! Components, leaves first:
//! - Gram extraction (`gram`)
//! - Raw per-class counting (`count_table`)
//! - Smoothed per-class distributions (`FrequencyModel`)
//! - Class enumeration and label policy (`LabelSet`)
//! - Model construction (`Trainer`)
//! - Line scoring and decision (`Classifier`)

/// Fixed-width character windows (`Gram`) and their extraction.
pub mod gram;

/// Raw gram counts per class, mergeable across worker threads.
///
/// Used internally by `Trainer`.
mod count_table;

/// Add-one smoothed probability distribution of a single class.
pub mod frequency_model;

/// Ordered set of known classes, residual class and unknown label.
pub mod label;

/// Corpus parsing and parallel model construction.
pub mod trainer;

/// Per-line scoring against every class and final decision.
pub mod classifier;

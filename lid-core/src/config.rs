use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::classifier::DEFAULT_UNSEEN_THRESHOLD;
use crate::model::label::{DEFAULT_LABELS, DEFAULT_UNKNOWN_LABEL, LabelPolicy, LabelSet};

/// Run configuration shared by training and classification.
///
/// Every field has a default, so a JSON file only needs the keys it
/// overrides:
///
/// ```json
/// { "labels": ["alpha", "beta"], "unseen_threshold": 0.5 }
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	/// Known classes, in tie-break order.
	pub labels: Vec<String>,
	/// Residual class for unrecognised training labels (last label if unset).
	pub fallback: Option<String>,
	/// Label written for lines that match no class.
	pub unknown_label: String,
	pub label_policy: LabelPolicy,
	/// Share of unseen grams from which a line is reported as unknown.
	pub unseen_threshold: f64,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			labels: DEFAULT_LABELS.iter().map(|l| (*l).to_owned()).collect(),
			fallback: None,
			unknown_label: DEFAULT_UNKNOWN_LABEL.to_owned(),
			label_policy: LabelPolicy::default(),
			unseen_threshold: DEFAULT_UNSEEN_THRESHOLD,
		}
	}
}

impl Config {
	/// Loads a configuration from a JSON file.
	///
	/// The result is validated before being returned.
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		let path = path.as_ref();
		let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
		let config: Self = serde_json::from_str(&contents)?;
		config.validate()?;
		Ok(config)
	}

	/// Checks value ranges and builds the label set once to surface label errors.
	pub fn validate(&self) -> Result<()> {
		if !(0.0..=1.0).contains(&self.unseen_threshold) {
			return Err(Error::InvalidConfig(format!(
				"unseen threshold must be between 0.0 and 1.0, got {}",
				self.unseen_threshold
			)));
		}
		self.label_set().map(|_| ())
	}

	/// Builds the label set described by this configuration.
	pub fn label_set(&self) -> Result<LabelSet> {
		let set = LabelSet::new(self.labels.iter().cloned(), &self.unknown_label)?;
		match &self.fallback {
			Some(fallback) => set.with_fallback(fallback),
			None => Ok(set),
		}
	}
}

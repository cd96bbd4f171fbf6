use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default class enumeration, in tie-break order.
pub const DEFAULT_LABELS: [&str; 3] = ["indonesian", "malaysian", "tamil"];

/// Label written for lines that resemble none of the trained classes.
pub const DEFAULT_UNKNOWN_LABEL: &str = "other";

/// What the trainer does with a line whose label is not part of the set.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LabelPolicy {
	/// Fold the line into the residual class and log a warning.
	#[default]
	Fallback,
	/// Reject the corpus with [`Error::UnknownLabel`].
	Strict,
}

/// The closed, ordered set of classes known for a run.
///
/// # Invariants
/// - At least one label, no duplicates
/// - `fallback` indexes into `labels`
/// - `unknown` is not one of `labels`
///
/// The order of `labels` is the tie-break precedence used by the
/// classifier: when two classes score the same, the earlier one wins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelSet {
	labels: Vec<String>,
	fallback: usize,
	unknown: String,
}

impl LabelSet {
	/// Builds a label set whose residual class is the last label.
	///
	/// # Errors
	/// Returns an error if `labels` is empty, holds duplicates or contains
	/// the unknown label.
	pub fn new<I, S>(labels: I, unknown: &str) -> Result<Self>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
		if labels.is_empty() {
			return Err(Error::EmptyLabelSet);
		}
		for (i, label) in labels.iter().enumerate() {
			if label.is_empty() || label.chars().any(char::is_whitespace) {
				return Err(Error::InvalidConfig(format!("'{label}' is not a valid class label")));
			}
			if labels[..i].contains(label) {
				return Err(Error::DuplicateLabel(label.clone()));
			}
		}
		if labels.iter().any(|l| l == unknown) {
			return Err(Error::InvalidConfig(format!("unknown label '{unknown}' clashes with a class label")));
		}

		let fallback = labels.len() - 1;
		Ok(Self { labels, fallback, unknown: unknown.to_owned() })
	}

	/// Changes the residual class.
	///
	/// # Errors
	/// Returns an error if `label` is not part of the set.
	pub fn with_fallback(mut self, label: &str) -> Result<Self> {
		self.fallback = self
			.index_of(label)
			.ok_or_else(|| Error::InvalidConfig(format!("fallback class '{label}' is not a known class")))?;
		Ok(self)
	}

	/// Position of `label` in the set, if known.
	pub fn index_of(&self, label: &str) -> Option<usize> {
		self.labels.iter().position(|l| l == label)
	}

	/// Resolves a raw training label to a class index according to `policy`.
	///
	/// `line` is only used for error reporting (1-based).
	pub(crate) fn resolve(&self, label: &str, line: usize, policy: LabelPolicy) -> Result<usize> {
		match (self.index_of(label), policy) {
			(Some(index), _) => Ok(index),
			(None, LabelPolicy::Fallback) => {
				log::warn!(
					"line {line}: unknown label '{label}', counted as '{}'",
					self.labels[self.fallback]
				);
				Ok(self.fallback)
			}
			(None, LabelPolicy::Strict) => Err(Error::UnknownLabel { line, label: label.to_owned() }),
		}
	}

	pub fn labels(&self) -> &[String] {
		&self.labels
	}

	pub fn label(&self, index: usize) -> &str {
		&self.labels[index]
	}

	pub fn fallback(&self) -> &str {
		&self.labels[self.fallback]
	}

	pub fn unknown(&self) -> &str {
		&self.unknown
	}

	pub fn len(&self) -> usize {
		self.labels.len()
	}

	pub fn is_empty(&self) -> bool {
		self.labels.is_empty()
	}
}

impl Default for LabelSet {
	fn default() -> Self {
		Self {
			labels: DEFAULT_LABELS.iter().map(|l| (*l).to_owned()).collect(),
			fallback: DEFAULT_LABELS.len() - 1,
			unknown: DEFAULT_UNKNOWN_LABEL.to_owned(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_set() {
		let set = LabelSet::default();
		assert_eq!(set.labels(), &["indonesian", "malaysian", "tamil"]);
		assert_eq!(set.fallback(), "tamil");
		assert_eq!(set.unknown(), "other");
	}

	#[test]
	fn test_rejects_invalid_sets() {
		assert!(matches!(LabelSet::new(Vec::<String>::new(), "other"), Err(Error::EmptyLabelSet)));
		assert!(matches!(LabelSet::new(["a", "b", "a"], "other"), Err(Error::DuplicateLabel(l)) if l == "a"));
		assert!(matches!(LabelSet::new(["a", "other"], "other"), Err(Error::InvalidConfig(_))));
		assert!(matches!(LabelSet::new(["a b"], "other"), Err(Error::InvalidConfig(_))));
	}

	#[test]
	fn test_fallback_policy() {
		let set = LabelSet::new(["alpha", "beta"], "other").unwrap().with_fallback("alpha").unwrap();
		assert_eq!(set.resolve("beta", 1, LabelPolicy::Fallback).unwrap(), 1);
		assert_eq!(set.resolve("gamma", 2, LabelPolicy::Fallback).unwrap(), 0);
	}

	#[test]
	fn test_strict_policy() {
		let set = LabelSet::new(["alpha", "beta"], "other").unwrap();
		let err = set.resolve("gamma", 7, LabelPolicy::Strict).unwrap_err();
		assert!(matches!(err, Error::UnknownLabel { line: 7, ref label } if label == "gamma"));
	}

	#[test]
	fn test_unknown_fallback_class() {
		let set = LabelSet::new(["alpha", "beta"], "other").unwrap();
		assert!(set.with_fallback("gamma").is_err());
	}
}

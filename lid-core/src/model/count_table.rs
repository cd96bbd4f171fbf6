use std::collections::HashMap;

use super::gram::Gram;
use crate::error::{Error, Result};

/// Raw gram counts for every class of a label set.
///
/// A `CountTable` is the accumulator of the training reduction: each
/// worker folds its chunk of lines into its own table, and the partial
/// tables are then merged into one.
///
/// ## Invariants
/// - `counts.len() == lines.len()` (one slot per class)
/// - Every stored count is strictly positive
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CountTable {
	/// Gram occurrences per class, indexed like the label set.
	counts: Vec<HashMap<Gram, u64>>,
	/// Number of training lines folded into each class.
	lines: Vec<usize>,
}

impl CountTable {
	/// Creates an empty table with one slot per class.
	pub fn new(classes: usize) -> Self {
		Self { counts: vec![HashMap::new(); classes], lines: vec![0; classes] }
	}

	/// Folds the grams of one training line into `class`.
	pub fn add_line(mut self, class: usize, grams: &[Gram]) -> Self {
		let counts = &mut self.counts[class];
		for gram in grams {
			*counts.entry(*gram).or_insert(0) += 1;
		}
		self.lines[class] += 1;
		self
	}

	/// Merges another table into this one, summing counts.
	///
	/// Integer sums make the result independent of merge order.
	///
	/// # Errors
	/// Returns an error if both tables do not cover the same classes.
	pub fn merge(mut self, other: Self) -> Result<Self> {
		if self.counts.len() != other.counts.len() {
			return Err(Error::Training(format!(
				"cannot merge count tables of {} and {} classes",
				self.counts.len(),
				other.counts.len()
			)));
		}

		for (mine, theirs) in self.counts.iter_mut().zip(other.counts) {
			for (gram, count) in theirs {
				*mine.entry(gram).or_insert(0) += count;
			}
		}
		for (mine, theirs) in self.lines.iter_mut().zip(other.lines) {
			*mine += theirs;
		}

		Ok(self)
	}

	/// Counts of one class.
	pub fn class_counts(&self, class: usize) -> &HashMap<Gram, u64> {
		&self.counts[class]
	}

	/// Number of lines folded into one class.
	pub fn class_lines(&self, class: usize) -> usize {
		self.lines[class]
	}

	/// Every distinct gram observed in any class, sorted.
	pub fn vocabulary(&self) -> Vec<Gram> {
		let mut vocabulary: Vec<Gram> = self.counts.iter().flat_map(|c| c.keys().copied()).collect();
		vocabulary.sort_unstable();
		vocabulary.dedup();
		vocabulary
	}
}

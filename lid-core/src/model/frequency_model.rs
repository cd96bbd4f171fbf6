use std::collections::HashMap;

use super::gram::Gram;

/// Smoothed probability distribution of grams for a single class.
///
/// # Invariants
/// - Every gram of the shared vocabulary is a key, even when the class
///   never produced it
/// - Every probability is strictly positive (add-one smoothing)
/// - Probabilities sum to 1 over the key set (unless the vocabulary is empty)
#[derive(Clone, Debug, Default)]
pub struct FrequencyModel {
	probabilities: HashMap<Gram, f64>,
}

impl FrequencyModel {
	/// Builds a model from raw class counts aligned on `vocabulary`.
	///
	/// Each gram of the vocabulary receives `count + 1` (0 when the class
	/// never saw it), and the smoothed counts are divided by their total.
	/// A class without any observation ends up uniform over the vocabulary.
	pub fn smoothed(counts: &HashMap<Gram, u64>, vocabulary: &[Gram]) -> Self {
		let smoothed: Vec<(Gram, u64)> = vocabulary
			.iter()
			.map(|gram| (*gram, counts.get(gram).copied().unwrap_or(0) + 1))
			.collect();

		let total: u64 = smoothed.iter().map(|(_, count)| count).sum();
		if total == 0 {
			// Empty vocabulary, nothing to normalize
			return Self::default();
		}

		let probabilities = smoothed
			.into_iter()
			.map(|(gram, count)| (gram, count as f64 / total as f64))
			.collect();

		Self { probabilities }
	}

	/// Probability of `gram`, or `None` if it is outside the vocabulary.
	pub fn probability(&self, gram: &Gram) -> Option<f64> {
		self.probabilities.get(gram).copied()
	}

	/// Number of grams in the model.
	pub fn len(&self) -> usize {
		self.probabilities.len()
	}

	pub fn is_empty(&self) -> bool {
		self.probabilities.is_empty()
	}

	/// Iterates over the grams of the model, in arbitrary order.
	pub fn grams(&self) -> impl Iterator<Item = &Gram> {
		self.probabilities.keys()
	}

	/// Sum of all probabilities (1.0 within floating-point tolerance).
	pub fn total_probability(&self) -> f64 {
		self.probabilities.values().sum()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::gram::extract;

	fn counts(text: &str) -> HashMap<Gram, u64> {
		let mut counts = HashMap::new();
		for gram in extract(text) {
			*counts.entry(gram).or_insert(0) += 1;
		}
		counts
	}

	#[test]
	fn test_add_one_smoothing() {
		// "aaaaaab" -> aaaa x3, aaab x1
		let native = counts("aaaaaab");
		let mut vocabulary: Vec<Gram> = native.keys().copied().collect();
		vocabulary.extend(extract("zzzz"));
		vocabulary.sort();

		let model = FrequencyModel::smoothed(&native, &vocabulary);
		assert_eq!(model.len(), 3);

		// (3+1) + (1+1) + (0+1) = 7
		let aaaa = extract("aaaa")[0];
		let zzzz = extract("zzzz")[0];
		assert!((model.probability(&aaaa).unwrap() - 4.0 / 7.0).abs() < 1e-12);
		assert!((model.probability(&zzzz).unwrap() - 1.0 / 7.0).abs() < 1e-12);
		assert!((model.total_probability() - 1.0).abs() < 1e-9);
	}

	#[test]
	fn test_unobserved_class_is_uniform() {
		let vocabulary = extract("abcdefghij");
		let model = FrequencyModel::smoothed(&HashMap::new(), &vocabulary);

		let expected = 1.0 / vocabulary.len() as f64;
		for gram in &vocabulary {
			assert!((model.probability(gram).unwrap() - expected).abs() < 1e-12);
		}
	}

	#[test]
	fn test_empty_vocabulary() {
		let model = FrequencyModel::smoothed(&HashMap::new(), &[]);
		assert!(model.is_empty());
		assert_eq!(model.probability(&extract("abcde")[0]), None);
	}
}

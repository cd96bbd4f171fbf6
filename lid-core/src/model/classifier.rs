use std::thread;

use super::gram::extract;
use super::trainer::LanguageModels;
use crate::error::{Error, Result};

/// Starting value of every class score.
///
/// Log-probabilities are added on top of 1 rather than 0. The value has no
/// probabilistic meaning; a best score still equal to it after scoring
/// means no gram contributed any evidence, and the line is reported as
/// unknown.
pub const NEUTRAL_SCORE: f64 = 1.0;

/// Share of unseen grams from which a line is reported as unknown.
pub const DEFAULT_UNSEEN_THRESHOLD: f64 = 0.7;

/// Why a prediction was made.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Verdict {
	/// Best scoring class (index into the label set).
	Class(usize),
	/// The line is too short to yield a single gram.
	NoGrams,
	/// Too many grams were never seen during training.
	Unseen,
	/// No gram changed any score.
	NoEvidence,
}

/// Predicted label of one line, with the evidence behind it.
#[derive(Clone, Debug, PartialEq)]
pub struct Prediction {
	line: String,
	label: String,
	verdict: Verdict,
	/// Final score per class, indexed like the label set.
	scores: Vec<f64>,
	grams: usize,
	unseen: usize,
}

impl Prediction {
	pub fn line(&self) -> &str {
		&self.line
	}

	pub fn label(&self) -> &str {
		&self.label
	}

	pub fn verdict(&self) -> Verdict {
		self.verdict
	}

	pub fn scores(&self) -> &[f64] {
		&self.scores
	}

	/// Number of grams extracted from the line.
	pub fn grams(&self) -> usize {
		self.grams
	}

	/// Share of grams missing from the vocabulary, `None` for gram-less lines.
	pub fn unseen_ratio(&self) -> Option<f64> {
		(self.grams > 0).then(|| self.unseen as f64 / self.grams as f64)
	}
}

/// Scores lines against trained language models.
///
/// # Decision rule
/// 1. A line without grams is unknown
/// 2. A line whose unseen ratio reaches the threshold is unknown
/// 3. A line whose best score is still `NEUTRAL_SCORE` is unknown
/// 4. Otherwise the best scoring class wins; ties go to the class
///    declared first in the label set
#[derive(Clone, Debug)]
pub struct Classifier {
	models: LanguageModels,
	unseen_threshold: f64,
}

impl Classifier {
	/// Creates a classifier using the default unseen threshold.
	pub fn new(models: LanguageModels) -> Self {
		Self { models, unseen_threshold: DEFAULT_UNSEEN_THRESHOLD }
	}

	/// Sets the unseen threshold (0.0..1.0).
	///
	/// # Errors
	/// Returns an error if the value is outside the valid range.
	pub fn with_unseen_threshold(mut self, unseen_threshold: f64) -> Result<Self> {
		if !(0.0..=1.0).contains(&unseen_threshold) {
			return Err(Error::InvalidConfig(format!(
				"unseen threshold must be between 0.0 and 1.0, got {unseen_threshold}"
			)));
		}
		self.unseen_threshold = unseen_threshold;
		Ok(self)
	}

	pub fn models(&self) -> &LanguageModels {
		&self.models
	}

	/// Predicts the class of a single line.
	pub fn classify(&self, line: &str) -> Prediction {
		let labels = self.models.labels();
		let models = self.models.models();
		let grams = extract(line);

		let mut scores = vec![NEUTRAL_SCORE; models.len()];
		let mut unseen = 0;
		for gram in &grams {
			// The vocabulary is shared, so the first model speaks for all
			if models[0].probability(gram).is_none() {
				unseen += 1;
			}
			for (score, model) in scores.iter_mut().zip(models) {
				if let Some(probability) = model.probability(gram) {
					*score += probability.ln();
				}
			}
		}

		let verdict = if grams.is_empty() {
			Verdict::NoGrams
		} else if unseen as f64 / grams.len() as f64 >= self.unseen_threshold {
			Verdict::Unseen
		} else {
			let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
			if best == NEUTRAL_SCORE {
				Verdict::NoEvidence
			} else {
				// First class reaching the best score wins ties
				scores.iter().position(|s| *s == best).map_or(Verdict::NoEvidence, Verdict::Class)
			}
		};

		let label = match verdict {
			Verdict::Class(index) => labels.label(index),
			_ => labels.unknown(),
		};

		log::trace!("{label} ({verdict:?}, {} grams, {unseen} unseen, scores {scores:?}): {line}", grams.len());

		Prediction { line: line.to_owned(), label: label.to_owned(), verdict, scores, grams: grams.len(), unseen }
	}

	/// Predicts every line, returning predictions in input order.
	///
	/// Lines are scored in parallel chunks; each line is independent, so
	/// the result is the same as classifying them one by one.
	pub fn classify_all<S: AsRef<str> + Sync>(&self, lines: &[S]) -> Vec<Prediction> {
		log::info!("testing language models...");
		if lines.is_empty() {
			return Vec::new();
		}

		let chunk_size = lines.len().div_ceil(num_cpus::get()).max(1);

		let predictions: Vec<Prediction> = thread::scope(|scope| {
			let handles: Vec<_> = lines
				.chunks(chunk_size)
				.map(|chunk| {
					scope.spawn(move || chunk.iter().map(|line| self.classify(line.as_ref())).collect::<Vec<_>>())
				})
				.collect();

			handles
				.into_iter()
				.flat_map(|handle| match handle.join() {
					Ok(chunk) => chunk,
					Err(panic) => std::panic::resume_unwind(panic),
				})
				.collect()
		});

		let unknown = predictions.iter().filter(|p| !matches!(p.verdict, Verdict::Class(_))).count();
		log::info!("classified {} lines, {} as '{}'", predictions.len(), unknown, self.models.labels().unknown());
		predictions
	}
}

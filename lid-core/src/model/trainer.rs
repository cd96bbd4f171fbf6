use std::sync::mpsc;
use std::thread;

use super::count_table::CountTable;
use super::frequency_model::FrequencyModel;
use super::gram::extract;
use super::label::{LabelPolicy, LabelSet};
use crate::error::{Error, Result};

/// One training example: a class index and the text following its label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabeledLine {
	pub class: usize,
	pub text: String,
}

/// Ordered training examples, labels already resolved against a `LabelSet`.
#[derive(Clone, Debug, Default)]
pub struct TrainingCorpus {
	entries: Vec<LabeledLine>,
}

impl TrainingCorpus {
	/// Parses raw `<label> <text...>` lines.
	///
	/// - The label is the first whitespace-delimited token
	/// - The text is everything after the label, kept verbatim (separator included)
	/// - Blank lines are skipped
	/// - Unknown labels are handled according to `policy`
	///
	/// # Errors
	/// Returns [`Error::UnknownLabel`] for the first unknown label under
	/// [`LabelPolicy::Strict`].
	pub fn parse<S: AsRef<str>>(lines: &[S], labels: &LabelSet, policy: LabelPolicy) -> Result<Self> {
		let mut entries = Vec::with_capacity(lines.len());

		for (index, line) in lines.iter().enumerate() {
			let line = line.as_ref().trim_start();
			if line.is_empty() {
				log::debug!("line {}: blank, skipped", index + 1);
				continue;
			}

			let split = line.find(char::is_whitespace).unwrap_or(line.len());
			let (label, text) = line.split_at(split);
			let class = labels.resolve(label, index + 1, policy)?;
			entries.push(LabeledLine { class, text: text.to_owned() });
		}

		Ok(Self { entries })
	}

	pub fn entries(&self) -> &[LabeledLine] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Training statistics of a single class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassSummary {
	pub label: String,
	pub lines: usize,
	pub grams: u64,
	pub distinct_grams: usize,
}

/// What went into the trained models.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrainingSummary {
	pub classes: Vec<ClassSummary>,
	pub vocabulary: usize,
}

/// The trained per-class models, aligned on a shared vocabulary.
#[derive(Clone, Debug)]
pub struct LanguageModels {
	labels: LabelSet,
	models: Vec<FrequencyModel>,
	summary: TrainingSummary,
}

impl LanguageModels {
	pub fn labels(&self) -> &LabelSet {
		&self.labels
	}

	/// Models indexed like `labels()`.
	pub fn models(&self) -> &[FrequencyModel] {
		&self.models
	}

	/// Model of a class, by label.
	pub fn model(&self, label: &str) -> Option<&FrequencyModel> {
		self.labels.index_of(label).map(|i| &self.models[i])
	}

	pub fn summary(&self) -> &TrainingSummary {
		&self.summary
	}
}

/// Builds smoothed per-class models from labeled lines.
///
/// # Behavior
/// - Splits the corpus into chunks (based on CPU cores * factor)
/// - Counts grams of each chunk on its own thread
/// - Merges all partial counts, then smooths and normalizes every class
///   over the union vocabulary
#[derive(Clone, Debug, Default)]
pub struct Trainer {
	labels: LabelSet,
	policy: LabelPolicy,
}

impl Trainer {
	pub fn new(labels: LabelSet, policy: LabelPolicy) -> Self {
		Self { labels, policy }
	}

	/// Parses and trains on raw `<label> <text...>` lines.
	pub fn train_lines<S: AsRef<str>>(&self, lines: &[S]) -> Result<LanguageModels> {
		log::info!("building language models...");
		let corpus = TrainingCorpus::parse(lines, &self.labels, self.policy)?;
		self.train(&corpus)
	}

	/// Trains one model per class of the label set.
	pub fn train(&self, corpus: &TrainingCorpus) -> Result<LanguageModels> {
		let counts = self.count(corpus)?;
		let vocabulary = counts.vocabulary();

		let models: Vec<FrequencyModel> = (0..self.labels.len())
			.map(|class| FrequencyModel::smoothed(counts.class_counts(class), &vocabulary))
			.collect();

		let summary = TrainingSummary {
			classes: (0..self.labels.len())
				.map(|class| ClassSummary {
					label: self.labels.label(class).to_owned(),
					lines: counts.class_lines(class),
					grams: counts.class_counts(class).values().sum(),
					distinct_grams: counts.class_counts(class).len(),
				})
				.collect(),
			vocabulary: vocabulary.len(),
		};

		for class in &summary.classes {
			if class.lines == 0 {
				log::warn!("class '{}' has no training lines, its model is uniform", class.label);
			}
			log::info!(
				"{}: {} lines, {} grams ({} distinct)",
				class.label, class.lines, class.grams, class.distinct_grams
			);
		}
		log::info!("shared vocabulary: {} grams", summary.vocabulary);

		Ok(LanguageModels { labels: self.labels.clone(), models, summary })
	}

	/// Counts grams per class, in parallel.
	///
	/// # Notes
	/// - Uses MPSC channels to collect partial tables from threads
	/// - A chunk whose thread dies without reporting fails the whole run
	fn count(&self, corpus: &TrainingCorpus) -> Result<CountTable> {
		let classes = self.labels.len();
		if corpus.is_empty() {
			return Ok(CountTable::new(classes));
		}

		let cpus = num_cpus::get();
		let factor = 8;
		let chunks = cpus * factor;
		let chunk_size = corpus.len().div_ceil(chunks).max(1);

		let (tx, rx) = mpsc::channel();
		let mut spawned = 0;
		for chunk in corpus.entries().chunks(chunk_size) {
			let tx = tx.clone();
			let chunk: Vec<LabeledLine> = chunk.to_vec();

			thread::spawn(move || {
				let partial = chunk
					.iter()
					.fold(CountTable::new(classes), |table, line| table.add_line(line.class, &extract(&line.text)));
				// The receiver only goes away if training already failed
				let _ = tx.send(partial);
			});
			spawned += 1;
		}
		drop(tx);

		let mut received = 0;
		let mut table = CountTable::new(classes);
		for partial in rx.iter() {
			table = table.merge(partial)?;
			received += 1;
		}

		if received != spawned {
			return Err(Error::Training(format!(
				"{} of {} counting workers did not report",
				spawned - received,
				spawned
			)));
		}

		log::debug!("merged {received} partial count tables");
		Ok(table)
	}
}

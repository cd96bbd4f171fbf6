use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{CommandFactory, Parser};

use lid_core::Config;
use lid_core::io;
use lid_core::model::classifier::Classifier;
use lid_core::model::label::LabelPolicy;
use lid_core::model::trainer::Trainer;

/// Identify the language of each line of a file with character 4-gram models.
#[derive(Parser, Debug)]
#[command(name = "lid", version, about)]
struct Args {
	/// Training file, one `<label> <text>` per line
	#[arg(short = 'b', value_name = "TRAIN_FILE")]
	train: PathBuf,

	/// File whose lines should be classified
	#[arg(short = 't', value_name = "TEST_FILE")]
	test: PathBuf,

	/// Output file, one `<label> <line>` per input line (overwritten)
	#[arg(short = 'o', value_name = "OUTPUT_FILE")]
	output: PathBuf,

	/// JSON configuration file; flags below override its values
	#[arg(long, value_name = "FILE")]
	config: Option<PathBuf>,

	/// Known classes in tie-break order, comma separated
	#[arg(long, value_delimiter = ',', value_name = "LABELS")]
	labels: Option<Vec<String>>,

	/// Class receiving training lines with an unknown label
	#[arg(long, value_name = "LABEL")]
	fallback: Option<String>,

	/// Reject training lines with an unknown label instead of falling back
	#[arg(long)]
	strict_labels: bool,

	/// Share of unseen grams (0.0..1.0) from which a line is unknown
	#[arg(long, value_name = "RATIO")]
	threshold: Option<f64>,

	/// Label written for lines matching no class
	#[arg(long, value_name = "LABEL")]
	unknown_label: Option<String>,

	/// Increase logging (-v info, -vv debug, -vvv trace)
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8,
}

impl Args {
	/// Builds the run configuration: file first, then flag overrides.
	fn config(&self) -> anyhow::Result<Config> {
		let mut config = match &self.config {
			Some(path) => Config::from_file(path).with_context(|| format!("loading {}", path.display()))?,
			None => Config::default(),
		};

		if let Some(labels) = &self.labels {
			config.labels = labels.clone();
		}
		if let Some(fallback) = &self.fallback {
			config.fallback = Some(fallback.clone());
		}
		if self.strict_labels {
			config.label_policy = LabelPolicy::Strict;
		}
		if let Some(threshold) = self.threshold {
			config.unseen_threshold = threshold;
		}
		if let Some(unknown_label) = &self.unknown_label {
			config.unknown_label = unknown_label.clone();
		}

		config.validate()?;
		Ok(config)
	}

	fn log_level(&self) -> log::LevelFilter {
		match self.verbose {
			0 => log::LevelFilter::Warn,
			1 => log::LevelFilter::Info,
			2 => log::LevelFilter::Debug,
			_ => log::LevelFilter::Trace,
		}
	}
}

fn main() -> ExitCode {
	let args = Args::parse();

	env_logger::Builder::new()
		.filter_level(args.log_level())
		.parse_default_env()
		.init();

	match run(&args) {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			eprintln!("Error: {err:?}\n");
			eprintln!("{}", Args::command().render_usage());
			eprintln!("\nFor more information, try '--help'.");
			ExitCode::from(2)
		}
	}
}

fn run(args: &Args) -> anyhow::Result<()> {
	let config = args.config()?;
	log::debug!("{config:?}");

	// Read everything before touching the output file
	let training = io::read_file(&args.train).context("reading training data")?;
	let lines = io::read_file(&args.test).context("reading lines to classify")?;

	let models = Trainer::new(config.label_set()?, config.label_policy).train_lines(&training)?;
	let classifier = Classifier::new(models).with_unseen_threshold(config.unseen_threshold)?;
	let predictions = classifier.classify_all(&lines);

	io::write_predictions(&args.output, &predictions).context("writing predictions")?;
	log::info!("wrote {} predictions to {}", predictions.len(), args.output.display());

	Ok(())
}

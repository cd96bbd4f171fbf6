use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::classifier::Prediction;

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`, line terminators are not kept
pub fn read_file<P: AsRef<Path>>(filename: P) -> Result<Vec<String>> {
	let path = filename.as_ref();
	let mut contents = String::new();
	File::open(path)
		.and_then(|mut file| file.read_to_string(&mut contents))
		.map_err(|e| Error::io(path, e))?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Writes one `<label> <line>` record per prediction.
///
/// The output file is truncated (or created) before writing, so nothing
/// from a previous run survives. Records keep the order of `predictions`.
pub fn write_predictions<P: AsRef<Path>>(filename: P, predictions: &[Prediction]) -> Result<()> {
	let path = filename.as_ref();
	let file = File::create(path).map_err(|e| Error::io(path, e))?;
	let mut writer = BufWriter::new(file);

	for prediction in predictions {
		writeln!(writer, "{} {}", prediction.label(), prediction.line()).map_err(|e| Error::io(path, e))?;
	}

	writer.flush().map_err(|e| Error::io(path, e))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::classifier::Classifier;
	use crate::model::label::{LabelPolicy, LabelSet};
	use crate::model::trainer::Trainer;

	#[test]
	fn test_read_file_strips_line_endings() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("input.txt");
		std::fs::write(&path, "first line\r\nsecond line\n").unwrap();

		let lines = read_file(&path).unwrap();
		assert_eq!(lines, vec!["first line".to_owned(), "second line".to_owned()]);
	}

	#[test]
	fn test_read_missing_file_reports_path() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("missing.txt");

		let err = read_file(&path).unwrap_err();
		assert!(matches!(err, Error::Io { .. }));
		assert!(err.to_string().contains("missing.txt"));
	}

	#[test]
	fn test_write_predictions_truncates() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("out.txt");
		std::fs::write(&path, "stale content from a previous run\n").unwrap();

		let labels = LabelSet::new(["alpha"], "other").unwrap();
		let models = Trainer::new(labels, LabelPolicy::Strict).train_lines(&["alpha aaaaaaaaaa"]).unwrap();
		let predictions = Classifier::new(models).classify_all(&["aaaaaaa", "xyz"]);
		write_predictions(&path, &predictions).unwrap();

		let written = std::fs::read_to_string(&path).unwrap();
		assert_eq!(written, "alpha aaaaaaa\nother xyz\n");
	}
}

use std::path::PathBuf;

/// Errors raised while loading resources, validating configuration
/// or training the language models.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("failed to access {}", .path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("line {line}: label '{label}' is not a known class")]
	UnknownLabel { line: usize, label: String },
	#[error("invalid configuration: {0}")]
	InvalidConfig(String),
	#[error("failed to parse configuration")]
	ConfigParse(#[from] serde_json::Error),
	#[error("at least one class label is required")]
	EmptyLabelSet,
	#[error("class label '{0}' is declared twice")]
	DuplicateLabel(String),
	#[error("training failed: {0}")]
	Training(String),
}

impl Error {
	/// Wraps an I/O error together with the path that produced it.
	pub(crate) fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
		Self::Io { path: path.into(), source }
	}
}

pub type Result<T> = std::result::Result<T, Error>;

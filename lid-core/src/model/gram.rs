use std::fmt;

/// Number of characters in a gram.
pub const GRAM_SIZE: usize = 4;

/// A fixed-width window of characters taken verbatim from the input.
///
/// No normalization is applied: case, punctuation, digits and whitespace
/// all take part in the gram.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Gram([char; GRAM_SIZE]);

impl Gram {
	pub fn new(chars: [char; GRAM_SIZE]) -> Self {
		Self(chars)
	}

	pub fn chars(&self) -> &[char; GRAM_SIZE] {
		&self.0
	}
}

impl fmt::Display for Gram {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.iter().try_for_each(|c| write!(f, "{c}"))
	}
}

/// Slides a window of `GRAM_SIZE` characters over `text`.
///
/// Every complete window is emitted, so a text of `len` characters yields
/// `len - 3` grams and texts shorter than 4 characters yield nothing. No
/// padding is added at either end. Duplicates are kept, in left-to-right
/// order.
///
/// `text` is expected without its line terminator: counted with the
/// terminator, a line of `len` characters yields `len - 4` grams, none of
/// which contains the terminator.
///
/// # Notes
/// - UTF-8 safe: works on `char`s, not bytes.
pub fn extract(text: &str) -> Vec<Gram> {
	let chars: Vec<char> = text.chars().collect();

	chars
		.windows(GRAM_SIZE)
		.map(|window| {
			let mut gram = ['\0'; GRAM_SIZE];
			gram.copy_from_slice(window);
			Gram(gram)
		})
		.collect()
}

/*!
# Declarg: Keys.
*/

use crate::DeclargError;
use std::fmt;



#[derive(Debug, Clone, Eq, Hash, PartialEq)]
/// # Key.
///
/// A single validated flag string, or the name of a positional argument.
///
/// * Short keys are a dash followed by exactly one character;
/// * Long keys are two dashes followed by a non-empty name;
/// * Positional names are anything non-empty without a leading dash;
pub(crate) enum Key {
	/// # Short Key (`-k`).
	Short(char),

	/// # Long Key (`--key`), dashes stripped.
	Long(String),

	/// # Positional Name.
	Positional(String),
}

impl fmt::Display for Key {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Short(c) => write!(f, "-{c}"),
			Self::Long(s) => write!(f, "--{s}"),
			Self::Positional(s) => f.write_str(s),
		}
	}
}

impl TryFrom<&str> for Key {
	type Error = DeclargError;

	/// # From Raw.
	///
	/// Only the shape is checked here: the number of leading dashes and a
	/// non-empty name. Anything else is left to clap.
	fn try_from(raw: &str) -> Result<Self, Self::Error> {
		let raw = raw.trim();
		if let Some(long) = raw.strip_prefix("--") {
			if ! long.is_empty() { return Ok(Self::Long(long.to_owned())); }
		}
		else if let Some(short) = raw.strip_prefix('-') {
			let mut chars = short.chars();
			if let (Some(c), None) = (chars.next(), chars.next()) {
				return Ok(Self::Short(c));
			}
		}
		else if valid_command(raw.as_bytes()) {
			return Ok(Self::Positional(raw.to_owned()));
		}

		Err(DeclargError::InvalidKey(raw.to_owned()))
	}
}

impl Key {
	#[must_use]
	/// # Is Positional?
	pub(crate) const fn is_positional(&self) -> bool {
		matches!(self, Self::Positional(_))
	}
}



/// # Parse Keys.
///
/// Validate and classify a full set of flags for one argument. An argument
/// must have at least one key, and a positional name cannot be mixed with
/// dashed flags.
pub(crate) fn parse_keys<I, S>(raw: I) -> Result<Vec<Key>, DeclargError>
where I: IntoIterator<Item=S>, S: AsRef<str> {
	let keys = raw.into_iter()
		.map(|k| Key::try_from(k.as_ref()))
		.collect::<Result<Vec<_>, _>>()?;

	if keys.is_empty() { return Err(DeclargError::Empty); }
	if 1 < keys.len() {
		if let Some(k) = keys.iter().find(|k| k.is_positional()) {
			return Err(DeclargError::InvalidKey(k.to_string()));
		}
	}

	Ok(keys)
}

#[must_use]
/// # Destination Name.
///
/// The first long key wins, then the first short key, then the positional
/// name. Dashes become underscores.
pub(crate) fn dest(keys: &[Key]) -> String {
	let raw = keys.iter()
		.find_map(|k| if let Key::Long(s) = k { Some(s.clone()) } else { None })
		.or_else(|| keys.iter().find_map(|k| match k {
			Key::Short(c) => Some(c.to_string()),
			Key::Positional(s) => Some(s.clone()),
			Key::Long(_) => None,
		}))
		.unwrap_or_default();

	raw.replace('-', "_")
}



#[must_use]
/// # Valid Command?
///
/// Subcommand and positional names need only be non-empty and dashless up
/// front.
pub(crate) const fn valid_command(name: &[u8]) -> bool {
	matches!(name, [first, ..] if *first != b'-')
}

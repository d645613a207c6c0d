/*!
# Declarg: Errors.
*/

use std::fmt;
use thiserror::Error;



#[derive(Debug, Error)]
/// # Error!
///
/// Specification mistakes (bad or duplicate keys) are caught while a spec is
/// being assembled; everything else turns up at parse time.
pub enum DeclargError {
	#[error("Duplicate key: {0}")]
	/// # Duplicate Key.
	///
	/// A flag, destination, or subcommand name was declared twice in the
	/// same scope.
	DuplicateKey(String),

	#[error("An argument needs at least one flag or name.")]
	/// # No Keys.
	Empty,

	#[error("Invalid command: {0}")]
	/// # Invalid (Sub)command Name.
	InvalidCommand(String),

	#[error("Invalid key: {0}")]
	/// # Invalid Key.
	InvalidKey(String),

	#[error("the following arguments are required: {}", join_missing(.0))]
	/// # Missing Required Argument(s).
	///
	/// These are arguments marked required whose requiredness had to be
	/// lifted from the parser because a default or environment fallback was
	/// configured, and which still came up empty.
	MissingRequired(Vec<MissingArg>),

	#[error(transparent)]
	/// # Parser Error.
	///
	/// This includes help and version requests, which carry an exit code of
	/// zero.
	Parse(#[from] clap::Error),
}

impl DeclargError {
	#[must_use]
	/// # As String Slice.
	///
	/// Return a short, static description of the error kind.
	pub const fn as_str(&self) -> &'static str {
		match self {
			Self::DuplicateKey(_) => "Duplicate key.",
			Self::Empty => "Missing key.",
			Self::InvalidCommand(_) => "Invalid command.",
			Self::InvalidKey(_) => "Invalid key.",
			Self::MissingRequired(_) => "Missing required arguments.",
			Self::Parse(_) => "Invalid arguments.",
		}
	}

	#[must_use]
	/// # Exit Code.
	///
	/// User input errors exit with `2`, help/version displays with `0`, and
	/// specification mistakes with `1`.
	pub fn exit_code(&self) -> i32 {
		match self {
			Self::Parse(e) => e.exit_code(),
			Self::MissingRequired(_) => 2,
			_ => 1,
		}
	}

	/// # Print and Exit.
	///
	/// Print the error (or help/version screen) and terminate the process
	/// with the appropriate [exit code](DeclargError::exit_code).
	pub fn exit(self) -> ! {
		match self {
			Self::Parse(e) => e.exit(),
			e => {
				eprintln!("error: {e}");
				std::process::exit(e.exit_code());
			},
		}
	}
}



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Missing Argument.
///
/// A required top-level argument that was neither supplied nor defaulted.
pub struct MissingArg {
	/// # Destination Name.
	dest: String,

	/// # Flags.
	///
	/// For positionals this holds the destination name instead.
	flags: Vec<String>,
}

impl fmt::Display for MissingArg {
	/// # Display.
	///
	/// A lone flag prints bare; several print as a bracketed list.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.flags.as_slice() {
			[one] => f.write_str(one),
			many => write!(f, "[{}]", many.join(", ")),
		}
	}
}

impl MissingArg {
	#[must_use]
	/// # New.
	pub(crate) const fn new(dest: String, flags: Vec<String>) -> Self {
		Self { dest, flags }
	}

	#[must_use]
	/// # Destination Name.
	pub fn dest(&self) -> &str { &self.dest }

	#[must_use]
	/// # Flags.
	pub fn flags(&self) -> &[String] { &self.flags }
}



/// # Join Missing.
fn join_missing(list: &[MissingArg]) -> String {
	list.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>()
		.join(", ")
}

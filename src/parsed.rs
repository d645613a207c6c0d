/*!
# Declarg: Parse Results.
*/

use clap::{
	parser::ValuesRef,
	ArgMatches,
};
use crate::Handler;
use std::{
	any::Any,
	ffi::{
		OsStr,
		OsString,
	},
	fmt,
};



#[derive(Clone)]
/// # Parse Results.
///
/// This is what a successful [`CliSpec::try_parse_from`](crate::CliSpec::try_parse_from)
/// returns: the underlying [`ArgMatches`], the selected subcommand (if any)
/// along with its handler, and any unknown tokens that were discarded.
///
/// Value lookups check the subcommand's matches first, then the top level,
/// so handlers can reach both through one interface.
pub struct Parsed {
	/// # Matches.
	matches: ArgMatches,

	/// # Selected Subcommand.
	subcmd: Option<(String, Handler)>,

	/// # Discarded Tokens.
	unknown: Vec<OsString>,
}

impl fmt::Debug for Parsed {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Parsed")
			.field("matches", &self.matches)
			.field("subcmd", &self.subcmd())
			.field("unknown", &self.unknown)
			.finish()
	}
}

impl Parsed {
	#[must_use]
	/// # New.
	pub(crate) const fn new(
		matches: ArgMatches,
		subcmd: Option<(String, Handler)>,
		unknown: Vec<OsString>,
	) -> Self {
		Self { matches, subcmd, unknown }
	}
}

/// ## Subcommands.
impl Parsed {
	#[must_use]
	/// # Subcommand Name.
	pub fn subcmd(&self) -> Option<&str> {
		self.subcmd.as_ref().map(|(name, _)| name.as_str())
	}

	#[must_use]
	/// # Subcommand Handler.
	///
	/// Return the handler registered for the subcommand that was selected.
	pub fn handler(&self) -> Option<Handler> {
		self.subcmd.as_ref().map(|(_, handler)| *handler)
	}

	#[must_use]
	/// # Subcommand Matches.
	pub fn subcmd_matches(&self) -> Option<&ArgMatches> {
		self.matches.subcommand().map(|(_, m)| m)
	}

	#[must_use]
	/// # Dispatch.
	///
	/// Run the selected subcommand's handler, returning its status code, or
	/// `None` if no subcommand was selected.
	pub fn dispatch(&self) -> Option<i32> {
		self.handler().map(|handler| handler(self))
	}
}

/// ## Values.
impl Parsed {
	#[must_use]
	/// # Matches.
	///
	/// Borrow the top-level [`ArgMatches`].
	pub const fn matches(&self) -> &ArgMatches { &self.matches }

	#[must_use]
	/// # Unknown Tokens.
	///
	/// When unknown arguments are tolerated, these are the tokens that were
	/// dropped to make the rest parse.
	pub fn unknown(&self) -> &[OsString] { &self.unknown }

	#[must_use]
	/// # Get One.
	///
	/// Return the typed value for `id`, or `None` if it is absent, undefined,
	/// or of a different type.
	pub fn get_one<T: Any + Clone + Send + Sync + 'static>(&self, id: &str) -> Option<&T> {
		self.subcmd_matches()
			.and_then(|m| m.try_get_one::<T>(id).ok().flatten())
			.or_else(|| self.matches.try_get_one::<T>(id).ok().flatten())
	}

	#[must_use]
	/// # Get Many.
	///
	/// Like [`Parsed::get_one`], but for multi-value arguments.
	pub fn get_many<T: Any + Clone + Send + Sync + 'static>(&self, id: &str)
	-> Option<ValuesRef<'_, T>> {
		self.subcmd_matches()
			.and_then(|m| m.try_get_many::<T>(id).ok().flatten())
			.or_else(|| self.matches.try_get_many::<T>(id).ok().flatten())
	}

	#[must_use]
	/// # Get Flag.
	///
	/// Return the state of a boolean switch, `false` if undefined.
	pub fn get_flag(&self, id: &str) -> bool {
		self.get_one::<bool>(id).copied().unwrap_or(false)
	}

	#[must_use]
	/// # Raw Value.
	///
	/// Return the first value for `id` as it appeared before any type
	/// conversion.
	pub fn raw(&self, id: &str) -> Option<&OsStr> {
		self.subcmd_matches()
			.and_then(|m| raw_one(m, id))
			.or_else(|| raw_one(&self.matches, id))
	}
}



/// # First Raw Value.
fn raw_one<'a>(matches: &'a ArgMatches, id: &str) -> Option<&'a OsStr> {
	matches.try_get_raw(id).ok().flatten().and_then(|mut v| v.next())
}

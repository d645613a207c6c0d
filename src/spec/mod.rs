/*!
# Declarg: CLI Specifications.
*/

pub(super) mod arg;
pub(super) mod subcmd;

use arg::push_unique;
use clap::{
	error::{
		ContextKind,
		ContextValue,
		ErrorKind,
	},
	ArgMatches,
	Command,
};
use crate::{
	ArgSpec,
	DeclargError,
	EnvVar,
	MissingArg,
	Parsed,
	SubcmdGroup,
};
use std::ffi::{
	OsStr,
	OsString,
};
use tracing::debug;



#[derive(Debug, Clone, Default, Eq, PartialEq)]
/// # Parser Options.
///
/// Descriptive settings for a (sub)command parser.
pub struct ParserOptions {
	/// # About.
	about: Option<String>,

	/// # Long About.
	long_about: Option<String>,

	/// # Version.
	version: Option<String>,

	/// # Trailing Help.
	after_help: Option<String>,
}

impl ParserOptions {
	#[must_use]
	/// # With About.
	pub fn with_about<S: Into<String>>(mut self, about: S) -> Self {
		self.about = Some(about.into());
		self
	}

	#[must_use]
	/// # With Long About.
	pub fn with_long_about<S: Into<String>>(mut self, about: S) -> Self {
		self.long_about = Some(about.into());
		self
	}

	#[must_use]
	/// # With Version.
	///
	/// Setting a version also enables `-V`/`--version`.
	pub fn with_version<S: Into<String>>(mut self, version: S) -> Self {
		self.version = Some(version.into());
		self
	}

	#[must_use]
	/// # With After Help.
	pub fn with_after_help<S: Into<String>>(mut self, help: S) -> Self {
		self.after_help = Some(help.into());
		self
	}

	#[must_use]
	/// # Apply.
	pub(crate) fn apply(&self, mut cmd: Command) -> Command {
		if let Some(v) = &self.about { cmd = cmd.about(v.clone()); }
		if let Some(v) = &self.long_about { cmd = cmd.long_about(v.clone()); }
		if let Some(v) = &self.version { cmd = cmd.version(v.clone()); }
		if let Some(v) = &self.after_help { cmd = cmd.after_help(v.clone()); }
		cmd
	}
}



#[derive(Debug, Clone)]
/// # CLI Specification.
///
/// This is the top-level description of a program's command line: parser
/// options, top-level arguments, an optional group of subcommands, and a
/// couple of behavioral settings.
///
/// A `CliSpec` is never modified by building or parsing; every call to
/// [`CliSpec::build`] produces a fresh [`Command`] reflecting the environment
/// at that moment.
///
/// ## Environment Variables
///
/// When a prefix like `APP` is set, each argument can fall back
/// to `APP_{DEST}`, e.g. `APP_NAME` for `--name`. The variable's value
/// replaces any declared default, and its name is noted in the help.
///
/// ## Examples
///
/// ```
/// use declarg::{ArgSpec, CliSpec};
///
/// let spec = CliSpec::new("app")
///     .with_envvar_prefix("DECLARG_DOC_APP")
///     .with_arg(
///         ArgSpec::new(["-n", "--name"]).unwrap()
///             .with_help("Who to greet.")
///             .with_required(true)
///     )
///     .unwrap();
///
/// let parsed = spec.try_parse_from(["app", "--name", "alice"]).unwrap();
/// assert_eq!(parsed.get_one::<String>("name").map(String::as_str), Some("alice"));
///
/// // Nothing on the command line, nothing in the environment.
/// let err = spec.try_parse_from(["app"]).unwrap_err();
/// assert_eq!(err.exit_code(), 2);
/// assert_eq!(
///     err.to_string(),
///     "the following arguments are required: [-n, --name]",
/// );
/// ```
pub struct CliSpec {
	/// # Program Name.
	name: String,

	/// # Parser Options.
	parser: ParserOptions,

	/// # Top-Level Arguments.
	args: Vec<ArgSpec>,

	/// # Subcommands.
	subcmds: Option<SubcmdGroup>,

	/// # Reject Unknown Arguments?
	reject_unknown: bool,

	/// # Environment Variable Prefix.
	envvar_prefix: Option<String>,
}

/// ## Instantiation and Builder Patterns.
impl CliSpec {
	#[must_use]
	/// # New.
	///
	/// Unknown arguments are rejected by default.
	pub fn new<S: Into<String>>(name: S) -> Self {
		Self {
			name: name.into(),
			parser: ParserOptions::default(),
			args: Vec::new(),
			subcmds: None,
			reject_unknown: true,
			envvar_prefix: None,
		}
	}

	#[must_use]
	/// # With Parser Options.
	pub fn with_parser(mut self, parser: ParserOptions) -> Self {
		self.parser = parser;
		self
	}

	/// # With Argument.
	///
	/// ## Errors
	///
	/// This will return an error if the argument's destination or any of its
	/// flags were already taken.
	pub fn with_arg(mut self, arg: ArgSpec) -> Result<Self, DeclargError> {
		push_unique(&mut self.args, arg)?;
		Ok(self)
	}

	/// # With Arguments.
	///
	/// ## Errors
	///
	/// Same as [`CliSpec::with_arg`].
	pub fn with_args<I: IntoIterator<Item=ArgSpec>>(self, args: I)
	-> Result<Self, DeclargError> {
		args.into_iter().try_fold(self, Self::with_arg)
	}

	#[must_use]
	/// # With Subcommands.
	pub fn with_subcmds(mut self, group: SubcmdGroup) -> Self {
		self.subcmds = Some(group);
		self
	}

	#[must_use]
	/// # With Reject Unknown.
	///
	/// When `false`, unrecognized tokens are dropped instead of failing the
	/// parse. They remain available via [`Parsed::unknown`].
	pub const fn with_reject_unknown(mut self, reject: bool) -> Self {
		self.reject_unknown = reject;
		self
	}

	#[must_use]
	/// # With Environment Variable Prefix.
	pub fn with_envvar_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
		self.envvar_prefix = Some(prefix.into());
		self
	}
}

/// ## Queries.
impl CliSpec {
	#[must_use]
	/// # Program Name.
	pub fn name(&self) -> &str { &self.name }

	#[must_use]
	/// # Parser Options.
	pub const fn parser(&self) -> &ParserOptions { &self.parser }

	#[must_use]
	/// # Top-Level Arguments.
	pub fn args(&self) -> &[ArgSpec] { &self.args }

	#[must_use]
	/// # Subcommands.
	pub const fn subcmds(&self) -> Option<&SubcmdGroup> { self.subcmds.as_ref() }

	#[must_use]
	/// # Reject Unknown?
	pub const fn reject_unknown(&self) -> bool { self.reject_unknown }

	#[must_use]
	/// # Environment Variable Prefix.
	pub fn envvar_prefix(&self) -> Option<&str> { self.envvar_prefix.as_deref() }

	/// # Argument Names.
	///
	/// Return the destination names of the top-level arguments, in order.
	pub fn arg_names(&self) -> impl Iterator<Item=&str> {
		self.args.iter().map(ArgSpec::dest)
	}

	#[must_use]
	/// # Values.
	///
	/// Return the raw value of each top-level argument, in order.
	pub fn values<'a>(&self, parsed: &'a Parsed) -> Vec<Option<&'a OsStr>> {
		self.arg_names().map(|name| parsed.raw(name)).collect()
	}

	#[must_use]
	/// # Name/Value Pairs.
	///
	/// Same as [`CliSpec::values`], but each value is paired with its name.
	pub fn name_value_pairs<'a>(&'a self, parsed: &'a Parsed)
	-> Vec<(&'a str, Option<&'a OsStr>)> {
		self.arg_names().map(|name| (name, parsed.raw(name))).collect()
	}

	#[must_use]
	/// # Environment Variables.
	///
	/// Return the environment variables backing the top-level arguments,
	/// optionally filtered by whether the argument is required. If no prefix
	/// is configured, the result is empty.
	pub fn envvars(&self, required: Option<bool>) -> Vec<EnvVar> {
		let Some(prefix) = self.envvar_prefix.as_deref() else { return Vec::new(); };
		self.args.iter()
			.filter(|a| required.map_or(true, |r| a.required() == r))
			.map(|a| a.envvar(prefix))
			.collect()
	}
}

/// ## Building and Parsing.
impl CliSpec {
	#[must_use]
	/// # Build Parser.
	///
	/// Construct a [`Command`] from the specification, applying the
	/// environment-aware adjustments from [`ArgSpec::enhance`] to every
	/// argument, subcommands included.
	pub fn build(&self) -> Command {
		let prefix = self.envvar_prefix.as_deref();
		let cmd = self.args.iter().fold(
			self.parser.apply(Command::new(self.name.clone())),
			|cmd, arg| cmd.arg(arg.arg(prefix)),
		);

		let cmd = match &self.subcmds {
			Some(group) => group.apply(cmd, prefix),
			None => cmd,
		};

		debug!(
			name = %self.name,
			args = self.args.len(),
			subcmds = self.subcmds.as_ref().map_or(0, |g| g.subcmds().len()),
			"built command",
		);

		cmd
	}

	#[must_use]
	/// # Format Help.
	pub fn format_help(&self) -> String {
		self.build().render_help().to_string()
	}

	/// # Parse (Environment).
	///
	/// Parse [`std::env::args_os`].
	///
	/// ## Errors
	///
	/// See [`CliSpec::try_parse_from`].
	pub fn try_parse(&self) -> Result<Parsed, DeclargError> {
		self.try_parse_from(std::env::args_os())
	}

	/// # Parse.
	///
	/// Build the parser, parse `argv` (the first entry being the program
	/// name), and [validate](CliSpec::validate) the result.
	///
	/// ## Errors
	///
	/// This returns [`DeclargError::Parse`] if clap rejects the input
	/// (including requests for help or version information), or
	/// [`DeclargError::MissingRequired`] if validation fails.
	pub fn try_parse_from<I, T>(&self, argv: I) -> Result<Parsed, DeclargError>
	where I: IntoIterator<Item=T>, T: Into<OsString> {
		let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
		let (matches, unknown) = self.matches(argv)?;
		self.validate(&matches)?;

		let subcmd = matches.subcommand_name()
			.and_then(|name| self.subcmds.as_ref()?.find(name))
			.map(|s| (s.name().to_owned(), s.handler()));

		Ok(Parsed::new(matches, subcmd, unknown))
	}

	#[must_use]
	/// # Parse or Exit (Environment).
	///
	/// Parse [`std::env::args_os`], printing any error and terminating the
	/// process on failure.
	pub fn parse(&self) -> Parsed {
		self.parse_from(std::env::args_os())
	}

	#[must_use]
	/// # Parse or Exit.
	///
	/// Same as [`CliSpec::try_parse_from`], except errors are printed and the
	/// process is terminated with the error's [exit code](DeclargError::exit_code).
	pub fn parse_from<I, T>(&self, argv: I) -> Parsed
	where I: IntoIterator<Item=T>, T: Into<OsString> {
		self.try_parse_from(argv).unwrap_or_else(|e| e.exit())
	}

	/// # Validate.
	///
	/// Make sure every top-level argument declared as required ended up with
	/// a value, either from the command line or a default.
	///
	/// This is needed because [`ArgSpec::enhance`] lifts the parser's own
	/// requirement whenever a fallback is configured, even if the fallback
	/// turns out to be empty.
	///
	/// Subcommand arguments are not checked here.
	///
	/// ## Errors
	///
	/// Returns [`DeclargError::MissingRequired`] listing every argument that
	/// came up empty.
	pub fn validate(&self, matches: &ArgMatches) -> Result<(), DeclargError> {
		let missing: Vec<MissingArg> = self.args.iter()
			.filter(|a| a.required() && matches.value_source(a.dest()).is_none())
			.map(ArgSpec::missing)
			.collect();

		if missing.is_empty() { Ok(()) }
		else {
			debug!(missing = missing.len(), "required arguments missing");
			Err(DeclargError::MissingRequired(missing))
		}
	}

	/// # Matches.
	///
	/// Run clap. If unknown arguments are tolerated, offending tokens are
	/// removed one at a time until the rest parses.
	fn matches(&self, mut argv: Vec<OsString>)
	-> Result<(ArgMatches, Vec<OsString>), DeclargError> {
		let mut cmd = self.build();
		let mut unknown = Vec::new();

		loop {
			match cmd.try_get_matches_from_mut(argv.iter()) {
				Ok(matches) => return Ok((matches, unknown)),
				Err(e) if ! self.reject_unknown && e.kind() == ErrorKind::UnknownArgument => {
					let Some(idx) = unknown_position(&e, &cmd, &argv) else { return Err(e.into()); };
					let token = argv.remove(idx);
					debug!(token = ?token, "discarded unknown argument");
					unknown.push(token);
				},
				Err(e) => return Err(e.into()),
			}
		}
	}
}



/// # Unknown Token Position.
///
/// Find the `argv` index of the token clap complained about. Tokens consumed
/// as option values are skipped, and the scope follows any subcommand along
/// the way. The program name in slot zero is never a candidate.
fn unknown_position(err: &clap::Error, cmd: &Command, argv: &[OsString])
-> Option<usize> {
	let Some(ContextValue::String(bad)) = err.get(ContextKind::InvalidArg) else {
		return None;
	};

	let mut cmd = cmd;
	let mut value_next = false;
	let mut escaped = false;
	for (idx, raw) in argv.iter().enumerate().skip(1) {
		if value_next {
			value_next = false;
			continue;
		}

		let Some(raw) = raw.to_str() else { continue; };
		if raw == bad || raw.strip_prefix(bad.as_str()).is_some_and(|rest| rest.starts_with('=')) {
			return Some(idx);
		}

		// Past a `--`, everything is positional.
		if ! escaped {
			if raw == "--" { escaped = true; }
			else if let Some(sub) = cmd.find_subcommand(raw) { cmd = sub; }
			else { value_next = takes_value(cmd, raw); }
		}
	}

	None
}

/// # Takes Value?
///
/// Returns `true` if `raw` is an option of `cmd` whose value is the next
/// token, i.e. `--key` or `-k` (possibly the tail of a short cluster)
/// without an inline value.
fn takes_value(cmd: &Command, raw: &str) -> bool {
	if let Some(long) = raw.strip_prefix("--") {
		return ! long.contains('=') && cmd.get_arguments().any(|a|
			a.get_action().takes_values() &&
			(
				a.get_long() == Some(long) ||
				a.get_all_aliases().is_some_and(|v| v.contains(&long))
			)
		);
	}

	let Some(shorts) = raw.strip_prefix('-') else { return false; };
	let mut chars = shorts.chars();
	while let Some(c) = chars.next() {
		let Some(arg) = cmd.get_arguments().find(|a|
			a.get_short() == Some(c) ||
			a.get_all_short_aliases().is_some_and(|v| v.contains(&c))
		) else { return false; };

		// Anything after a value-taking short is its value.
		if arg.get_action().takes_values() { return chars.as_str().is_empty(); }
	}

	false
}



#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		ArgKind,
		GroupOptions,
		SubcmdSpec,
	};
	use serial_test::serial;

	fn start(_: &Parsed) -> i32 { 10 }
	fn stop(_: &Parsed) -> i32 { 20 }

	fn name_spec(prefix: &str) -> CliSpec {
		CliSpec::new("app")
			.with_envvar_prefix(prefix)
			.with_arg(
				ArgSpec::new(["--name"])
					.expect("ArgSpec failed.")
					.with_help("Who to greet.")
					.with_required(true)
			)
			.expect("CliSpec failed.")
	}

	fn service_spec() -> CliSpec {
		CliSpec::new("svc")
			.with_arg(
				ArgSpec::new(["-v", "--verbose"])
					.expect("ArgSpec failed.")
					.with_action(ArgKind::Count)
			)
			.expect("CliSpec failed.")
			.with_subcmds(
				SubcmdGroup::new(GroupOptions::default())
					.with_subcmds([
						SubcmdSpec::new("start", start)
							.expect("SubcmdSpec failed.")
							.with_arg(
								ArgSpec::new(["--port"])
									.expect("ArgSpec failed.")
									.with_default("80")
									.with_value_parser(clap::value_parser!(u16))
							)
							.expect("SubcmdSpec failed."),
						SubcmdSpec::new("stop", stop).expect("SubcmdSpec failed."),
					])
					.expect("SubcmdGroup failed.")
			)
	}

	#[test]
	#[serial]
	fn t_required_env_unset() {
		std::env::remove_var("DECLARG_T_UNSET_NAME");
		let spec = name_spec("DECLARG_T_UNSET");

		let Err(err) = spec.try_parse_from(["app"]) else {
			panic!("Parse should have failed.");
		};
		assert!(matches!(&err, DeclargError::MissingRequired(m) if m.len() == 1));
		assert_eq!(err.exit_code(), 2);
		assert_eq!(err.to_string(), "the following arguments are required: --name");

		// The command line still works, of course.
		let parsed = spec.try_parse_from(["app", "--name", "bob"]).expect("Parse failed.");
		assert_eq!(parsed.get_one::<String>("name").map(String::as_str), Some("bob"));
	}

	#[test]
	#[serial]
	fn t_required_env_set() {
		std::env::set_var("DECLARG_T_SET_NAME", "alice");
		let spec = name_spec("DECLARG_T_SET");
		let parsed = spec.try_parse_from(["app"]);
		let help = spec.format_help();
		std::env::remove_var("DECLARG_T_SET_NAME");

		let parsed = parsed.expect("Parse failed.");
		assert_eq!(parsed.get_one::<String>("name").map(String::as_str), Some("alice"));
		assert!(help.contains("Who to greet. (required,"));
		assert!(help.contains("DECLARG_T_SET_NAME)"));

		// The command line beats the environment.
		std::env::set_var("DECLARG_T_SET_NAME", "alice");
		let parsed = spec.try_parse_from(["app", "--name", "carol"]);
		std::env::remove_var("DECLARG_T_SET_NAME");
		assert_eq!(
			parsed.expect("Parse failed.").get_one::<String>("name").map(String::as_str),
			Some("carol"),
		);
	}

	#[test]
	#[serial]
	fn t_env_coerced_by_parser() {
		std::env::set_var("DECLARG_T_COERCE_COUNT", "5");
		let spec = CliSpec::new("app")
			.with_envvar_prefix("DECLARG_T_COERCE")
			.with_arg(
				ArgSpec::new(["--count"])
					.expect("ArgSpec failed.")
					.with_default("1")
					.with_value_parser(clap::value_parser!(u32))
			)
			.expect("CliSpec failed.");
		let parsed = spec.try_parse_from(["app"]);
		std::env::remove_var("DECLARG_T_COERCE_COUNT");

		assert_eq!(parsed.expect("Parse failed.").get_one::<u32>("count"), Some(&5));

		// Without the variable, the declared default comes back.
		let parsed = spec.try_parse_from(["app"]).expect("Parse failed.");
		assert_eq!(parsed.get_one::<u32>("count"), Some(&1));
	}

	#[test]
	fn t_validate_aggregates() {
		let spec = CliSpec::new("app")
			.with_args([
				ArgSpec::new(["-u", "--user"])
					.expect("ArgSpec failed.")
					.with_required(true)
					.with_default("root"),
				ArgSpec::new(["--host"])
					.expect("ArgSpec failed.")
					.with_required(true),
				ArgSpec::new(["-p", "--port"])
					.expect("ArgSpec failed.")
					.with_required(true),
			])
			.expect("CliSpec failed.");

		// Clap catches missing arguments that stay required on its end,
		let err = spec.try_parse_from(["app"]).expect_err("Parse should have failed.");
		assert!(matches!(&err, DeclargError::Parse(e) if e.kind() == ErrorKind::MissingRequiredArgument));
		assert_eq!(err.exit_code(), 2);

		// while validation catches everything it was asked to.
		let matches = Command::new("app")
			.arg(clap::Arg::new("user").long("user"))
			.arg(clap::Arg::new("host").long("host"))
			.arg(clap::Arg::new("port").long("port"))
			.try_get_matches_from(["app", "--user", "x"])
			.expect("Matches failed.");
		let Err(DeclargError::MissingRequired(missing)) = spec.validate(&matches) else {
			panic!("Validation should have failed.");
		};
		let missing: Vec<String> = missing.iter().map(ToString::to_string).collect();
		assert_eq!(missing, ["--host", "[-p, --port]"]);
	}

	#[test]
	fn t_subcmd_dispatch() {
		let spec = service_spec();

		let parsed = spec.try_parse_from(["svc", "-vv", "start", "--port", "8080"])
			.expect("Parse failed.");
		assert_eq!(parsed.subcmd(), Some("start"));
		assert_eq!(parsed.dispatch(), Some(10));
		assert_eq!(parsed.get_one::<u16>("port"), Some(&8080));
		assert_eq!(parsed.get_one::<u8>("verbose"), Some(&2));

		let parsed = spec.try_parse_from(["svc", "stop"]).expect("Parse failed.");
		assert_eq!(parsed.subcmd(), Some("stop"));
		assert_eq!(parsed.handler().map(|h| h(&parsed)), Some(20));
		assert!(parsed.get_one::<u16>("port").is_none());

		// No subcommand, no handler.
		let parsed = spec.try_parse_from(["svc"]).expect("Parse failed.");
		assert!(parsed.subcmd().is_none());
		assert!(parsed.dispatch().is_none());
	}

	#[test]
	fn t_unknown_args() {
		let spec = service_spec();
		let err = spec.try_parse_from(["svc", "--bogus", "stop"])
			.expect_err("Parse should have failed.");
		assert!(matches!(&err, DeclargError::Parse(e) if e.kind() == ErrorKind::UnknownArgument));
		assert_eq!(err.exit_code(), 2);

		let spec = spec.with_reject_unknown(false);
		let parsed = spec.try_parse_from(["svc", "--bogus", "-v", "--what=ever", "stop"])
			.expect("Parse failed.");
		assert_eq!(parsed.subcmd(), Some("stop"));
		assert_eq!(parsed.get_one::<u8>("verbose"), Some(&1));
		assert_eq!(parsed.unknown(), [OsString::from("--bogus"), OsString::from("--what=ever")]);

		// Only the stray goes, not an earlier value with the same text.
		let parsed = spec.try_parse_from(["svc", "start", "--port", "80", "80"])
			.expect("Parse failed.");
		assert_eq!(parsed.get_one::<u16>("port"), Some(&80));
		assert_eq!(parsed.unknown(), [OsString::from("80")]);
	}

	#[test]
	fn t_unknown_after_values() {
		let spec = CliSpec::new("app")
			.with_args([
				ArgSpec::new(["--host"]).expect("ArgSpec failed."),
				ArgSpec::new(["-p", "--port"]).expect("ArgSpec failed."),
			])
			.expect("CliSpec failed.")
			.with_reject_unknown(false);

		let parsed = spec.try_parse_from(["app", "--host", "x", "--port", "1", "x"])
			.expect("Parse failed.");
		assert_eq!(parsed.get_one::<String>("host").map(String::as_str), Some("x"));
		assert_eq!(parsed.get_one::<String>("port").map(String::as_str), Some("1"));
		assert_eq!(parsed.unknown(), [OsString::from("x")]);

		// Short options and inline values.
		let parsed = spec.try_parse_from(["app", "-p", "x", "x", "--host=x"])
			.expect("Parse failed.");
		assert_eq!(parsed.get_one::<String>("host").map(String::as_str), Some("x"));
		assert_eq!(parsed.get_one::<String>("port").map(String::as_str), Some("x"));
		assert_eq!(parsed.unknown(), [OsString::from("x")]);

		let parsed = spec.try_parse_from(["app", "--host=x", "x", "-px"])
			.expect("Parse failed.");
		assert_eq!(parsed.get_one::<String>("port").map(String::as_str), Some("x"));
		assert_eq!(parsed.unknown(), [OsString::from("x")]);
	}

	#[test]
	#[serial]
	fn t_env_switch() {
		let spec = CliSpec::new("app")
			.with_envvar_prefix("DECLARG_T_SWITCH")
			.with_arg(
				ArgSpec::new(["--dry-run"])
					.expect("ArgSpec failed.")
					.with_action(ArgKind::SetTrue)
			)
			.expect("CliSpec failed.");

		std::env::set_var("DECLARG_T_SWITCH_DRY_RUN", "1");
		let parsed = spec.try_parse_from(["app"]);
		std::env::remove_var("DECLARG_T_SWITCH_DRY_RUN");
		assert!(parsed.expect("Parse failed.").get_flag("dry_run"));

		std::env::set_var("DECLARG_T_SWITCH_DRY_RUN", "no");
		let parsed = spec.try_parse_from(["app"]);
		std::env::remove_var("DECLARG_T_SWITCH_DRY_RUN");
		assert!(! parsed.expect("Parse failed.").get_flag("dry_run"));

		// Nothing set.
		let parsed = spec.try_parse_from(["app", "--dry-run"]).expect("Parse failed.");
		assert!(parsed.get_flag("dry_run"));
		let parsed = spec.try_parse_from(["app"]).expect("Parse failed.");
		assert!(! parsed.get_flag("dry_run"));
	}

	#[test]
	#[serial]
	fn t_env_subcmd() {
		let spec = CliSpec::new("svc")
			.with_envvar_prefix("DECLARG_T_SUB")
			.with_subcmds(
				SubcmdGroup::new(GroupOptions::default())
					.with_subcmd(
						SubcmdSpec::new("start", start)
							.expect("SubcmdSpec failed.")
							.with_arg(
								ArgSpec::new(["--port"])
									.expect("ArgSpec failed.")
									.with_help("Port to bind.")
									.with_required(true)
									.with_value_parser(clap::value_parser!(u16))
							)
							.expect("SubcmdSpec failed.")
					)
					.expect("SubcmdGroup failed.")
			);

		std::env::set_var("DECLARG_T_SUB_PORT", "8080");
		let parsed = spec.try_parse_from(["svc", "start"]);
		let cmd = spec.build();
		std::env::remove_var("DECLARG_T_SUB_PORT");

		let parsed = parsed.expect("Parse failed.");
		assert_eq!(parsed.subcmd(), Some("start"));
		assert_eq!(parsed.get_one::<u16>("port"), Some(&8080));

		let port = cmd.find_subcommand("start")
			.and_then(|c| c.get_arguments().find(|a| a.get_id() == "port"))
			.expect("Missing port.");
		assert!(! port.is_required_set());
		assert_eq!(
			port.get_help().map(ToString::to_string).as_deref(),
			Some("Port to bind. (required, environment variable: DECLARG_T_SUB_PORT)"),
		);
		assert_eq!(
			port.get_default_values().first().and_then(|v| v.to_str()),
			Some("8080"),
		);

		// The requirement stays lifted without the variable; subcommands
		// aren't validated.
		let parsed = spec.try_parse_from(["svc", "start"]).expect("Parse failed.");
		assert!(parsed.get_one::<u16>("port").is_none());
		assert!(spec.envvars(None).is_empty());
	}

	#[test]
	fn t_help_request() {
		let err = service_spec()
			.try_parse_from(["svc", "--help"])
			.expect_err("Help should short-circuit.");
		assert!(matches!(&err, DeclargError::Parse(e) if e.kind() == ErrorKind::DisplayHelp));
		assert_eq!(err.exit_code(), 0);
	}

	#[test]
	fn t_build_is_fresh() {
		let spec = service_spec();
		let a = spec.build();
		let b = spec.build();
		assert_eq!(a.get_name(), b.get_name());
		assert_eq!(a.get_arguments().count(), b.get_arguments().count());
		assert_eq!(spec.format_help(), spec.format_help());
	}

	#[test]
	#[serial]
	fn t_envvars() {
		assert!(service_spec().envvars(None).is_empty());

		std::env::set_var("DECLARG_T_VARS_HOST", "localhost");
		let spec = CliSpec::new("app")
			.with_envvar_prefix("DECLARG_T_VARS")
			.with_args([
				ArgSpec::new(["--host"]).expect("ArgSpec failed.").with_required(true),
				ArgSpec::new(["--dry-run"]).expect("ArgSpec failed.").with_action(ArgKind::SetTrue),
			])
			.expect("CliSpec failed.");

		let all = spec.envvars(None);
		let required = spec.envvars(Some(true));
		let optional = spec.envvars(Some(false));
		std::env::remove_var("DECLARG_T_VARS_HOST");

		let names: Vec<&str> = all.iter().map(EnvVar::name).collect();
		assert_eq!(names, ["DECLARG_T_VARS_HOST", "DECLARG_T_VARS_DRY_RUN"]);
		assert_eq!(all[0].value(), Some("localhost"));
		assert!(all[1].value().is_none());

		assert_eq!(required.len(), 1);
		assert_eq!(required[0].name(), "DECLARG_T_VARS_HOST");
		assert_eq!(optional.len(), 1);
		assert_eq!(optional[0].name(), "DECLARG_T_VARS_DRY_RUN");
	}

	#[test]
	fn t_name_value_pairs() {
		let spec = CliSpec::new("app")
			.with_args([
				ArgSpec::new(["--host"]).expect("ArgSpec failed.").with_default("localhost"),
				ArgSpec::new(["--port"]).expect("ArgSpec failed."),
				ArgSpec::new(["path"]).expect("ArgSpec failed."),
			])
			.expect("CliSpec failed.");

		let names: Vec<&str> = spec.arg_names().collect();
		assert_eq!(names, ["host", "port", "path"]);

		let parsed = spec.try_parse_from(["app", "/tmp"]).expect("Parse failed.");
		assert_eq!(
			spec.values(&parsed),
			[Some(OsStr::new("localhost")), None, Some(OsStr::new("/tmp"))],
		);
		assert_eq!(
			spec.name_value_pairs(&parsed),
			[
				("host", Some(OsStr::new("localhost"))),
				("port", None),
				("path", Some(OsStr::new("/tmp"))),
			],
		);
	}

	#[test]
	fn t_duplicates() {
		let spec = CliSpec::new("app")
			.with_arg(ArgSpec::new(["-n", "--name"]).expect("ArgSpec failed."))
			.expect("CliSpec failed.");
		assert!(matches!(
			spec.with_arg(ArgSpec::new(["-n", "--number"]).expect("ArgSpec failed.")),
			Err(DeclargError::DuplicateKey(k)) if k == "-n"
		));
	}
}

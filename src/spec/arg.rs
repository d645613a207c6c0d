/*!
# Declarg: Argument Specifications.
*/

use clap::{
	builder::{
		BoolishValueParser,
		ValueParser,
	},
	Arg,
	ArgAction,
};
use crate::{
	annotate_help,
	DeclargError,
	EnvVar,
	key::{
		self,
		Key,
	},
	MissingArg,
};
use tracing::debug;



#[derive(Debug, Clone, Copy, Default, Eq, Hash, PartialEq)]
/// # Argument Kind.
///
/// What the parser should do when it encounters the argument.
pub enum ArgKind {
	#[default]
	/// # Store a Value.
	Set,

	/// # Collect Values.
	Append,

	/// # Boolean Switch (On).
	SetTrue,

	/// # Boolean Switch (Off).
	SetFalse,

	/// # Count Occurrences.
	Count,
}

impl From<ArgKind> for ArgAction {
	fn from(src: ArgKind) -> Self {
		match src {
			ArgKind::Set => Self::Set,
			ArgKind::Append => Self::Append,
			ArgKind::SetTrue => Self::SetTrue,
			ArgKind::SetFalse => Self::SetFalse,
			ArgKind::Count => Self::Count,
		}
	}
}



#[derive(Debug, Clone, Default)]
/// # Argument Options.
///
/// The parser settings for a single argument. Defaults are held as strings
/// and run through the value parser exactly like command-line input.
pub struct ArgOptions {
	/// # Help Text.
	pub help: Option<String>,

	/// # Default Value.
	pub default: Option<String>,

	/// # Required?
	pub required: bool,

	/// # Action.
	pub action: ArgKind,

	/// # Value Name (for help/usage).
	pub value_name: Option<String>,

	/// # Value Parser.
	pub value_parser: Option<ValueParser>,

	/// # Hide From Help?
	pub hide: bool,
}



#[derive(Debug, Clone)]
/// # Argument Specification.
///
/// This describes a single command-line argument, i.e. its flags (or
/// positional name) and [`ArgOptions`], independently of any parser. The destination
/// name is worked out once, up front.
///
/// ## Examples
///
/// ```
/// use declarg::ArgSpec;
///
/// let spec = ArgSpec::new(["-n", "--dry-run"]).unwrap()
///     .with_help("Don't actually do anything.");
///
/// assert_eq!(spec.dest(), "dry_run");
/// assert_eq!(spec.envvar_base(), "DRY_RUN");
/// assert_eq!(spec.flags(), ["-n", "--dry-run"]);
/// ```
pub struct ArgSpec {
	/// # Keys.
	keys: Vec<Key>,

	/// # Destination Name.
	dest: String,

	/// # Options.
	options: ArgOptions,
}

/// ## Instantiation and Builder Patterns.
impl ArgSpec {
	/// # New.
	///
	/// Create a new argument from one or more flags (e.g. `["-n", "--name"]`)
	/// or a single positional name (e.g. `["path"]`).
	///
	/// ## Errors
	///
	/// This will return an error if no keys are given, any are malformed
	/// (e.g. `-`, `--`, or `-ab`), or a positional name is mixed with dashed
	/// flags.
	pub fn new<I, S>(flags: I) -> Result<Self, DeclargError>
	where I: IntoIterator<Item=S>, S: AsRef<str> {
		let keys = key::parse_keys(flags)?;
		let dest = key::dest(&keys);
		Ok(Self {
			keys,
			dest,
			options: ArgOptions::default(),
		})
	}

	#[must_use]
	/// # With Destination.
	///
	/// Override the derived destination name.
	pub fn with_dest<S: Into<String>>(mut self, dest: S) -> Self {
		self.dest = dest.into();
		self
	}

	#[must_use]
	/// # With Options.
	///
	/// Replace all options at once.
	pub fn with_options(mut self, options: ArgOptions) -> Self {
		self.options = options;
		self
	}

	#[must_use]
	/// # With Help.
	pub fn with_help<S: Into<String>>(mut self, help: S) -> Self {
		self.options.help = Some(help.into());
		self
	}

	#[must_use]
	/// # With Default.
	pub fn with_default<S: Into<String>>(mut self, default: S) -> Self {
		self.options.default = Some(default.into());
		self
	}

	#[must_use]
	/// # With Required.
	pub fn with_required(mut self, required: bool) -> Self {
		self.options.required = required;
		self
	}

	#[must_use]
	/// # With Action.
	pub fn with_action(mut self, action: ArgKind) -> Self {
		self.options.action = action;
		self
	}

	#[must_use]
	/// # With Value Name.
	pub fn with_value_name<S: Into<String>>(mut self, name: S) -> Self {
		self.options.value_name = Some(name.into());
		self
	}

	#[must_use]
	/// # With Value Parser.
	///
	/// Anything clap accepts works here, e.g. `clap::value_parser!(u16)` or a
	/// plain `fn(&str) -> Result<T, E>`.
	pub fn with_value_parser<P: Into<ValueParser>>(mut self, parser: P) -> Self {
		self.options.value_parser = Some(parser.into());
		self
	}

	#[must_use]
	/// # With Hide.
	pub fn with_hide(mut self, hide: bool) -> Self {
		self.options.hide = hide;
		self
	}
}

/// ## Queries.
impl ArgSpec {
	#[must_use]
	/// # Destination Name.
	pub fn dest(&self) -> &str { &self.dest }

	#[must_use]
	/// # Flags.
	///
	/// Return the dashed flags in declaration order. Positional arguments
	/// have none.
	pub fn flags(&self) -> Vec<String> {
		self.keys.iter()
			.filter(|k| ! k.is_positional())
			.map(ToString::to_string)
			.collect()
	}

	#[must_use]
	/// # Is Positional?
	pub fn is_positional(&self) -> bool {
		self.keys.first().is_some_and(Key::is_positional)
	}

	#[must_use]
	/// # Options (As Declared).
	pub const fn options(&self) -> &ArgOptions { &self.options }

	#[must_use]
	/// # Required (As Declared)?
	pub const fn required(&self) -> bool { self.options.required }

	#[must_use]
	/// # Environment Variable Base.
	///
	/// The upper-cased destination name.
	pub fn envvar_base(&self) -> String { self.dest.to_uppercase() }

	#[must_use]
	/// # Environment Variable.
	///
	/// Look up `{prefix}_{DEST}` in the current environment.
	pub fn envvar(&self, prefix: &str) -> EnvVar {
		EnvVar::new(format!("{prefix}_{}", self.envvar_base()))
	}
}

/// ## Enhancement.
impl ArgSpec {
	#[must_use]
	/// # Enhanced Options.
	///
	/// Return the options to actually hand the parser, resolving the
	/// environment variable (if `prefix` is set) at call time.
	///
	/// See [`ArgSpec::enhance_with`] for the rules.
	pub fn enhance(&self, prefix: Option<&str>) -> ArgOptions {
		let envvar = prefix.map(|p| self.envvar(p));
		self.enhance_with(envvar.as_ref())
	}

	#[must_use]
	/// # Enhanced Options (Explicit Environment).
	///
	/// This applies the following, in order, to a copy of the declared
	/// options. `envvar` stands in for "an environment prefix was given".
	///
	/// 1. If the argument is required and has a default or `envvar`, it is no longer required as far as the parser is concerned. ([`CliSpec::validate`](crate::CliSpec::validate) picks up the slack.)
	/// 2. If the argument was required, `required` is added to its help.
	/// 3. If there is an `envvar`, its name is added to the help.
	/// 4. If the `envvar` has a value, that becomes the default.
	///
	/// ## Examples
	///
	/// ```
	/// use declarg::{ArgSpec, EnvVar};
	///
	/// let spec = ArgSpec::new(["--port"]).unwrap()
	///     .with_help("Port to bind.")
	///     .with_default("1")
	///     .with_required(true);
	///
	/// let var = EnvVar::with_value("APP_PORT", Some("5"));
	/// let opts = spec.enhance_with(Some(&var));
	///
	/// assert!(! opts.required);
	/// assert_eq!(opts.default.as_deref(), Some("5"));
	/// assert_eq!(
	///     opts.help.as_deref(),
	///     Some("Port to bind. (required, environment variable: APP_PORT)"),
	/// );
	/// ```
	pub fn enhance_with(&self, envvar: Option<&EnvVar>) -> ArgOptions {
		let required = self.options.required;
		let mut out = self.options.clone();

		if required && (out.default.is_some() || envvar.is_some()) {
			out.required = false;
		}

		if required {
			out.help = out.help.map(|h| annotate_help(&h, "required"));
		}

		if let Some(var) = envvar {
			out.help = out.help.map(|h| annotate_help(
				&h,
				&format!("environment variable: {}", var.name()),
			));

			if let Some(value) = var.value() {
				debug!(arg = %self.dest, envvar = var.name(), "default taken from environment");
				out.default = Some(value.to_owned());
			}
		}

		out
	}
}

/// ## Parser Glue.
impl ArgSpec {
	#[must_use]
	/// # Clap Arg.
	///
	/// Materialize the argument with its enhanced options.
	pub(crate) fn arg(&self, prefix: Option<&str>) -> Arg {
		let opts = self.enhance(prefix);

		let mut arg = Arg::new(self.dest.clone())
			.action(ArgAction::from(opts.action))
			.required(opts.required)
			.hide(opts.hide);

		// The first short and long are primary; the rest are aliases.
		let mut short = false;
		let mut long = false;
		for k in &self.keys {
			match k {
				Key::Short(c) =>
					if short { arg = arg.visible_short_alias(*c); }
					else {
						short = true;
						arg = arg.short(*c);
					},
				Key::Long(s) =>
					if long { arg = arg.visible_alias(s.clone()); }
					else {
						long = true;
						arg = arg.long(s.clone());
					},
				Key::Positional(_) => {},
			}
		}

		if let Some(help) = opts.help { arg = arg.help(help); }
		if let Some(default) = opts.default { arg = arg.default_value(default); }
		if let Some(name) = opts.value_name { arg = arg.value_name(name); }

		// Switches accept `1`, `yes`, `on`, etc., so an environment default
		// doesn't have to be spelled `true`.
		match (opts.value_parser, opts.action) {
			(Some(parser), _) => arg.value_parser(parser),
			(None, ArgKind::SetTrue | ArgKind::SetFalse) =>
				arg.value_parser(BoolishValueParser::new()),
			(None, _) => arg,
		}
	}

	#[must_use]
	/// # Missing Descriptor.
	pub(crate) fn missing(&self) -> MissingArg {
		let flags =
			if self.is_positional() { vec![self.dest.clone()] }
			else { self.flags() };
		MissingArg::new(self.dest.clone(), flags)
	}
}



/// # Push Unique.
///
/// Add `spec` to `set` unless its destination or any of its flags are
/// already taken.
pub(super) fn push_unique(set: &mut Vec<ArgSpec>, spec: ArgSpec)
-> Result<(), DeclargError> {
	if set.iter().any(|s| s.dest == spec.dest) {
		return Err(DeclargError::DuplicateKey(spec.dest));
	}

	if let Some(k) = spec.keys.iter().find(|k|
		! k.is_positional() && set.iter().any(|s| s.keys.contains(k))
	) {
		return Err(DeclargError::DuplicateKey(k.to_string()));
	}

	set.push(spec);
	Ok(())
}

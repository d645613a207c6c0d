/*!
# Declarg: Subcommand Specifications.
*/

use clap::Command;
use crate::{
	ArgSpec,
	DeclargError,
	key::valid_command,
	Parsed,
};
use std::fmt;
use super::{
	arg::push_unique,
	ParserOptions,
};



/// # Subcommand Handler.
///
/// The function run for a subcommand; its return value is meant to be used
/// as the process exit code.
pub type Handler = fn(&Parsed) -> i32;



#[derive(Clone)]
/// # Subcommand Specification.
///
/// A named subcommand with its own parser options, arguments, and handler.
///
/// ## Examples
///
/// ```
/// use declarg::{ArgSpec, Parsed, SubcmdSpec};
///
/// fn start(_: &Parsed) -> i32 { 0 }
///
/// let start = SubcmdSpec::new("start", start).unwrap()
///     .with_arg(ArgSpec::new(["--detach"]).unwrap()).unwrap();
///
/// assert_eq!(start.name(), "start");
/// assert_eq!(start.args().len(), 1);
/// ```
pub struct SubcmdSpec {
	/// # Name.
	name: String,

	/// # Parser Options.
	parser: ParserOptions,

	/// # Handler.
	handler: Handler,

	/// # Arguments.
	args: Vec<ArgSpec>,
}

impl fmt::Debug for SubcmdSpec {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SubcmdSpec")
			.field("name", &self.name)
			.field("parser", &self.parser)
			.field("args", &self.args)
			.finish_non_exhaustive()
	}
}

impl SubcmdSpec {
	/// # New.
	///
	/// ## Errors
	///
	/// This will return an error if the name is empty or starts with a dash.
	pub fn new<S: AsRef<str>>(name: S, handler: Handler) -> Result<Self, DeclargError> {
		let name = name.as_ref().trim();
		if valid_command(name.as_bytes()) {
			Ok(Self {
				name: name.to_owned(),
				parser: ParserOptions::default(),
				handler,
				args: Vec::new(),
			})
		}
		else { Err(DeclargError::InvalidCommand(name.to_owned())) }
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
	/// flags were already taken by this subcommand.
	pub fn with_arg(mut self, arg: ArgSpec) -> Result<Self, DeclargError> {
		push_unique(&mut self.args, arg)?;
		Ok(self)
	}

	/// # With Arguments.
	///
	/// ## Errors
	///
	/// Same as [`SubcmdSpec::with_arg`].
	pub fn with_args<I: IntoIterator<Item=ArgSpec>>(self, args: I)
	-> Result<Self, DeclargError> {
		args.into_iter().try_fold(self, Self::with_arg)
	}

	#[must_use]
	/// # Name.
	pub fn name(&self) -> &str { &self.name }

	#[must_use]
	/// # Handler.
	pub const fn handler(&self) -> Handler { self.handler }

	#[must_use]
	/// # Parser Options.
	pub const fn parser(&self) -> &ParserOptions { &self.parser }

	#[must_use]
	/// # Arguments.
	pub fn args(&self) -> &[ArgSpec] { &self.args }

	#[must_use]
	/// # Clap Command.
	pub(crate) fn command(&self, prefix: Option<&str>) -> Command {
		self.args.iter().fold(
			self.parser.apply(Command::new(self.name.clone())),
			|cmd, arg| cmd.arg(arg.arg(prefix)),
		)
	}
}



#[derive(Debug, Clone, Default, Eq, PartialEq)]
/// # Subcommand Group Options.
pub struct GroupOptions {
	/// # Help Heading.
	pub title: Option<String>,

	/// # Placeholder Name (for help/usage).
	pub value_name: Option<String>,

	/// # Subcommand Required?
	pub required: bool,
}



#[derive(Debug, Clone, Default)]
/// # Subcommand Group.
///
/// A set of mutually-exclusive subcommands hanging off a [`CliSpec`](crate::CliSpec).
pub struct SubcmdGroup {
	/// # Options.
	options: GroupOptions,

	/// # Subcommands.
	subcmds: Vec<SubcmdSpec>,
}

impl SubcmdGroup {
	#[must_use]
	/// # New.
	pub fn new(options: GroupOptions) -> Self {
		Self {
			options,
			subcmds: Vec::new(),
		}
	}

	/// # With Subcommand.
	///
	/// ## Errors
	///
	/// This will return an error if the name was already taken.
	pub fn with_subcmd(mut self, subcmd: SubcmdSpec) -> Result<Self, DeclargError> {
		if self.find(subcmd.name()).is_some() {
			return Err(DeclargError::DuplicateKey(subcmd.name));
		}

		self.subcmds.push(subcmd);
		Ok(self)
	}

	/// # With Subcommands.
	///
	/// ## Errors
	///
	/// Same as [`SubcmdGroup::with_subcmd`].
	pub fn with_subcmds<I: IntoIterator<Item=SubcmdSpec>>(self, subcmds: I)
	-> Result<Self, DeclargError> {
		subcmds.into_iter().try_fold(self, Self::with_subcmd)
	}

	#[must_use]
	/// # Options.
	pub const fn options(&self) -> &GroupOptions { &self.options }

	#[must_use]
	/// # Subcommands.
	pub fn subcmds(&self) -> &[SubcmdSpec] { &self.subcmds }

	#[must_use]
	/// # Find By Name.
	pub fn find(&self, name: &str) -> Option<&SubcmdSpec> {
		self.subcmds.iter().find(|s| s.name == name)
	}

	#[must_use]
	/// # Attach to Parent.
	pub(crate) fn apply(&self, mut cmd: Command, prefix: Option<&str>) -> Command {
		if let Some(title) = &self.options.title {
			cmd = cmd.subcommand_help_heading(title.clone());
		}
		if let Some(name) = &self.options.value_name {
			cmd = cmd.subcommand_value_name(name.clone());
		}

		self.subcmds.iter().fold(
			cmd.subcommand_required(self.options.required),
			|cmd, sub| cmd.subcommand(sub.command(prefix)),
		)
	}
}

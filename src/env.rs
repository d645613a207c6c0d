/*!
# Declarg: Environment Variables.
*/

use std::fmt;



#[derive(Debug, Clone, Eq, Hash, PartialEq)]
/// # Environment Variable.
///
/// A name and a snapshot of its value, taken when the struct was created.
/// Later changes to the process environment are not reflected.
///
/// Values that are not valid UTF-8 are treated as unset.
///
/// ## Examples
///
/// ```
/// use declarg::EnvVar;
///
/// let var = EnvVar::new("DECLARG_DOC_NOPE");
/// assert_eq!(var.name(), "DECLARG_DOC_NOPE");
/// assert!(var.value().is_none());
/// ```
pub struct EnvVar {
	/// # Name.
	name: String,

	/// # Value.
	value: Option<String>,
}

impl fmt::Display for EnvVar {
	/// # Display.
	///
	/// This prints `NAME=value` when set, or just `NAME` when not.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.value {
			Some(v) => write!(f, "{}={v}", self.name),
			None => f.write_str(&self.name),
		}
	}
}

impl EnvVar {
	#[must_use]
	/// # New.
	///
	/// Look up `name` in the current process environment.
	pub fn new<S: Into<String>>(name: S) -> Self {
		let name = name.into();
		let value = std::env::var_os(&name).and_then(|v| v.into_string().ok());
		Self { name, value }
	}

	#[must_use]
	/// # With Value.
	///
	/// Create an instance with an explicit value, without consulting the
	/// environment.
	pub fn with_value<S: Into<String>>(name: S, value: Option<S>) -> Self {
		Self {
			name: name.into(),
			value: value.map(Into::into),
		}
	}

	#[must_use]
	/// # Name.
	pub fn name(&self) -> &str { &self.name }

	#[must_use]
	/// # Value.
	pub fn value(&self) -> Option<&str> { self.value.as_deref() }

	#[must_use]
	/// # Is Set?
	pub const fn is_set(&self) -> bool { self.value.is_some() }

	#[must_use]
	/// # Into Parts.
	pub fn into_parts(self) -> (String, Option<String>) { (self.name, self.value) }
}

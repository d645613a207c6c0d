/*!
# Declarg: Help Annotations.
*/



#[must_use]
/// # Annotate Help.
///
/// Append a parenthesized note to a help string. If the help already ends
/// with a parenthesized group, the note joins that group instead of starting
/// a new one.
///
/// ## Examples
///
/// ```
/// use declarg::annotate_help;
///
/// assert_eq!(
///     annotate_help("apply option", "required"),
///     "apply option (required)",
/// );
/// assert_eq!(
///     annotate_help("apply option (default: 1, env var: APP_OPT)", "required"),
///     "apply option (default: 1, env var: APP_OPT, required)",
/// );
/// ```
pub fn annotate_help(help: &str, annotation: &str) -> String {
	if let Some(inner) = help.strip_suffix(')') {
		// The group has to open on the same line it closes.
		let last = inner.rfind('\n').map_or(inner, |idx| &inner[idx + 1..]);
		if last.contains('(') {
			return format!("{inner}, {annotation})");
		}
	}

	format!("{help} ({annotation})")
}

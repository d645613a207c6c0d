/*!
# Declarg: Timestamps.
*/

use chrono::{
	DateTime,
	FixedOffset,
	ParseError,
};
use std::borrow::Cow;



/// # Timestamp Format.
const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";



/// # From ISO-8601.
///
/// Parse a `YYYY-MM-DDTHH:MM:SS±HHMM` timestamp. The UTC offset may also be
/// written with a colon, as in `+05:30`.
///
/// The signature matches what clap expects of a value parser, so this can be
/// passed straight to [`ArgSpec::with_value_parser`](crate::ArgSpec::with_value_parser).
///
/// ## Examples
///
/// ```
/// use chrono::{FixedOffset, TimeZone};
///
/// let parsed = declarg::from_iso("2000-01-01T12:34:56+00:00").unwrap();
/// let expected = FixedOffset::east_opt(0).unwrap()
///     .with_ymd_and_hms(2000, 1, 1, 12, 34, 56)
///     .unwrap();
/// assert_eq!(parsed, expected);
/// ```
///
/// ## Errors
///
/// This will return an error if the string is not a valid timestamp.
pub fn from_iso(src: &str) -> Result<DateTime<FixedOffset>, ParseError> {
	DateTime::parse_from_str(&normalize_offset(src), FORMAT)
}

/// # Normalize Offset.
///
/// Strip the colon from a trailing `:DD`.
fn normalize_offset(src: &str) -> Cow<'_, str> {
	if let [.., b':', a, b] = src.as_bytes() {
		if a.is_ascii_digit() && b.is_ascii_digit() {
			let len = src.len();
			let mut out = String::with_capacity(len - 1);
			out.push_str(&src[..len - 3]);
			out.push_str(&src[len - 2..]);
			return Cow::Owned(out);
		}
	}

	Cow::Borrowed(src)
}

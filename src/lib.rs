/*!
# Declarg

This crate provides a declarative layer over [clap](https://crates.io/crates/clap)'s
builder API: describe your arguments, subcommands, and environment-variable
fallbacks as plain data with [`CliSpec`], and let it sort out the parser,
the validation, and the help text.

The interesting bit is how defaults, `required`, and environment variables
interact. With an environment-variable prefix of, say, `APP`, an argument
`--foo-bar` may be supplied via `APP_FOO_BAR` instead:

* The variable's value, if set, replaces the declared default;
* An argument with a fallback of any kind (default or environment) is no longer required as far as clap is concerned, but [`CliSpec::validate`] still insists on a value;
* Help text is annotated with `(required)` and/or `(environment variable: APP_FOO_BAR)` as appropriate;

Parsing and coercion are otherwise left entirely to clap.



## Example

```
use declarg::{
    ArgKind,
    ArgSpec,
    CliSpec,
    GroupOptions,
    Parsed,
    SubcmdGroup,
    SubcmdSpec,
};

fn start(parsed: &Parsed) -> i32 {
    let port = parsed.get_one::<u16>("port").copied().unwrap_or_default();
    if port == 8080 { 0 } else { 1 }
}

fn stop(_: &Parsed) -> i32 { 0 }

let spec = CliSpec::new("svc")
    .with_envvar_prefix("DECLARG_DOC_SVC")
    .with_arg(
        ArgSpec::new(["-v", "--verbose"]).unwrap()
            .with_help("Say more.")
            .with_action(ArgKind::SetTrue)
    )
    .unwrap()
    .with_subcmds(
        SubcmdGroup::new(GroupOptions::default())
            .with_subcmds([
                SubcmdSpec::new("start", start).unwrap()
                    .with_arg(
                        ArgSpec::new(["--port"]).unwrap()
                            .with_default("80")
                            .with_value_parser(clap::value_parser!(u16))
                    )
                    .unwrap(),
                SubcmdSpec::new("stop", stop).unwrap(),
            ])
            .unwrap()
    );

let parsed = spec.try_parse_from(["svc", "-v", "start", "--port", "8080"]).unwrap();
assert!(parsed.get_flag("verbose"));
assert_eq!(parsed.subcmd(), Some("start"));
assert_eq!(parsed.dispatch(), Some(0));

// The help says where else the value might come from.
assert!(spec.format_help().contains("DECLARG_DOC_SVC_VERBOSE"));
```

Binaries will usually prefer [`CliSpec::parse`], which prints any error
(or help screen) and exits with the appropriate status code (`2` for bad
or missing input) instead of returning it.
*/

#![forbid(unsafe_code)]

#![deny(
	clippy::allow_attributes_without_reason,
	clippy::correctness,
	unreachable_pub,
)]

#![warn(
	clippy::complexity,
	clippy::nursery,
	clippy::pedantic,
	clippy::perf,
	clippy::style,

	clippy::allow_attributes,
	clippy::clone_on_ref_ptr,
	clippy::create_dir,
	clippy::filetype_is_file,
	clippy::format_push_string,
	clippy::get_unwrap,
	clippy::impl_trait_in_params,
	clippy::lossy_float_literal,
	clippy::missing_assert_message,
	clippy::missing_docs_in_private_items,
	clippy::needless_raw_strings,
	clippy::panic_in_result_fn,
	clippy::pub_without_shorthand,
	clippy::rest_pat_in_fully_bound_structs,
	clippy::semicolon_inside_block,
	clippy::str_to_string,
	clippy::string_to_string,
	clippy::todo,
	clippy::undocumented_unsafe_blocks,
	clippy::unneeded_field_pattern,
	clippy::unseparated_literal_suffix,
	clippy::unwrap_in_result,

	macro_use_extern_crate,
	missing_copy_implementations,
	missing_docs,
	non_ascii_idents,
	trivial_casts,
	trivial_numeric_casts,
	unused_crate_dependencies,
	unused_extern_crates,
	unused_import_braces,
)]

#![cfg_attr(docsrs, feature(doc_cfg))]



mod env;
mod error;
mod help;
mod key;
mod parsed;
mod spec;
mod time;

pub use env::EnvVar;
pub use error::{
	DeclargError,
	MissingArg,
};
pub use help::annotate_help;
pub use parsed::Parsed;
pub use spec::{
	arg::{
		ArgKind,
		ArgOptions,
		ArgSpec,
	},
	CliSpec,
	ParserOptions,
	subcmd::{
		GroupOptions,
		Handler,
		SubcmdGroup,
		SubcmdSpec,
	},
};
pub use time::from_iso;

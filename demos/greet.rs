/*!
# Declarg: Greet

This example greets somebody, or says goodbye.

The name may come from `--name` or the `GREET_NAME` environment variable:
```text
cargo run --example greet -- --name Alice hello --shout
GREET_NAME=Bob cargo run --example greet -- bye
```
*/

use declarg::{
	ArgKind,
	ArgSpec,
	CliSpec,
	GroupOptions,
	ParserOptions,
	Parsed,
	SubcmdGroup,
	SubcmdSpec,
};



fn main() {
	let spec = match spec() {
		Ok(s) => s,
		Err(e) => e.exit(),
	};

	let parsed = spec.parse();
	if ! parsed.unknown().is_empty() {
		eprintln!("\x1b[2mIgnored: {:?}\x1b[0m", parsed.unknown());
	}

	for (k, v) in spec.name_value_pairs(&parsed) {
		eprintln!("\x1b[2m{k}: {}\x1b[0m", v.map_or("-".into(), |v| v.to_string_lossy()));
	}

	std::process::exit(parsed.dispatch().unwrap_or(0));
}

/// # Hello.
fn hello(parsed: &Parsed) -> i32 {
	let name = parsed.get_one::<String>("name").map_or("stranger", String::as_str);
	let msg = format!("Hello, {name}!");
	if parsed.get_flag("shout") { println!("{}", msg.to_uppercase()); }
	else { println!("{msg}"); }
	0
}

/// # Bye.
fn bye(parsed: &Parsed) -> i32 {
	let name = parsed.get_one::<String>("name").map_or("stranger", String::as_str);
	let times = parsed.get_one::<u8>("times").copied().unwrap_or(1);
	for _ in 0..times { println!("Goodbye, {name}."); }
	0
}

/// # Specification.
fn spec() -> Result<CliSpec, declarg::DeclargError> {
	let group = SubcmdGroup::new(GroupOptions {
		title: Some("Greetings".to_owned()),
		required: true,
		..GroupOptions::default()
	})
		.with_subcmd(
			SubcmdSpec::new("hello", hello)?
				.with_parser(ParserOptions::default().with_about("Say hello."))
				.with_arg(
					ArgSpec::new(["-s", "--shout"])?
						.with_help("Say it louder.")
						.with_action(ArgKind::SetTrue)
				)?
		)?
		.with_subcmd(
			SubcmdSpec::new("bye", bye)?
				.with_parser(ParserOptions::default().with_about("Say goodbye."))
				.with_arg(
					ArgSpec::new(["-t", "--times"])?
						.with_help("How many times to say it.")
						.with_default("1")
						.with_value_parser(clap::value_parser!(u8))
				)?
		)?;

	Ok(
		CliSpec::new("greet")
			.with_parser(
				ParserOptions::default()
					.with_about("Greet somebody.")
					.with_version(env!("CARGO_PKG_VERSION"))
			)
			.with_envvar_prefix("GREET")
			.with_reject_unknown(false)
			.with_arg(
				ArgSpec::new(["-n", "--name"])?
					.with_help("Who to greet.")
					.with_required(true)
			)?
			.with_subcmds(group)
	)
}

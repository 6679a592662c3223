#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use optfield::field::{Codec, CodecKind, codec};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "optfield", about = "Inspect and merge JSON objects with absent/null/present field semantics")]
struct Cli {
	/// Codec used to encode present values.
	#[arg(long, global = true, default_value_t = CodecKind::Compact)]
	codec: CodecKind,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Report whether fields are absent, null, or present.
	Inspect(cmd::inspect::Args),
	/// Apply the fields carried by a patch document onto a base document.
	Merge(cmd::merge::Args),
}

fn main() {
	init_tracing();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> optfield::field::Result<()> {
	let cli = Cli::parse();
	codec::install(Codec::from_kind(cli.codec));

	match cli.command {
		Commands::Inspect(args) => cmd::inspect::run(args),
		Commands::Merge(args) => cmd::merge::run(args),
	}
}

fn init_tracing() {
	let filter = EnvFilter::try_from_env("OPTFIELD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(false).compact().init();
}

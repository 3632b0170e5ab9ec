//! `lode`: inspect lazily resolved namespaces from the command line.
//!
//! Works against a built-in namespace (`--namespace resources|library`) or a
//! TOML namespace config (`--config PATH`). Each invocation is a fresh process,
//! so `stats` reflects only the lookups made by that invocation.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use lode_assets::Builtin;
use lode_namespace::{Namespace, NamespaceConfig, Value};

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "lode", version)]
#[command(about = "Inspect lazily resolved symbol namespaces")]
struct Args {
	/// Namespace config file (TOML); overrides --namespace
	#[arg(short, long, value_name = "PATH", global = true)]
	config: Option<PathBuf>,

	/// Built-in namespace to inspect
	#[arg(short, long, value_name = "NAME", default_value = "resources", global = true)]
	namespace: Builtin,

	/// Verbose logging
	#[arg(short, long, global = true)]
	verbose: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
	/// List every symbol in the catalog
	List,
	/// Look up symbols and print their values
	Get {
		#[arg(required = true, value_name = "NAME")]
		names: Vec<String>,

		/// Print values as JSON
		#[arg(long)]
		json: bool,
	},
	/// Resolve the whole catalog and report failures
	All,
	/// Print cache statistics, after looking up any given names
	Stats {
		#[arg(value_name = "NAME")]
		names: Vec<String>,

		/// Print statistics as JSON
		#[arg(long)]
		json: bool,
	},
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
	let args = Args::parse();

	setup_tracing(args.verbose);

	let configured;
	let ns: &Namespace<Value> = match &args.config {
		Some(path) => {
			tracing::debug!(path = %path.display(), "cli.load_config");
			configured = NamespaceConfig::load(path)?.into_namespace()?;
			&configured
		}
		None => args.namespace.get(),
	};

	let stdout = io::stdout();
	let ok = run(ns, &args.command, &mut stdout.lock())?;
	Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Executes `command` against `ns`, writing results to `out` and lookup
/// failures to stderr. Returns whether every requested lookup succeeded.
fn run(ns: &Namespace<Value>, command: &Command, out: &mut impl Write) -> Result<bool, Box<dyn std::error::Error>> {
	let mut ok = true;

	match command {
		Command::List => {
			for name in ns.enumerate() {
				writeln!(out, "{name}")?;
			}
		}
		Command::Get { names, json: false } => {
			for name in names {
				match ns.lookup(name) {
					Ok(value) => writeln!(out, "{name} = {value}")?,
					Err(err) => {
						eprintln!("error: {err}");
						ok = false;
					}
				}
			}
		}
		Command::Get { names, json: true } => {
			let mut values = serde_json::Map::new();
			for name in names {
				match ns.lookup(name) {
					Ok(value) => {
						values.insert(name.clone(), serde_json::to_value(&*value)?);
					}
					Err(err) => {
						eprintln!("error: {err}");
						ok = false;
					}
				}
			}
			serde_json::to_writer_pretty(&mut *out, &values)?;
			writeln!(out)?;
		}
		Command::All => {
			let mut failed = 0usize;
			for (name, result) in ns.lookup_all() {
				match result {
					Ok(value) => writeln!(out, "{name}: {}", value.kind())?,
					Err(err) => {
						eprintln!("error: {err}");
						failed += 1;
					}
				}
			}
			let stats = ns.stats();
			writeln!(out, "resolved {}/{} symbols", stats.cached_count, stats.total_count)?;
			ok = failed == 0;
		}
		Command::Stats { names, json } => {
			for name in names {
				if let Err(err) = ns.lookup(name) {
					eprintln!("error: {err}");
					ok = false;
				}
			}
			let stats = ns.stats();
			if *json {
				serde_json::to_writer_pretty(&mut *out, &stats)?;
				writeln!(out)?;
			} else {
				write!(out, "{stats}")?;
			}
		}
	}

	Ok(ok)
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("lode=debug,lode_namespace=debug,lode_assets=debug,warn")
		} else {
			EnvFilter::new("warn")
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(io::stderr)
		.with_target(verbose)
		.init();
}

#[cfg(test)]
mod tests;

use pretty_assertions::assert_eq;

use super::*;

fn output(ns: &Namespace<Value>, command: Command) -> (bool, String) {
	let mut out = Vec::new();
	let ok = run(ns, &command, &mut out).unwrap();
	(ok, String::from_utf8(out).unwrap())
}

fn library() -> Namespace<Value> {
	Builtin::Library.fresh().unwrap()
}

#[test]
fn parses_global_flags_after_subcommand() {
	let args = Args::try_parse_from(["lode", "get", "VERSION", "--json", "-n", "library", "-v"]).unwrap();
	assert_eq!(args.namespace, Builtin::Library);
	assert!(args.verbose);
	assert_eq!(
		args.command,
		Command::Get {
			names: vec!["VERSION".to_string()],
			json: true,
		}
	);
}

#[test]
fn defaults_to_resources() {
	let args = Args::try_parse_from(["lode", "stats"]).unwrap();
	assert_eq!(args.namespace, Builtin::Resources);
	assert_eq!(args.config, None);
	assert_eq!(
		args.command,
		Command::Stats {
			names: Vec::new(),
			json: false,
		}
	);
}

#[test]
fn rejects_bad_arguments() {
	assert!(Args::try_parse_from(["lode", "get"]).is_err());
	assert!(Args::try_parse_from(["lode", "-n", "assets", "list"]).is_err());
}

#[test]
fn list_prints_catalog_in_order() {
	let (ok, out) = output(&library(), Command::List);
	assert!(ok);
	assert_eq!(out.lines().collect::<Vec<_>>(), lode_assets::library::CATALOG);
}

#[test]
fn get_reports_failures_without_stopping() {
	let ns = library();
	let (ok, out) = output(
		&ns,
		Command::Get {
			names: vec!["NOT_A_SYMBOL".to_string(), "VERSION".to_string()],
			json: false,
		},
	);
	assert!(!ok);
	assert_eq!(out, "VERSION = \"v2.0.0b20\"\n");
}

#[test]
fn get_json_prints_values() {
	let ns = library();
	let (ok, out) = output(
		&ns,
		Command::Get {
			names: vec!["MAP_ICON_SET_LIST".to_string()],
			json: true,
		},
	);
	assert!(ok);
	let json: serde_json::Value = serde_json::from_str(&out).unwrap();
	assert_eq!(json["MAP_ICON_SET_LIST"][0], "Dreame");
}

#[test]
fn stats_reflect_requested_lookups() {
	let ns = library();
	let (ok, out) = output(
		&ns,
		Command::Stats {
			names: vec!["VERSION".to_string(), "DreameVacuumState".to_string()],
			json: true,
		},
	);
	assert!(ok);
	let json: serde_json::Value = serde_json::from_str(&out).unwrap();
	assert_eq!(json["namespace"], "library");
	assert_eq!(json["cached_count"], 2);
	assert_eq!(json["backing_materialized"], true);
	assert_eq!(json["sources"][1]["id"], "types");
}

#[test]
fn all_resolves_the_library() {
	let ns = library();
	let (ok, out) = output(&ns, Command::All);
	assert!(ok);
	let total = lode_assets::library::CATALOG.len();
	assert_eq!(out.lines().last(), Some(format!("resolved {total}/{total} symbols").as_str()));
}

#[test]
fn config_namespace_reads_files() {
	let dir = tempfile::tempdir().unwrap();
	let config = dir.path().join("lode.toml");
	std::fs::write(
		&config,
		"name = \"local\"\nsymbols = [\"GREETING\", \"MISSING\"]\n\n[[source]]\nid = \"local\"\npath = \"symbols.toml\"\n",
	)
	.unwrap();
	std::fs::write(dir.path().join("symbols.toml"), "GREETING = \"hello\"\n").unwrap();

	let ns = NamespaceConfig::load(&config).unwrap().into_namespace().unwrap();
	let (ok, out) = output(&ns, Command::All);
	assert!(!ok);
	assert_eq!(out, "GREETING: string\nresolved 1/2 symbols\n");
}

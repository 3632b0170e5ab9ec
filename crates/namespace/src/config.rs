//! TOML namespace configuration.
//!
//! A config file declares a catalog and the file-backed sources that serve it,
//! highest priority first:
//!
//! ```toml
//! name = "assets"
//! symbols = ["MAP_FONT", "MAP_ICON_MOVE"]
//!
//! [[source]]
//! id = "overrides"
//! path = "overrides.toml"
//!
//! [[source]]
//! id = "bundle"
//! path = "/usr/share/lode/bundle.toml"
//! ```
//!
//! Relative source paths resolve against the directory of the config file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::BuildError;
use crate::namespace::Namespace;
use crate::source::TomlFileSource;
use crate::value::Value;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("failed to read config {path}: {error}")]
	Io {
		path: PathBuf,
		#[source]
		error: std::io::Error,
	},

	#[error("invalid namespace config: {0}")]
	Parse(#[from] toml::de::Error),

	#[error(transparent)]
	Build(#[from] BuildError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Declarative description of a file-backed namespace.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NamespaceConfig {
	pub name: String,
	pub symbols: Vec<String>,
	#[serde(default, rename = "source")]
	pub sources: Vec<SourceConfig>,
}

/// One file-backed source, in priority order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
	pub id: String,
	pub path: PathBuf,
}

impl NamespaceConfig {
	/// Parses a config document. Source paths are kept as written.
	pub fn parse(input: &str) -> Result<Self> {
		Ok(toml::from_str(input)?)
	}

	/// Loads a config file, resolving relative source paths against its directory.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		let mut config = Self::parse(&content)?;
		if let Some(base) = path.parent() {
			config.resolve_paths(base);
		}
		Ok(config)
	}

	/// Rebases every relative source path onto `base`.
	pub fn resolve_paths(&mut self, base: &Path) {
		for source in &mut self.sources {
			if source.path.is_relative() {
				source.path = base.join(&source.path);
			}
		}
	}

	/// Builds the namespace. No source file is read until the first lookup.
	pub fn into_namespace(self) -> Result<Namespace<Value>> {
		let mut builder = Namespace::builder(self.name).symbols(self.symbols);
		for source in self.sources {
			builder = builder.source(TomlFileSource::new(source.id, source.path));
		}
		Ok(builder.build()?)
	}
}

#[cfg(test)]
mod tests {
	use std::fs;

	use pretty_assertions::assert_eq;

	use super::*;

	const CONFIG: &str = r#"
name = "assets"
symbols = ["MAP_FONT", "MAP_ICON_MOVE", "SUCTION_LEVEL_QUIET"]

[[source]]
id = "overrides"
path = "overrides.toml"

[[source]]
id = "bundle"
path = "bundle.toml"
"#;

	#[test]
	fn parse_keeps_source_order() {
		let config = NamespaceConfig::parse(CONFIG).unwrap();
		assert_eq!(config.name, "assets");
		let ids: Vec<&str> = config.sources.iter().map(|s| s.id.as_str()).collect();
		assert_eq!(ids, ["overrides", "bundle"]);
		assert_eq!(config.sources[0].path, PathBuf::from("overrides.toml"));
	}

	#[test]
	fn unknown_fields_are_rejected() {
		let err = NamespaceConfig::parse("name = \"x\"\nsymbols = []\nlazy = false\n").unwrap_err();
		assert!(matches!(err, ConfigError::Parse(_)), "{err}");
	}

	#[test]
	fn load_resolves_relative_paths() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("lode.toml");
		fs::write(&path, CONFIG).unwrap();

		let config = NamespaceConfig::load(&path).unwrap();
		assert_eq!(config.sources[1].path, dir.path().join("bundle.toml"));
	}

	#[test]
	fn namespace_from_config_reads_files_lazily() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("lode.toml");
		fs::write(&path, CONFIG).unwrap();
		fs::write(dir.path().join("bundle.toml"), "MAP_FONT = \"base64:AAEAAA==\"\nMAP_ICON_MOVE = \"base64:iVBORw0K\"\n").unwrap();

		let ns = NamespaceConfig::load(&path).unwrap().into_namespace().unwrap();
		assert_eq!(ns.name(), "assets");
		assert!(!ns.stats().backing_materialized);

		// overrides.toml does not exist: the bundle still answers.
		let font = ns.lookup("MAP_FONT").unwrap();
		assert_eq!(font.as_bytes(), Some(&[0u8, 1, 0, 0][..]));
		assert_eq!(ns.source_of("MAP_FONT").as_deref(), Some("bundle"));

		let err = ns.lookup("SUCTION_LEVEL_QUIET").unwrap_err();
		assert_eq!(err.tried_sources(), ["overrides", "bundle"]);

		// Dropping in the missing overrides file takes effect on the next miss.
		fs::write(dir.path().join("overrides.toml"), "SUCTION_LEVEL_QUIET = 0\n").unwrap();
		assert_eq!(ns.lookup("SUCTION_LEVEL_QUIET").unwrap().as_int(), Some(0));
	}

	#[test]
	fn missing_config_is_an_io_error() {
		let dir = tempfile::tempdir().unwrap();
		let err = NamespaceConfig::load(dir.path().join("absent.toml")).unwrap_err();
		assert!(matches!(err, ConfigError::Io { .. }), "{err}");
	}

	#[test]
	fn duplicate_symbols_fail_to_build() {
		let config = NamespaceConfig::parse("name = \"x\"\nsymbols = [\"A\", \"A\"]\n").unwrap();
		assert!(matches!(config.into_namespace(), Err(ConfigError::Build(_))));
	}
}

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{BackingSource, SymbolTable};
use crate::error::SourceError;
use crate::value::Value;

/// Parses a TOML document of top-level `NAME = value` pairs into a table.
///
/// `origin` names the document in parse errors (a path or a bundle label).
pub fn parse_toml_table(origin: &str, text: &str) -> Result<SymbolTable<Value>, SourceError> {
	let document: toml::Table = toml::from_str(text).map_err(|error| SourceError::Parse {
		origin: origin.to_string(),
		error,
	})?;

	let mut table = SymbolTable::with_capacity(document.len());
	for (name, raw) in document {
		let value = Value::from_toml(&name, raw)?;
		table.insert(name, value);
	}
	Ok(table)
}

/// Source that reads a TOML symbol file from disk on materialization.
///
/// A missing or malformed file makes the source absent; the resolver falls
/// through to the next one.
pub struct TomlFileSource {
	id: Arc<str>,
	path: PathBuf,
}

impl TomlFileSource {
	pub fn new(id: impl Into<Arc<str>>, path: impl Into<PathBuf>) -> Self {
		Self {
			id: id.into(),
			path: path.into(),
		}
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl BackingSource<Value> for TomlFileSource {
	fn id(&self) -> &str {
		&self.id
	}

	fn load(&self) -> Result<SymbolTable<Value>, SourceError> {
		let text = std::fs::read_to_string(&self.path).map_err(|error| SourceError::Io {
			path: self.path.clone(),
			error,
		})?;
		parse_toml_table(&self.path.display().to_string(), &text)
	}
}

impl fmt::Debug for TomlFileSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TomlFileSource")
			.field("id", &self.id)
			.field("path", &self.path)
			.finish()
	}
}

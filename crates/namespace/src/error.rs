use std::path::PathBuf;
use std::sync::Arc;

use crate::symbol::{CatalogError, SymbolName};
use crate::value::ValueError;

/// Why a backing source failed to materialize.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
	#[error("failed to read {path}: {error}")]
	Io {
		path: PathBuf,
		#[source]
		error: std::io::Error,
	},

	#[error("failed to parse {origin}: {error}")]
	Parse {
		origin: String,
		#[source]
		error: toml::de::Error,
	},

	#[error(transparent)]
	Value(#[from] ValueError),

	#[error("{0}")]
	Message(String),
}

impl SourceError {
	pub fn message(msg: impl Into<String>) -> Self {
		Self::Message(msg.into())
	}
}

/// A source that could not be materialized during one resolution.
///
/// Recovered locally by the resolver; only visible inside
/// [`LookupError::SymbolUnavailable`].
#[derive(Debug, Clone, thiserror::Error)]
#[error("source '{source_id}' unavailable: {cause}")]
pub struct SourceUnavailable {
	pub source_id: Arc<str>,
	pub cause: Arc<SourceError>,
}

/// User-visible lookup failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LookupError {
	/// The name is not part of the namespace catalog.
	#[error("namespace '{namespace}' has no symbol '{name}'")]
	UnknownSymbol { namespace: Arc<str>, name: SymbolName },

	/// Every source was tried and none produced the symbol.
	#[error("symbol '{name}' unavailable (tried: {})", .tried.join(", "))]
	SymbolUnavailable {
		name: SymbolName,
		tried: Vec<Arc<str>>,
		failures: Vec<SourceUnavailable>,
	},

	/// The resolution this lookup joined panicked before publishing a result.
	#[error("resolution of '{name}' aborted")]
	Aborted { name: SymbolName },
}

impl LookupError {
	pub fn name(&self) -> &SymbolName {
		match self {
			LookupError::UnknownSymbol { name, .. } | LookupError::SymbolUnavailable { name, .. } | LookupError::Aborted { name } => name,
		}
	}

	pub fn is_unknown(&self) -> bool {
		matches!(self, LookupError::UnknownSymbol { .. })
	}

	pub fn is_unavailable(&self) -> bool {
		matches!(self, LookupError::SymbolUnavailable { .. })
	}

	/// Source ids consulted before giving up, in priority order.
	pub fn tried_sources(&self) -> Vec<&str> {
		match self {
			LookupError::SymbolUnavailable { tried, .. } => tried.iter().map(|id| &**id).collect(),
			_ => Vec::new(),
		}
	}
}

/// Namespace construction failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
	#[error(transparent)]
	Catalog(#[from] CatalogError),

	#[error("duplicate source id: {0}")]
	DuplicateSource(Arc<str>),
}

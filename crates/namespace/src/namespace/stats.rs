use std::fmt;

use serde::Serialize;

use crate::source::SourceStatus;

/// Snapshot of a namespace's cache and source state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamespaceStats {
	pub namespace: String,
	/// Symbols currently cached.
	pub cached_count: usize,
	/// Symbols in the catalog.
	pub total_count: usize,
	/// Share of counted lookups answered from the cache (`0.0` before any lookup).
	pub hit_ratio: f64,
	/// Share of the catalog currently cached.
	pub coverage: f64,
	pub hits: u64,
	pub misses: u64,
	/// Whether any backing source currently holds a materialized table.
	pub backing_materialized: bool,
	pub sources: Vec<SourceStatus>,
}

pub(super) fn ratio(part: u64, whole: u64) -> f64 {
	if whole == 0 { 0.0 } else { part as f64 / whole as f64 }
}

impl fmt::Display for NamespaceStats {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(
			f,
			"namespace {}: {}/{} cached ({:.1}%), hit ratio {:.1}% ({} hits, {} misses)",
			self.namespace,
			self.cached_count,
			self.total_count,
			self.coverage * 100.0,
			self.hit_ratio * 100.0,
			self.hits,
			self.misses,
		)?;
		for source in &self.sources {
			writeln!(
				f,
				"  source {}: {} ({} loads, {} failures)",
				source.id,
				if source.materialized { "materialized" } else { "not loaded" },
				source.materializations,
				source.failures,
			)?;
		}
		Ok(())
	}
}

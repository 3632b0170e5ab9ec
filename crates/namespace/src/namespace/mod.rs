//! Namespace façade: the single entry point for symbol lookups.
//!
//! # Mental Model
//!
//! 1. **Catalog check:** names outside the catalog fail with
//!    [`LookupError::UnknownSymbol`] before any source is touched.
//! 2. **Cache:** a cached resolution is returned as the same `Arc` every time.
//! 3. **Single-flight:** on a miss, one caller per name resolves; concurrent
//!    callers for that name join its result.
//! 4. **Resolver:** sources are materialized at most once each and consulted in
//!    priority order.
//!
//! # Invariants
//!
//! - Cached names are a subset of the catalog.
//!   - Enforced in: [`Namespace::lookup`] (catalog check precedes resolution).
//!   - Tested by: `tests::unknown_symbol_never_materializes`
//! - A cached value never changes until evicted.
//!   - Enforced in: `SymbolCache::insert` (first insert wins).
//!   - Tested by: `tests::memoized_lookup_returns_same_allocation`
//! - Cache eviction and source release are independent.
//!   - Tested by: `tests::release_sources_keeps_cache`

mod stats;

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashSet;
pub use stats::NamespaceStats;

use crate::cache::SymbolCache;
use crate::error::{BuildError, LookupError};
use crate::flight::FlightGroup;
use crate::resolver::Resolver;
use crate::source::{BackingSource, SourceHandle};
use crate::symbol::{Catalog, SymbolName};

/// Lazily resolved, memoized view over an ordered list of backing sources.
pub struct Namespace<V> {
	name: Arc<str>,
	catalog: Catalog,
	resolver: Resolver<V>,
	cache: SymbolCache<V>,
	flights: FlightGroup<Result<Arc<V>, LookupError>>,
}

impl<V> Namespace<V>
where
	V: Send + Sync + 'static,
{
	pub fn builder(name: impl Into<Arc<str>>) -> NamespaceBuilder<V> {
		NamespaceBuilder::new(name)
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Resolves `name`, loading backing sources on first use.
	///
	/// # Errors
	///
	/// - [`LookupError::UnknownSymbol`] if `name` is not in the catalog.
	/// - [`LookupError::SymbolUnavailable`] if no source defines it.
	/// - [`LookupError::Aborted`] if the resolution this call joined panicked.
	pub fn lookup(&self, name: &str) -> Result<Arc<V>, LookupError> {
		let Some(symbol) = self.catalog.get(name) else {
			return Err(LookupError::UnknownSymbol {
				namespace: Arc::clone(&self.name),
				name: SymbolName::new(name),
			});
		};

		if let Some(value) = self.cache.get(name) {
			return Ok(value);
		}

		self.flights
			.run(symbol, || {
				// A previous leader may have populated the cache while we queued.
				if let Some(value) = self.cache.peek(name) {
					return Ok(value);
				}
				let resolution = self.resolver.resolve(symbol)?;
				Ok(self.cache.insert(symbol.clone(), resolution))
			})
			.unwrap_or_else(|| Err(LookupError::Aborted { name: symbol.clone() }))
	}

	/// Like [`Self::lookup`], discarding the error.
	pub fn get(&self, name: &str) -> Option<Arc<V>> {
		self.lookup(name).ok()
	}

	/// Looks up every catalog entry in declaration order.
	///
	/// Bulk access stays lazy per name: it performs exactly the lookups a caller
	/// iterating [`Self::enumerate`] would, so each source still materializes at
	/// most once.
	pub fn lookup_all(&self) -> Vec<(SymbolName, Result<Arc<V>, LookupError>)> {
		self.catalog
			.iter()
			.map(|symbol| (symbol.clone(), self.lookup(symbol.as_str())))
			.collect()
	}

	/// The complete catalog in declaration order.
	pub fn enumerate(&self) -> &[SymbolName] {
		self.catalog.names()
	}

	pub fn catalog(&self) -> &Catalog {
		&self.catalog
	}

	pub fn contains(&self, name: &str) -> bool {
		self.catalog.contains(name)
	}

	pub fn is_cached(&self, name: &str) -> bool {
		self.cache.contains(name)
	}

	/// Names currently cached, in catalog order.
	pub fn cached_names(&self) -> Vec<SymbolName> {
		self.catalog
			.iter()
			.filter(|symbol| self.cache.contains(symbol.as_str()))
			.cloned()
			.collect()
	}

	/// Id of the source a cached symbol was resolved from.
	pub fn source_of(&self, name: &str) -> Option<Arc<str>> {
		self.cache.source_of(name)
	}

	/// Source ids in priority order.
	pub fn source_ids(&self) -> Vec<&str> {
		self.resolver.sources().iter().map(|handle| &**handle.id()).collect()
	}

	/// Evicts one cached symbol, or all of them when `name` is `None`.
	///
	/// Returns the number of entries removed. The catalog and any materialized
	/// sources are left alone.
	pub fn evict(&self, name: Option<&str>) -> usize {
		match name {
			Some(name) => {
				let evicted = usize::from(self.cache.remove(name));
				tracing::debug!(namespace = %self.name, symbol = name, evicted, "namespace.evict");
				evicted
			}
			None => {
				let evicted = self.cache.clear();
				tracing::info!(namespace = %self.name, evicted, "namespace.evict");
				evicted
			}
		}
	}

	/// Drops every materialized source table; returns how many were held.
	///
	/// Cached symbols stay cached. The next cache miss materializes again.
	pub fn release_sources(&self) -> usize {
		let released = self.resolver.release_all();
		tracing::info!(namespace = %self.name, released, "namespace.release_sources");
		released
	}

	pub fn stats(&self) -> NamespaceStats {
		let cached_count = self.cache.len();
		let total_count = self.catalog.len();
		let hits = self.cache.hits();
		let misses = self.cache.misses();
		let sources: Vec<_> = self.resolver.sources().iter().map(SourceHandle::status).collect();

		NamespaceStats {
			namespace: self.name.to_string(),
			cached_count,
			total_count,
			hit_ratio: stats::ratio(hits, hits + misses),
			coverage: stats::ratio(cached_count as u64, total_count as u64),
			hits,
			misses,
			backing_materialized: self.resolver.any_materialized(),
			sources,
		}
	}
}

impl<V> fmt::Debug for Namespace<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Namespace")
			.field("name", &self.name)
			.field("symbols", &self.catalog.len())
			.field("sources", &self.resolver.sources().len())
			.finish_non_exhaustive()
	}
}

/// Collects a catalog and prioritized sources for a [`Namespace`].
pub struct NamespaceBuilder<V> {
	name: Arc<str>,
	symbols: Vec<String>,
	sources: Vec<Arc<dyn BackingSource<V>>>,
}

impl<V> NamespaceBuilder<V>
where
	V: Send + Sync + 'static,
{
	pub fn new(name: impl Into<Arc<str>>) -> Self {
		Self {
			name: name.into(),
			symbols: Vec::new(),
			sources: Vec::new(),
		}
	}

	pub fn symbol(mut self, name: impl Into<String>) -> Self {
		self.symbols.push(name.into());
		self
	}

	pub fn symbols<I, S>(mut self, names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.symbols.extend(names.into_iter().map(Into::into));
		self
	}

	/// Appends a source below every source added so far.
	pub fn source(self, source: impl BackingSource<V> + 'static) -> Self {
		self.shared_source(Arc::new(source))
	}

	pub fn shared_source(mut self, source: Arc<dyn BackingSource<V>>) -> Self {
		self.sources.push(source);
		self
	}

	/// Validates the catalog and source ids. Never loads a source.
	pub fn build(self) -> Result<Namespace<V>, BuildError> {
		let catalog = Catalog::new(&self.symbols)?;

		let mut seen = FxHashSet::default();
		for source in &self.sources {
			if !seen.insert(source.id()) {
				return Err(BuildError::DuplicateSource(Arc::from(source.id())));
			}
		}

		tracing::debug!(
			namespace = %self.name,
			symbols = catalog.len(),
			sources = self.sources.len(),
			"namespace.build"
		);

		let handles = self.sources.into_iter().map(SourceHandle::new).collect();
		Ok(Namespace {
			name: self.name,
			catalog,
			resolver: Resolver::new(handles),
			cache: SymbolCache::new(),
			flights: FlightGroup::new(),
		})
	}
}

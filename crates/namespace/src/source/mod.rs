//! Backing sources and their materialized symbol tables.
//!
//! A [`BackingSource`] only knows how to produce a [`SymbolTable`]; it is
//! allowed to be slow and to fail. Memoizing that work is the job of the
//! [`SourceHandle`] the resolver wraps around every source.

mod file;
mod handle;

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

pub use file::{TomlFileSource, parse_toml_table};
pub use handle::{SourceHandle, SourceStatus};
use rustc_hash::FxHashMap;

use crate::error::SourceError;

/// Provider of symbol values.
///
/// `load` is the raw, possibly expensive routine. It may be called again after
/// a failure or after the owning handle was released, so it must not assume it
/// runs only once.
pub trait BackingSource<V>: Send + Sync {
	/// Stable identifier reported in errors and stats.
	fn id(&self) -> &str;

	/// Produces every symbol this source defines.
	fn load(&self) -> Result<SymbolTable<V>, SourceError>;
}

/// Materialized contents of one backing source.
pub struct SymbolTable<V> {
	entries: FxHashMap<Box<str>, Arc<V>>,
}

impl<V> SymbolTable<V> {
	pub fn new() -> Self {
		Self {
			entries: FxHashMap::default(),
		}
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			entries: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
		}
	}

	/// Inserts a value, returning the one it replaced.
	pub fn insert(&mut self, name: impl Into<Box<str>>, value: V) -> Option<Arc<V>> {
		self.entries.insert(name.into(), Arc::new(value))
	}

	/// Inserts an already shared value.
	pub fn insert_shared(&mut self, name: impl Into<Box<str>>, value: Arc<V>) -> Option<Arc<V>> {
		self.entries.insert(name.into(), value)
	}

	#[inline]
	pub fn get(&self, name: &str) -> Option<&Arc<V>> {
		self.entries.get(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.entries.contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Defined names, in no particular order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(|name| &**name)
	}
}

impl<V> Default for SymbolTable<V> {
	fn default() -> Self {
		Self::new()
	}
}

impl<V> fmt::Debug for SymbolTable<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SymbolTable").field("len", &self.entries.len()).finish()
	}
}

impl<K: Into<Box<str>>, V> FromIterator<(K, V)> for SymbolTable<V> {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut table = SymbolTable::new();
		for (name, value) in iter {
			table.insert(name, value);
		}
		table
	}
}

/// Source backed by an in-process loader closure.
///
/// Used for embedded data: the closure typically decodes a blob compiled into
/// the binary.
pub struct StaticSource<V, F> {
	id: Arc<str>,
	loader: F,
	_marker: PhantomData<fn() -> V>,
}

impl<V, F> StaticSource<V, F>
where
	F: Fn() -> Result<SymbolTable<V>, SourceError> + Send + Sync,
{
	pub fn new(id: impl Into<Arc<str>>, loader: F) -> Self {
		Self {
			id: id.into(),
			loader,
			_marker: PhantomData,
		}
	}
}

impl<V, F> BackingSource<V> for StaticSource<V, F>
where
	F: Fn() -> Result<SymbolTable<V>, SourceError> + Send + Sync,
{
	fn id(&self) -> &str {
		&self.id
	}

	fn load(&self) -> Result<SymbolTable<V>, SourceError> {
		(self.loader)()
	}
}

impl<V, F> fmt::Debug for StaticSource<V, F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("StaticSource").field("id", &self.id).finish_non_exhaustive()
	}
}

//! Memoized resolutions keyed by symbol.
//!
//! Entries are only ever inserted from successful resolutions and never
//! overwritten while present: the first inserted resolution of a name is the
//! authoritative one until it is evicted.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::resolver::Resolution;
use crate::symbol::SymbolName;

pub(crate) struct SymbolCache<V> {
	entries: RwLock<FxHashMap<SymbolName, Resolution<V>>>,
	hits: AtomicU64,
	misses: AtomicU64,
}

impl<V> SymbolCache<V> {
	pub(crate) fn new() -> Self {
		Self {
			entries: RwLock::new(FxHashMap::default()),
			hits: AtomicU64::new(0),
			misses: AtomicU64::new(0),
		}
	}

	/// Returns the cached value and counts the hit or miss.
	#[inline]
	pub(crate) fn get(&self, name: &str) -> Option<Arc<V>> {
		let found = self.peek(name);
		let counter = if found.is_some() { &self.hits } else { &self.misses };
		counter.fetch_add(1, Ordering::Relaxed);
		found
	}

	/// Returns the cached value without touching the counters.
	#[inline]
	pub(crate) fn peek(&self, name: &str) -> Option<Arc<V>> {
		self.entries.read().get(name).map(|entry| Arc::clone(&entry.value))
	}

	/// Stores a resolution unless one is already cached, and returns the
	/// value that is cached afterwards.
	pub(crate) fn insert(&self, name: SymbolName, resolution: Resolution<V>) -> Arc<V> {
		let mut entries = self.entries.write();
		let entry = entries.entry(name).or_insert(resolution);
		Arc::clone(&entry.value)
	}

	pub(crate) fn source_of(&self, name: &str) -> Option<Arc<str>> {
		self.entries.read().get(name).map(|entry| Arc::clone(&entry.source_id))
	}

	pub(crate) fn contains(&self, name: &str) -> bool {
		self.entries.read().contains_key(name)
	}

	pub(crate) fn remove(&self, name: &str) -> bool {
		self.entries.write().remove(name).is_some()
	}

	/// Drops every entry; returns how many there were.
	pub(crate) fn clear(&self) -> usize {
		let mut entries = self.entries.write();
		let count = entries.len();
		entries.clear();
		count
	}

	pub(crate) fn len(&self) -> usize {
		self.entries.read().len()
	}

	pub(crate) fn hits(&self) -> u64 {
		self.hits.load(Ordering::Relaxed)
	}

	pub(crate) fn misses(&self) -> u64 {
		self.misses.load(Ordering::Relaxed)
	}
}

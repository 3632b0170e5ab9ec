//! Materialize-once handle around a backing source.
//!
//! # Invariants
//!
//! - A successful load is published once and reused until [`SourceHandle::release`].
//!   - Enforced in: [`SourceHandle::materialize`] (double-checked under `gate`).
//!   - Failure symptom: a heavy blob decoded more than once per process.
//! - A failed load is never memoized; the next caller retries.
//! - Readers of an already materialized table never take `gate`.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use arc_swap::ArcSwapOption;
use parking_lot::Mutex;
use serde::Serialize;

use super::{BackingSource, SymbolTable};
use crate::error::SourceError;

/// Point-in-time view of one source handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceStatus {
	pub id: String,
	pub materialized: bool,
	/// Successful loads over the handle's lifetime.
	pub materializations: u64,
	/// Failed loads over the handle's lifetime.
	pub failures: u64,
}

/// Lazily materialized, shared view of one [`BackingSource`].
pub struct SourceHandle<V> {
	id: Arc<str>,
	source: Arc<dyn BackingSource<V>>,
	table: ArcSwapOption<SymbolTable<V>>,
	gate: Mutex<()>,
	materializations: AtomicU64,
	failures: AtomicU64,
}

impl<V> SourceHandle<V>
where
	V: Send + Sync + 'static,
{
	pub fn new(source: Arc<dyn BackingSource<V>>) -> Self {
		Self {
			id: Arc::from(source.id()),
			source,
			table: ArcSwapOption::empty(),
			gate: Mutex::new(()),
			materializations: AtomicU64::new(0),
			failures: AtomicU64::new(0),
		}
	}

	pub fn id(&self) -> &Arc<str> {
		&self.id
	}

	pub fn is_materialized(&self) -> bool {
		self.table.load().is_some()
	}

	/// Returns the materialized table, loading the source on first use.
	///
	/// Concurrent first callers serialize on the handle's gate; exactly one of
	/// them runs [`BackingSource::load`] and the rest observe its table.
	pub fn materialize(&self) -> Result<Arc<SymbolTable<V>>, SourceError> {
		if let Some(table) = self.table.load_full() {
			return Ok(table);
		}

		let _gate = self.gate.lock();
		// Another caller may have finished loading while we waited.
		if let Some(table) = self.table.load_full() {
			return Ok(table);
		}

		let started = Instant::now();
		match self.source.load() {
			Ok(table) => {
				let table = Arc::new(table);
				self.table.store(Some(Arc::clone(&table)));
				self.materializations.fetch_add(1, Ordering::Relaxed);
				tracing::debug!(
					source = %self.id,
					symbols = table.len(),
					elapsed_us = started.elapsed().as_micros() as u64,
					"namespace.materialize"
				);
				Ok(table)
			}
			Err(error) => {
				self.failures.fetch_add(1, Ordering::Relaxed);
				tracing::warn!(source = %self.id, %error, "namespace.source_failed");
				Err(error)
			}
		}
	}

	/// Drops the materialized table. Returns whether one was held.
	pub fn release(&self) -> bool {
		let _gate = self.gate.lock();
		let released = self.table.swap(None).is_some();
		if released {
			tracing::debug!(source = %self.id, "namespace.release");
		}
		released
	}

	pub fn status(&self) -> SourceStatus {
		SourceStatus {
			id: self.id.to_string(),
			materialized: self.is_materialized(),
			materializations: self.materializations.load(Ordering::Relaxed),
			failures: self.failures.load(Ordering::Relaxed),
		}
	}
}

impl<V> fmt::Debug for SourceHandle<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SourceHandle")
			.field("id", &self.id)
			.field("materialized", &self.table.load().is_some())
			.finish_non_exhaustive()
	}
}

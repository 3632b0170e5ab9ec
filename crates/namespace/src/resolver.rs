//! Ordered fallback resolution across backing sources.
//!
//! # Precedence Contract
//!
//! Sources are consulted strictly in declaration order. The first source that
//! materializes and defines the name wins; later sources are not consulted even
//! if they define it too. A source that fails to materialize is skipped and its
//! failure recorded.

use std::sync::Arc;

use crate::error::{LookupError, SourceUnavailable};
use crate::source::SourceHandle;
use crate::symbol::SymbolName;

/// A successfully resolved symbol and the source that supplied it.
#[derive(Debug)]
pub struct Resolution<V> {
	pub value: Arc<V>,
	pub source_id: Arc<str>,
}

impl<V> Clone for Resolution<V> {
	fn clone(&self) -> Self {
		Self {
			value: Arc::clone(&self.value),
			source_id: Arc::clone(&self.source_id),
		}
	}
}

/// Priority-ordered list of source handles.
#[derive(Debug)]
pub struct Resolver<V> {
	sources: Box<[SourceHandle<V>]>,
}

impl<V> Resolver<V> {
	pub fn new(sources: Vec<SourceHandle<V>>) -> Self {
		Self {
			sources: sources.into_boxed_slice(),
		}
	}

	pub fn sources(&self) -> &[SourceHandle<V>] {
		&self.sources
	}
}

impl<V> Resolver<V>
where
	V: Send + Sync + 'static,
{

	/// Resolves `name` against the sources in priority order.
	pub fn resolve(&self, name: &SymbolName) -> Result<Resolution<V>, LookupError> {
		let mut failures = Vec::new();

		for handle in self.sources.iter() {
			let table = match handle.materialize() {
				Ok(table) => table,
				Err(cause) => {
					failures.push(SourceUnavailable {
						source_id: Arc::clone(handle.id()),
						cause: Arc::new(cause),
					});
					continue;
				}
			};

			if let Some(value) = table.get(name.as_str()) {
				tracing::trace!(symbol = %name, source = %handle.id(), "namespace.resolve");
				return Ok(Resolution {
					value: Arc::clone(value),
					source_id: Arc::clone(handle.id()),
				});
			}
		}

		Err(LookupError::SymbolUnavailable {
			name: name.clone(),
			tried: self.sources.iter().map(|handle| Arc::clone(handle.id())).collect(),
			failures,
		})
	}

	/// True once any source has been materialized.
	pub fn any_materialized(&self) -> bool {
		self.sources.iter().any(SourceHandle::is_materialized)
	}

	/// Releases every materialized source; returns how many were held.
	pub fn release_all(&self) -> usize {
		self.sources.iter().filter(|handle| handle.release()).count()
	}
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::{AtomicUsize, Ordering};

	use super::*;
	use crate::error::SourceError;
	use crate::source::{BackingSource, StaticSource, SymbolTable};

	fn handle(id: &'static str, entries: &'static [(&'static str, i64)]) -> SourceHandle<i64> {
		SourceHandle::new(Arc::new(StaticSource::<i64, _>::new(id, move || Ok(entries.iter().copied().collect()))))
	}

	struct Absent;

	impl BackingSource<i64> for Absent {
		fn id(&self) -> &str {
			"absent"
		}

		fn load(&self) -> Result<SymbolTable<i64>, SourceError> {
			Err(SourceError::message("not installed"))
		}
	}

	#[test]
	fn first_source_defining_name_wins() {
		let resolver = Resolver::new(vec![handle("S1", &[("A", 1)]), handle("S2", &[("A", 2), ("B", 3)])]);

		let a = resolver.resolve(&"A".into()).unwrap();
		assert_eq!((*a.value, &*a.source_id), (1, "S1"));

		let b = resolver.resolve(&"B".into()).unwrap();
		assert_eq!((*b.value, &*b.source_id), (3, "S2"));
	}

	#[test]
	fn short_circuit_leaves_lower_sources_untouched() {
		let loads = Arc::new(AtomicUsize::new(0));
		let counter = Arc::clone(&loads);
		let lower = SourceHandle::new(Arc::new(StaticSource::<i64, _>::new("lower", move || {
			counter.fetch_add(1, Ordering::SeqCst);
			Ok(SymbolTable::new())
		})));
		let resolver = Resolver::new(vec![handle("upper", &[("A", 1)]), lower]);

		resolver.resolve(&"A".into()).unwrap();
		assert_eq!(loads.load(Ordering::SeqCst), 0);
		assert!(!resolver.sources()[1].is_materialized());
	}

	#[test]
	fn absent_source_falls_through() {
		let resolver = Resolver::new(vec![SourceHandle::new(Arc::new(Absent)), handle("types", &[("X", 7)])]);

		let x = resolver.resolve(&"X".into()).unwrap();
		assert_eq!(*x.value, 7);
		assert_eq!(&*x.source_id, "types");
	}

	#[test]
	fn exhaustion_reports_tried_sources_and_failures() {
		let resolver = Resolver::new(vec![SourceHandle::new(Arc::new(Absent)), handle("types", &[])]);

		let err = resolver.resolve(&"X".into()).unwrap_err();
		assert_eq!(err.tried_sources(), ["absent", "types"]);
		let LookupError::SymbolUnavailable { failures, .. } = err else {
			panic!("expected SymbolUnavailable");
		};
		assert_eq!(failures.len(), 1);
		assert_eq!(&*failures[0].source_id, "absent");
	}
}

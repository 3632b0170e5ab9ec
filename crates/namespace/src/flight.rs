//! Per-key single-flight coordination for synchronous work.
//!
//! # Protocol
//!
//! 1. The first caller for a key becomes the leader and registers a [`Flight`].
//! 2. Callers arriving while the flight is registered become followers and
//!    block on the flight's condvar.
//! 3. The leader runs the work, publishes the result, wakes followers and
//!    removes the flight so later callers start fresh.
//! 4. If the leader unwinds, its guard publishes `Aborted` so followers never
//!    hang.

use std::sync::Arc;

use parking_lot::{Condvar, Mutex};
use rustc_hash::FxHashMap;

use crate::symbol::SymbolName;

enum FlightState<T> {
	Pending,
	Done(T),
	Aborted,
}

struct Flight<T> {
	state: Mutex<FlightState<T>>,
	ready: Condvar,
	#[cfg(test)]
	followers: std::sync::atomic::AtomicUsize,
}

impl<T: Clone> Flight<T> {
	fn new() -> Self {
		Self {
			state: Mutex::new(FlightState::Pending),
			ready: Condvar::new(),
			#[cfg(test)]
			followers: std::sync::atomic::AtomicUsize::new(0),
		}
	}

	fn wait(&self) -> Option<T> {
		#[cfg(test)]
		self.followers.fetch_add(1, std::sync::atomic::Ordering::SeqCst);

		let mut state = self.state.lock();
		loop {
			match &*state {
				FlightState::Pending => self.ready.wait(&mut state),
				FlightState::Done(value) => return Some(value.clone()),
				FlightState::Aborted => return None,
			}
		}
	}

	fn publish(&self, state: FlightState<T>) {
		*self.state.lock() = state;
		self.ready.notify_all();
	}
}

/// Deduplicates concurrent work per symbol.
pub(crate) struct FlightGroup<T> {
	inflight: Mutex<FxHashMap<SymbolName, Arc<Flight<T>>>>,
}

impl<T: Clone> FlightGroup<T> {
	pub(crate) fn new() -> Self {
		Self {
			inflight: Mutex::new(FxHashMap::default()),
		}
	}

	/// Runs `work` for `key` unless another caller already is, in which case
	/// this call waits for and returns that caller's result.
	///
	/// Returns `None` only when the leader this call joined unwound.
	pub(crate) fn run<F>(&self, key: &SymbolName, work: F) -> Option<T>
	where
		F: FnOnce() -> T,
	{
		let (flight, is_leader) = {
			let mut inflight = self.inflight.lock();
			match inflight.get(key) {
				Some(flight) => (Arc::clone(flight), false),
				None => {
					let flight = Arc::new(Flight::new());
					inflight.insert(key.clone(), Arc::clone(&flight));
					(flight, true)
				}
			}
		};

		if !is_leader {
			return flight.wait();
		}

		let guard = LeaderGuard {
			group: self,
			key,
			flight: &flight,
			completed: false,
		};
		let result = work();
		guard.complete(result.clone());
		Some(result)
	}

	fn forget(&self, key: &SymbolName) {
		self.inflight.lock().remove(key);
	}

	#[cfg(test)]
	fn followers(&self, key: &SymbolName) -> usize {
		self.inflight
			.lock()
			.get(key)
			.map_or(0, |flight| flight.followers.load(std::sync::atomic::Ordering::SeqCst))
	}
}

/// Publishes the leader's outcome exactly once, including on unwind.
struct LeaderGuard<'a, T: Clone> {
	group: &'a FlightGroup<T>,
	key: &'a SymbolName,
	flight: &'a Flight<T>,
	completed: bool,
}

impl<T: Clone> LeaderGuard<'_, T> {
	fn complete(mut self, value: T) {
		self.completed = true;
		self.flight.publish(FlightState::Done(value));
		self.group.forget(self.key);
	}
}

impl<T: Clone> Drop for LeaderGuard<'_, T> {
	fn drop(&mut self) {
		if self.completed {
			return;
		}
		tracing::warn!(symbol = %self.key, "namespace.flight_aborted");
		self.flight.publish(FlightState::Aborted);
		self.group.forget(self.key);
	}
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::{AtomicUsize, Ordering};
	use std::sync::mpsc;
	use std::thread;

	use super::*;

	fn wait_for_followers(group: &FlightGroup<u32>, key: &SymbolName, n: usize) {
		while group.followers(key) < n {
			thread::yield_now();
		}
	}

	#[test]
	fn followers_share_leader_result() {
		let group = &FlightGroup::<u32>::new();
		let key = &SymbolName::new("MAP_FONT");
		let runs = &AtomicUsize::new(0);
		let (release_tx, release_rx) = mpsc::channel::<()>();

		thread::scope(|s| {
			let leader = s.spawn(move || {
				group.run(key, || {
					runs.fetch_add(1, Ordering::SeqCst);
					release_rx.recv().unwrap();
					42
				})
			});
			while group.inflight.lock().is_empty() {
				thread::yield_now();
			}

			let followers: Vec<_> = (0..3)
				.map(|_| s.spawn(move || group.run(key, || unreachable!("follower must not run work"))))
				.collect();
			wait_for_followers(group, key, 3);
			release_tx.send(()).unwrap();

			assert_eq!(leader.join().unwrap(), Some(42));
			for follower in followers {
				assert_eq!(follower.join().unwrap(), Some(42));
			}
		});

		assert_eq!(runs.load(Ordering::SeqCst), 1);
		assert!(group.inflight.lock().is_empty());
	}

	#[test]
	fn panicking_leader_aborts_followers() {
		let group = &FlightGroup::<u32>::new();
		let key = &SymbolName::new("MAP_FONT");
		let (release_tx, release_rx) = mpsc::channel::<()>();

		thread::scope(|s| {
			let leader = s.spawn(move || {
				group.run(key, || {
					release_rx.recv().unwrap();
					panic!("decode failed");
				})
			});
			while group.inflight.lock().is_empty() {
				thread::yield_now();
			}

			let follower = s.spawn(move || group.run(key, || 7));
			wait_for_followers(group, key, 1);
			release_tx.send(()).unwrap();

			assert!(leader.join().is_err());
			assert_eq!(follower.join().unwrap(), None);
		});

		// The aborted flight is gone; the next caller leads a fresh one.
		assert_eq!(group.run(key, || 9), Some(9));
	}
}

//! Built-in namespaces.
//!
//! - [`resources()`]: map images, icon sets and fonts from one embedded bundle.
//! - [`library()`]: device constants with enumeration fallback.
//!
//! Both accessors return process-wide instances that are built on first call
//! and never load data until a symbol is looked up. [`Builtin`] selects one by
//! name.

pub mod library;
pub mod resources;

use std::fmt;
use std::str::FromStr;

pub use library::library;
use lode_namespace::{BuildError, Namespace, Value};
pub use resources::resources;

/// The built-in namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
	Resources,
	Library,
}

impl Builtin {
	pub const ALL: [Builtin; 2] = [Builtin::Resources, Builtin::Library];

	pub fn name(self) -> &'static str {
		match self {
			Builtin::Resources => resources::NAME,
			Builtin::Library => library::NAME,
		}
	}

	/// The process-wide instance.
	pub fn get(self) -> &'static Namespace<Value> {
		match self {
			Builtin::Resources => resources(),
			Builtin::Library => library(),
		}
	}

	/// A fresh instance with its own cache.
	pub fn fresh(self) -> Result<Namespace<Value>, BuildError> {
		match self {
			Builtin::Resources => resources::new_namespace(),
			Builtin::Library => library::new_namespace(),
		}
	}
}

impl fmt::Display for Builtin {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown built-in namespace '{0}' (expected resources or library)")]
pub struct UnknownBuiltin(pub String);

impl FromStr for Builtin {
	type Err = UnknownBuiltin;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Builtin::ALL
			.into_iter()
			.find(|builtin| builtin.name() == s)
			.ok_or_else(|| UnknownBuiltin(s.to_string()))
	}
}

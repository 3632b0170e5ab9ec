//! Lazily resolved, memoized symbol namespaces.
//!
//! A [`Namespace`] exposes a fixed [`Catalog`] of names backed by one or more
//! [`BackingSource`]s. Nothing is loaded when the namespace is built; the first
//! lookup of a name materializes sources in priority order until one defines
//! it, and the result is cached for every later lookup.
//!
//! ```
//! use lode_namespace::{Namespace, StaticSource, SymbolTable};
//!
//! let ns = Namespace::builder("demo")
//! 	.symbols(["ANSWER", "MISSING"])
//! 	.source(StaticSource::<i32, _>::new("builtin", || Ok(SymbolTable::from_iter([("ANSWER", 42)]))))
//! 	.build()
//! 	.unwrap();
//!
//! assert_eq!(*ns.lookup("ANSWER").unwrap(), 42);
//! assert!(ns.lookup("MISSING").unwrap_err().is_unavailable());
//! assert!(ns.lookup("OTHER").unwrap_err().is_unknown());
//! ```
//!
//! # Modules
//!
//! - [`symbol`]: symbol names and catalogs.
//! - [`source`]: the backing source trait, materialize-once handles and the
//!   TOML file source.
//! - [`resolver`]: ordered fallback across sources.
//! - [`namespace`]: the lookup façade, eviction and statistics.
//! - [`config`]: building file-backed namespaces from TOML config.
//! - [`value`]: the dynamic value type used by data-driven sources.

mod cache;
pub mod config;
pub mod error;
mod flight;
pub mod namespace;
pub mod resolver;
pub mod source;
pub mod symbol;
pub mod value;

pub use config::{ConfigError, NamespaceConfig, SourceConfig};
pub use error::{BuildError, LookupError, SourceError, SourceUnavailable};
pub use namespace::{Namespace, NamespaceBuilder, NamespaceStats};
pub use resolver::{Resolution, Resolver};
pub use source::{BackingSource, SourceHandle, SourceStatus, StaticSource, SymbolTable, TomlFileSource, parse_toml_table};
pub use symbol::{Catalog, CatalogError, SymbolName};
pub use value::{BASE64_PREFIX, Value, ValueError};

//! Symbol names and the authoritative namespace catalog.
//!
//! A [`Catalog`] is fixed when a namespace is built. It answers membership in
//! O(1) and enumerates names in declaration order, independent of whether any
//! value has been resolved yet.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

/// Immutable symbol identifier, shared between the catalog and the cache.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolName(Arc<str>);

impl SymbolName {
	pub fn new(name: impl AsRef<str>) -> Self {
		Self(Arc::from(name.as_ref()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Borrow<str> for SymbolName {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl AsRef<str> for SymbolName {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl fmt::Debug for SymbolName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&*self.0, f)
	}
}

impl fmt::Display for SymbolName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for SymbolName {
	fn from(name: &str) -> Self {
		Self::new(name)
	}
}

impl From<String> for SymbolName {
	fn from(name: String) -> Self {
		Self(Arc::from(name))
	}
}

impl PartialEq<str> for SymbolName {
	fn eq(&self, other: &str) -> bool {
		&*self.0 == other
	}
}

impl PartialEq<&str> for SymbolName {
	fn eq(&self, other: &&str) -> bool {
		&*self.0 == *other
	}
}

/// Catalog construction failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
	#[error("empty symbol name at position {index}")]
	Empty { index: usize },
	#[error("duplicate symbol name: {name}")]
	Duplicate { name: SymbolName },
}

/// Fixed, ordered, duplicate-free set of names a namespace can serve.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
	names: Box<[SymbolName]>,
	index: FxHashMap<SymbolName, usize>,
}

impl Catalog {
	/// Builds a catalog, preserving declaration order.
	pub fn new<I, S>(names: I) -> Result<Self, CatalogError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut ordered = Vec::new();
		let mut index = FxHashMap::default();

		for (position, raw) in names.into_iter().enumerate() {
			let raw = raw.as_ref();
			if raw.is_empty() {
				return Err(CatalogError::Empty { index: position });
			}
			let name = SymbolName::new(raw);
			if index.insert(name.clone(), position).is_some() {
				return Err(CatalogError::Duplicate { name });
			}
			ordered.push(name);
		}

		Ok(Self {
			names: ordered.into_boxed_slice(),
			index,
		})
	}

	/// Returns every name in declaration order.
	pub fn names(&self) -> &[SymbolName] {
		&self.names
	}

	/// Returns the catalog's shared copy of `name`, if it is a member.
	#[inline]
	pub fn get(&self, name: &str) -> Option<&SymbolName> {
		self.index.get(name).map(|&position| &self.names[position])
	}

	#[inline]
	pub fn contains(&self, name: &str) -> bool {
		self.index.contains_key(name)
	}

	/// Declaration position of `name`.
	pub fn position(&self, name: &str) -> Option<usize> {
		self.index.get(name).copied()
	}

	pub fn len(&self) -> usize {
		self.names.len()
	}

	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, SymbolName> {
		self.names.iter()
	}
}

impl<'a> IntoIterator for &'a Catalog {
	type Item = &'a SymbolName;
	type IntoIter = std::slice::Iter<'a, SymbolName>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

/// Declares a static symbol list plus one `&str` constant per name.
///
/// The generated constants give call sites a checked spelling
/// (`ns.lookup(MAP_FONT)`) instead of free-form string literals.
///
/// ```
/// lode_namespace::symbol_catalog! {
/// 	pub ICONS { MAP_ICON_MOVE, MAP_ICON_DELETE }
/// }
///
/// assert_eq!(ICONS, &["MAP_ICON_MOVE", "MAP_ICON_DELETE"]);
/// assert_eq!(MAP_ICON_DELETE, "MAP_ICON_DELETE");
/// ```
#[macro_export]
macro_rules! symbol_catalog {
	(
		$(#[$attr:meta])*
		$vis:vis $catalog:ident { $($name:ident),* $(,)? }
	) => {
		$(#[$attr])*
		$vis const $catalog: &[&str] = &[$(stringify!($name)),*];

		$(
			#[allow(non_upper_case_globals)]
			$vis const $name: &str = stringify!($name);
		)*
	};
}

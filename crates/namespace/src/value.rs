//! Dynamic value model for data-driven namespaces.
//!
//! Data files describe symbols as TOML. Strings carrying the [`BASE64_PREFIX`]
//! are binary payloads (images, fonts) and decode to [`Value::Bytes`] while the
//! owning source materializes.

use std::fmt;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// Marks a string as a base64 encoded binary payload.
pub const BASE64_PREFIX: &str = "base64:";

/// A resolved symbol value of arbitrary shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Bool(bool),
	Int(i64),
	Float(f64),
	Str(Arc<str>),
	Bytes(Arc<[u8]>),
	List(Vec<Value>),
	Map(IndexMap<String, Value>),
}

/// Conversion failure, tagged with the dotted key path of the offending value.
#[derive(Debug, thiserror::Error)]
pub enum ValueError {
	#[error("invalid base64 payload at '{path}': {error}")]
	Base64 {
		path: String,
		#[source]
		error: base64::DecodeError,
	},
}

impl Value {
	/// Short type label used in listings and error messages.
	pub fn kind(&self) -> &'static str {
		match self {
			Value::Bool(_) => "bool",
			Value::Int(_) => "int",
			Value::Float(_) => "float",
			Value::Str(_) => "string",
			Value::Bytes(_) => "bytes",
			Value::List(_) => "list",
			Value::Map(_) => "map",
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Bool(b) => Some(*b),
			_ => None,
		}
	}

	pub fn as_int(&self) -> Option<i64> {
		match self {
			Value::Int(i) => Some(*i),
			_ => None,
		}
	}

	pub fn as_float(&self) -> Option<f64> {
		match self {
			Value::Float(f) => Some(*f),
			Value::Int(i) => Some(*i as f64),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::Str(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_bytes(&self) -> Option<&[u8]> {
		match self {
			Value::Bytes(b) => Some(b),
			_ => None,
		}
	}

	pub fn as_list(&self) -> Option<&[Value]> {
		match self {
			Value::List(items) => Some(items),
			_ => None,
		}
	}

	pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
		match self {
			Value::Map(map) => Some(map),
			_ => None,
		}
	}

	/// Looks up a key when this value is a map.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.as_map()?.get(key)
	}

	/// Converts a parsed TOML value rooted at `path`.
	pub fn from_toml(path: &str, value: toml::Value) -> Result<Self, ValueError> {
		Ok(match value {
			toml::Value::String(s) => match s.strip_prefix(BASE64_PREFIX) {
				Some(payload) => {
					let bytes = STANDARD.decode(payload.trim()).map_err(|error| ValueError::Base64 {
						path: path.to_string(),
						error,
					})?;
					Value::Bytes(Arc::from(bytes))
				}
				None => Value::Str(Arc::from(s)),
			},
			toml::Value::Integer(i) => Value::Int(i),
			toml::Value::Float(f) => Value::Float(f),
			toml::Value::Boolean(b) => Value::Bool(b),
			toml::Value::Datetime(dt) => Value::Str(Arc::from(dt.to_string())),
			toml::Value::Array(items) => Value::List(
				items
					.into_iter()
					.enumerate()
					.map(|(i, item)| Value::from_toml(&format!("{path}[{i}]"), item))
					.collect::<Result<_, _>>()?,
			),
			toml::Value::Table(table) => Value::Map(
				table
					.into_iter()
					.map(|(key, item)| {
						let child = format!("{path}.{key}");
						Ok((key, Value::from_toml(&child, item)?))
					})
					.collect::<Result<_, ValueError>>()?,
			),
		})
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Bool(b) => write!(f, "{b}"),
			Value::Int(i) => write!(f, "{i}"),
			Value::Float(x) => write!(f, "{x}"),
			Value::Str(s) => write!(f, "{s:?}"),
			Value::Bytes(b) => write!(f, "<{} bytes>", b.len()),
			Value::List(items) => {
				f.write_str("[")?;
				for (i, item) in items.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{item}")?;
				}
				f.write_str("]")
			}
			Value::Map(map) => {
				f.write_str("{")?;
				for (i, (key, item)) in map.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{key}: {item}")?;
				}
				f.write_str("}")
			}
		}
	}
}

impl Serialize for Value {
	/// Bytes serialize back into their `base64:` string form.
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Value::Bool(b) => serializer.serialize_bool(*b),
			Value::Int(i) => serializer.serialize_i64(*i),
			Value::Float(f) => serializer.serialize_f64(*f),
			Value::Str(s) => serializer.serialize_str(s),
			Value::Bytes(bytes) => serializer.serialize_str(&format!("{BASE64_PREFIX}{}", STANDARD.encode(bytes))),
			Value::List(items) => serializer.collect_seq(items),
			Value::Map(map) => serializer.collect_map(map),
		}
	}
}

impl From<i64> for Value {
	fn from(i: i64) -> Self {
		Value::Int(i)
	}
}

impl From<bool> for Value {
	fn from(b: bool) -> Self {
		Value::Bool(b)
	}
}

impl From<&str> for Value {
	fn from(s: &str) -> Self {
		Value::Str(Arc::from(s))
	}
}

impl From<Vec<u8>> for Value {
	fn from(bytes: Vec<u8>) -> Self {
		Value::Bytes(Arc::from(bytes))
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn parse(input: &str) -> toml::Value {
		toml::Value::Table(toml::from_str::<toml::Table>(input).unwrap())
	}

	#[test]
	fn base64_strings_decode_to_bytes() {
		let value = Value::from_toml("root", parse("icon = \"base64:iVBORw0K\"\nlabel = \"plain\"")).unwrap();
		assert_eq!(value.get("icon").and_then(Value::as_bytes), Some(&b"\x89PNG\r\n"[..]));
		assert_eq!(value.get("label").and_then(Value::as_str), Some("plain"));
	}

	#[test]
	fn invalid_base64_reports_key_path() {
		let err = Value::from_toml("root", parse("[icons]\nbroken = \"base64:%%%\"")).unwrap_err();
		let ValueError::Base64 { path, .. } = err;
		assert_eq!(path, "root.icons.broken");
	}

	#[test]
	fn nested_values_convert() {
		let value = Value::from_toml("root", parse("levels = [1, 2, 3]\nquiet = true\nratio = 0.5")).unwrap();
		assert_eq!(value.get("levels"), Some(&Value::List(vec![1.into(), 2.into(), 3.into()])));
		assert_eq!(value.get("quiet").and_then(Value::as_bool), Some(true));
		assert_eq!(value.get("ratio").and_then(Value::as_float), Some(0.5));
	}

	#[test]
	fn display_summarizes_binary_payloads() {
		let value = Value::Map(IndexMap::from([
			("name".to_string(), Value::from("font")),
			("data".to_string(), Value::from(vec![0u8; 4])),
		]));
		assert_eq!(value.to_string(), "{name: \"font\", data: <4 bytes>}");
	}

	#[test]
	fn serializes_bytes_as_base64_strings() {
		let value = Value::Map(IndexMap::from([
			("icon".to_string(), Value::from(b"\x89PNG\r\n".to_vec())),
			("levels".to_string(), Value::List(vec![0.into(), 1.into()])),
		]));
		let json = serde_json::to_string(&value).unwrap();
		assert_eq!(json, r#"{"icon":"base64:iVBORw0K","levels":[0,1]}"#);
	}
}

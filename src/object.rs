//! Base abstractions shared by every entity kind.
//!
//! Two capabilities underpin the whole object model:
//!
//! - [`JsonRecord`]: construction from a raw JSON mapping (or JSON text) and
//!   serialization back, with every undeclared key preserved verbatim in an
//!   [`ExtraFields`] map. Declared fields are plain struct fields; extras are
//!   looked up explicitly.
//! - [`TypedList`]: an ordered, index-addressable wrapper that turns a raw
//!   JSON array into a sequence of a declared element type, preserving order
//!   and length.
//!
//! Construction is strict about shape: a record rejects anything that is not
//! a JSON object, a list rejects anything that is not a JSON array. Field
//! errors inside a decode carry best-effort JSON path context along with the
//! entity kind being built.

use std::ops::{Deref, Index, Range};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Undeclared JSON keys carried by an entity, preserved verbatim for
/// forward compatibility with schema extensions.
pub type ExtraFields = serde_json::Map<String, Value>;

/// Checked lookup over an entity's extras map.
///
/// Declared fields are plain struct fields; this is the error-raising path
/// for the undeclared ones.
pub trait ExtraFieldsExt {
    /// The extra field `name`, failing with a lookup error if it was never
    /// set.
    fn require(&self, name: &str) -> Result<&Value>;
}

impl ExtraFieldsExt for ExtraFields {
    fn require(&self, name: &str) -> Result<&Value> {
        self.get(name)
            .ok_or_else(|| Error::lookup(format!("extra field `{name}` was never set")))
    }
}

/// Name of the JSON shape a value has, for error messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Decode `value` into `T`, tracking the JSON path of any field error.
pub(crate) fn decode<T: DeserializeOwned>(kind: &'static str, value: &Value) -> Result<T> {
    match serde_path_to_error::deserialize(value) {
        Ok(decoded) => Ok(decoded),
        Err(err) => {
            let path = err.path().to_string();
            let source = err.into_inner();
            let path = if path.is_empty() || path == "." {
                "<root>"
            } else {
                path.as_str()
            };
            Err(Error::structural(kind, format!("{path}: {source}")))
        }
    }
}

// =============================================================================
// JsonRecord
// =============================================================================

/// A JSON-backed entity: constructible from a raw mapping or JSON text,
/// serializable back to JSON with every field (declared and extra) intact.
///
/// Non-ASCII text round-trips literally; the Korean surface forms in the
/// corpus are never `\u`-escaped on output.
pub trait JsonRecord: Serialize + DeserializeOwned {
    /// Entity kind name used in error context (e.g. `"sentence"`).
    const KIND: &'static str;

    /// Construct from a raw JSON value.
    ///
    /// Fails with a type error if the value is not a JSON object, and with a
    /// structural error (carrying the JSON path) if a required field is
    /// absent or malformed.
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Object(_) => decode(Self::KIND, value),
            other => Err(Error::expected(Self::KIND, "object", json_kind(other))),
        }
    }

    /// Parse `text` as JSON, then construct as [`JsonRecord::from_value`].
    fn from_json_text(text: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(text).map_err(|err| Error::parse(Self::KIND, err))?;
        Self::from_value(&value)
    }

    /// Serialize back to a raw JSON value.
    fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|err| Error::structural(Self::KIND, err))
    }

    /// Serialize to UTF-8 JSON text. Non-ASCII characters are emitted
    /// literally, never escaped.
    fn to_json_text(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|err| Error::structural(Self::KIND, err))
    }
}

// =============================================================================
// TypedList
// =============================================================================

/// An ordered sequence of a declared element type, built from a raw JSON
/// array one element per raw entry, in order.
///
/// The capability set is `{length, indexed access, iteration}`; there is no
/// mutation API, and the type deliberately does not implement `Clone`:
/// re-wrapping or duplicating an already-typed list is unsupported, so the
/// misuse is unrepresentable rather than a runtime failure.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypedList<T> {
    items: Vec<T>,
}

impl<T: JsonRecord> TypedList<T> {
    /// Construct from a raw JSON array, one element per entry.
    ///
    /// Fails with a type error if `value` is not an array; element errors
    /// carry the element index.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Array(entries) => {
                let mut items = Vec::with_capacity(entries.len());
                for (index, entry) in entries.iter().enumerate() {
                    let item =
                        T::from_value(entry).map_err(|err| Error::element(T::KIND, index, err))?;
                    items.push(item);
                }
                Ok(Self { items })
            }
            other => Err(Error::expected(T::KIND, "array", json_kind(other))),
        }
    }
}

impl<T> TypedList<T> {
    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Element at `index`, or `None` out of bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Iterate over the elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Consume the list, yielding its elements.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    pub(crate) fn items_mut(&mut self) -> &mut [T] {
        &mut self.items
    }
}

impl<T> Default for TypedList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> From<Vec<T>> for TypedList<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> Deref for TypedList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> Index<usize> for TypedList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a TypedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for TypedList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

// =============================================================================
// Span
// =============================================================================

/// A record covering a character interval `[begin, end)` of a sentence form.
///
/// Offsets are character indices (not bytes); Korean surface forms make the
/// distinction load-bearing.
pub trait Span {
    /// Start character offset (inclusive).
    fn begin(&self) -> usize;

    /// End character offset (exclusive).
    fn end(&self) -> usize;

    /// The covered interval as a range.
    fn range(&self) -> Range<usize> {
        self.begin()..self.end()
    }

    /// Whether `position` falls inside the covered interval.
    fn contains(&self, position: usize) -> bool {
        self.range().contains(&position)
    }

    /// The interval formatted as `begin:end`.
    fn range_str(&self) -> String {
        format!("{}:{}", self.begin(), self.end())
    }
}

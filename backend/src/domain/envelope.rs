//! Repository response envelopes and item normalisation.
//!
//! Successful responses wrap their payload as `{ "data": ..., "meta": ... }`.
//! Items arrive either flat (`{ "id": 1, "slug": "home" }`) or with their
//! fields nested under `attributes`, and relations may be wrapped in a
//! `{ "data": ... }` object. [`normalize_item`] flattens both shapes so the
//! content kinds only ever decode the flat form. Null-valued fields are
//! dropped so empty relations fall back to field defaults.

use pagination::PaginationMeta;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Success envelope before item decoding.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    /// Required; `null` is meaningful but absence is malformed.
    pub(crate) data: Value,
    #[serde(default)]
    pub(crate) meta: Option<EnvelopeMeta>,
}

/// `meta` object of a success envelope.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct EnvelopeMeta {
    #[serde(default)]
    pub(crate) pagination: Option<PaginationMeta>,
}

/// Error envelope returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    #[serde(default)]
    pub(crate) error: Option<ErrorBody>,
}

/// Repository-supplied error description.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub(crate) message: Option<String>,
    #[serde(default)]
    pub(crate) details: Option<Value>,
}

/// Sequence of decoded items plus the repository's pagination metadata.
///
/// Pagination metadata is informational; the client does not enforce it.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentList<T> {
    items: Vec<T>,
    pagination: Option<PaginationMeta>,
}

impl<T> ContentList<T> {
    /// Wrap decoded items.
    pub fn new(items: Vec<T>, pagination: Option<PaginationMeta>) -> Self {
        Self { items, pagination }
    }

    /// Decoded items in result order.
    pub fn items(&self) -> &[T] {
        self.items.as_slice()
    }

    /// Consume the list, returning the items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Pagination metadata reported by the repository.
    pub fn pagination(&self) -> Option<&PaginationMeta> {
        self.pagination.as_ref()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Return `true` when the list holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the items.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub(crate) fn items_mut(&mut self) -> &mut Vec<T> {
        &mut self.items
    }
}

impl<T> IntoIterator for ContentList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Flatten `attributes` objects, unwrap `{ "data": ... }` relation
/// wrappers and drop null fields, recursively.
pub(crate) fn normalize_item(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_item).collect()),
        Value::Object(object) => normalize_object(object),
        other => other,
    }
}

fn normalize_object(mut object: Map<String, Value>) -> Value {
    if is_relation_wrapper(&object) {
        let inner = object.remove("data").unwrap_or(Value::Null);
        return normalize_item(inner);
    }

    if let Some(Value::Object(attributes)) = object.remove("attributes") {
        for (key, value) in attributes {
            object.entry(key).or_insert(value);
        }
    }

    Value::Object(
        object
            .into_iter()
            .map(|(key, value)| (key, normalize_item(value)))
            .filter(|(_, value)| !value.is_null())
            .collect(),
    )
}

fn is_relation_wrapper(object: &Map<String, Value>) -> bool {
    object.contains_key("data") && object.keys().all(|key| key == "data" || key == "meta")
}

//! In-memory content repository speaking the transport port.
//!
//! [`InMemoryContentRepository`] answers requests the way the real
//! repository would for the directives the client emits: `filters[..][$eq]`
//! and `filters[..][$lte]`, `sort[i]=field:dir`, `pagination[start]` and
//! `pagination[limit]`. `populate` directives are accepted and ignored since
//! seeded items already carry their relations. Every request is recorded so
//! tests can assert on call counts and emitted query pairs.

use std::cmp::Ordering;
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value, json};

use crate::domain::FilterOperator;
use crate::domain::ports::{
    ContentTransport, TransportError, TransportMethod, TransportRequest, TransportResponse,
};

#[derive(Debug, Default)]
struct State {
    collections: BTreeMap<String, Vec<Value>>,
    singletons: BTreeMap<String, Value>,
    scripted: VecDeque<Result<TransportResponse, TransportError>>,
    requests: Vec<TransportRequest>,
    next_id: u64,
}

/// Content repository double serving seeded items from memory.
#[derive(Debug, Default)]
pub struct InMemoryContentRepository {
    state: Mutex<State>,
    wrap_attributes: bool,
}

impl InMemoryContentRepository {
    /// Empty repository answering with flat items.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty repository answering with items nested under `attributes`.
    pub fn wrapped() -> Self {
        Self {
            wrap_attributes: true,
            ..Self::default()
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add flat `items` to the collection served at `path`.
    pub fn seed(&self, path: &str, items: impl IntoIterator<Item = Value>) {
        self.state()
            .collections
            .entry(path.to_owned())
            .or_default()
            .extend(items);
    }

    /// Serve `item` as the singleton at `path`.
    pub fn seed_singleton(&self, path: &str, item: Value) {
        self.state().singletons.insert(path.to_owned(), item);
    }

    /// Answer the next request with `outcome` instead of the seeded data.
    pub fn script(&self, outcome: Result<TransportResponse, TransportError>) {
        self.state().scripted.push_back(outcome);
    }

    /// Answer the next request with `status` and a repository error body.
    pub fn fail_next(&self, status: u16, message: &str, details: Value) {
        self.script(Ok(TransportResponse::json(
            status,
            &json!({
                "data": null,
                "error": { "status": status, "name": "Error", "message": message, "details": details }
            }),
        )));
    }

    /// Number of requests received.
    pub fn call_count(&self) -> usize {
        self.state().requests.len()
    }

    /// Every request received, oldest first.
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.state().requests.clone()
    }

    /// Bodies of every `POST` received at `path`.
    pub fn posted(&self, path: &str) -> Vec<Value> {
        self.state()
            .requests
            .iter()
            .filter(|request| request.method == TransportMethod::Post && request.path == path)
            .filter_map(|request| request.body.clone())
            .collect()
    }

    fn answer(&self, request: &TransportRequest) -> TransportResponse {
        let mut state = self.state();
        match request.method {
            TransportMethod::Get => {
                if let Some(item) = state.singletons.get(&request.path) {
                    return TransportResponse::json(
                        200,
                        &json!({ "data": self.present(item.clone()), "meta": {} }),
                    );
                }
                let Some(items) = state.collections.get(&request.path) else {
                    return not_found();
                };
                let (page, total, start, limit) = query_items(items, &request.query);
                let data: Vec<Value> = page.into_iter().map(|item| self.present(item)).collect();
                TransportResponse::json(
                    200,
                    &json!({
                        "data": data,
                        "meta": { "pagination": { "start": start, "limit": limit, "total": total } }
                    }),
                )
            }
            TransportMethod::Post => {
                if !state.collections.contains_key(&request.path) {
                    return not_found();
                }
                state.next_id += 1;
                let id = state.next_id;
                let mut fields = request
                    .body
                    .as_ref()
                    .and_then(|body| body.get("data"))
                    .and_then(Value::as_object)
                    .cloned()
                    .unwrap_or_default();
                fields.insert("id".to_owned(), json!(id));
                let stored = Value::Object(fields);
                if let Some(collection) = state.collections.get_mut(&request.path) {
                    collection.push(stored.clone());
                }
                TransportResponse::json(200, &json!({ "data": self.present(stored), "meta": {} }))
            }
        }
    }

    fn present(&self, item: Value) -> Value {
        if !self.wrap_attributes {
            return item;
        }
        match item {
            Value::Object(mut object) => {
                let id = object.remove("id").unwrap_or(Value::Null);
                let attributes: Map<String, Value> = object
                    .into_iter()
                    .map(|(key, value)| (key, wrap_relation(value)))
                    .collect();
                json!({ "id": id, "attributes": attributes })
            }
            other => other,
        }
    }
}

fn wrap_relation(value: Value) -> Value {
    match value {
        Value::Object(_) => json!({ "data": value }),
        Value::Array(items) if items.iter().all(Value::is_object) && !items.is_empty() => {
            json!({ "data": items })
        }
        other => other,
    }
}

fn not_found() -> TransportResponse {
    TransportResponse::json(
        404,
        &json!({
            "data": null,
            "error": { "status": 404, "name": "NotFoundError", "message": "Not Found", "details": {} }
        }),
    )
}

#[async_trait]
impl ContentTransport for InMemoryContentRepository {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let scripted = {
            let mut state = self.state();
            state.requests.push(request.clone());
            state.scripted.pop_front()
        };
        match scripted {
            Some(outcome) => outcome,
            None => Ok(self.answer(&request)),
        }
    }
}

struct ParsedFilter {
    path: Vec<String>,
    operator: FilterOperator,
    value: String,
}

fn parse_filter(key: &str, value: &str) -> Option<ParsedFilter> {
    let inner = key.strip_prefix("filters[")?.strip_suffix(']')?;
    let mut segments: Vec<String> = inner.split("][").map(str::to_owned).collect();
    let operator = FilterOperator::parse(segments.pop()?.as_str())?;
    Some(ParsedFilter {
        path: segments,
        operator,
        value: value.to_owned(),
    })
}

fn query_items(
    items: &[Value],
    query: &[(String, String)],
) -> (Vec<Value>, usize, usize, usize) {
    let filters: Vec<ParsedFilter> = query
        .iter()
        .filter_map(|(key, value)| parse_filter(key, value))
        .collect();
    let mut matched: Vec<Value> = items
        .iter()
        .filter(|item| filters.iter().all(|filter| matches_filter(item, filter)))
        .cloned()
        .collect();

    let mut sorts: Vec<(&str, &str)> = query
        .iter()
        .filter(|(key, _)| key.starts_with("sort["))
        .filter_map(|(_, value)| value.split_once(':'))
        .collect();
    sorts.reverse();
    for (field, direction) in sorts {
        matched.sort_by(|left, right| {
            let ordering = compare_values(left.get(field), right.get(field));
            if direction == "desc" {
                ordering.reverse()
            } else {
                ordering
            }
        });
    }

    let total = matched.len();
    let number = |name: &str| {
        query
            .iter()
            .find(|(key, _)| key == name)
            .and_then(|(_, value)| value.parse::<usize>().ok())
    };
    let start = number("pagination[start]").unwrap_or(0);
    let limit = number("pagination[limit]").unwrap_or(25);
    let page = matched.into_iter().skip(start).take(limit).collect();
    (page, total, start, limit)
}

fn matches_filter(item: &Value, filter: &ParsedFilter) -> bool {
    candidates(item, &filter.path)
        .iter()
        .any(|candidate| match filter.operator {
            FilterOperator::Eq => scalar_text(candidate).is_some_and(|text| text == filter.value),
            FilterOperator::Lte => {
                compare_values(Some(candidate), Some(&Value::String(filter.value.clone())))
                    != Ordering::Greater
                    && !candidate.is_null()
            }
        })
}

/// Values reached by following `path`, fanning out across arrays.
fn candidates<'a>(value: &'a Value, path: &[String]) -> Vec<&'a Value> {
    let Some((head, rest)) = path.split_first() else {
        return vec![value];
    };
    match value {
        Value::Array(items) => items
            .iter()
            .flat_map(|item| candidates(item, path))
            .collect(),
        Value::Object(object) => object
            .get(head)
            .map(|next| candidates(next, rest))
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn compare_values(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    match (left, right) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(a)), Some(Value::String(b))) => {
            match (
                a.parse::<DateTime<Utc>>(),
                b.parse::<DateTime<Utc>>(),
            ) {
                (Ok(a), Ok(b)) => a.cmp(&b),
                _ => a.cmp(b),
            }
        }
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn filters_parse_nested_paths() {
        let filter = parse_filter("filters[tags][name][$eq]", "brand").expect("parses");
        assert_eq!(filter.path, vec!["tags".to_owned(), "name".to_owned()]);
        assert_eq!(filter.operator, FilterOperator::Eq);
    }

    #[rstest]
    fn lte_filters_exclude_missing_timestamps() {
        let filter = parse_filter("filters[publishedAt][$lte]", "2024-05-01T12:00:00.000Z")
            .expect("parses");
        assert!(matches_filter(
            &json!({ "publishedAt": "2024-05-01T12:00:00Z" }),
            &filter
        ));
        assert!(!matches_filter(&json!({ "publishedAt": null }), &filter));
        assert!(!matches_filter(&json!({}), &filter));
        assert!(!matches_filter(
            &json!({ "publishedAt": "2024-05-02T00:00:00Z" }),
            &filter
        ));
    }

    #[rstest]
    fn wrapped_presentation_nests_attributes_and_relations() {
        let repository = InMemoryContentRepository::wrapped();
        let presented = repository.present(json!({
            "id": 1,
            "slug": "home",
            "image": { "url": "/a.jpg" },
            "tags": [{ "name": "brand" }],
            "values": ["Craft"]
        }));
        assert_eq!(
            presented,
            json!({
                "id": 1,
                "attributes": {
                    "slug": "home",
                    "image": { "data": { "url": "/a.jpg" } },
                    "tags": { "data": [{ "name": "brand" }] },
                    "values": ["Craft"]
                }
            })
        );
    }
}

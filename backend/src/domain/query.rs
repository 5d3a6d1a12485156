//! Repository query directives: filters, relation population, sort order
//! and pagination, rendered as bracketed query-string pairs.
//!
//! ```text
//! filters[slug][$eq]=home
//! filters[publishedAt][$lte]=2024-05-01T12:00:00.000Z
//! populate[0]=image
//! sort[0]=publishedAt:desc
//! pagination[limit]=3
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use pagination::PageRequest;

/// Field holding an item's publish timestamp.
pub const PUBLISHED_AT_FIELD: &str = "publishedAt";

/// Comparison applied by a [`Filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Exact equality (`$eq`).
    Eq,
    /// Less than or equal (`$lte`).
    Lte,
}

impl FilterOperator {
    /// Operator token as it appears in the query string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "$eq",
            Self::Lte => "$lte",
        }
    }

    /// Parse an operator token.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "$eq" => Some(Self::Eq),
            "$lte" => Some(Self::Lte),
            _ => None,
        }
    }
}

/// One key → matcher entry; `path` addresses nested relation fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    /// Field path, e.g. `["tags", "name"]`.
    pub path: Vec<String>,
    /// Comparison operator.
    pub operator: FilterOperator,
    /// Right-hand operand.
    pub value: String,
}

impl Filter {
    fn query_key(&self) -> String {
        let fields: String = self.path.iter().map(|field| format!("[{field}]")).collect();
        format!("filters{fields}[{}]", self.operator.as_str())
    }
}

/// Sort direction for a sort directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    /// Direction token as it appears in the query string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Query directives for one repository read.
///
/// # Examples
///
/// ```rust
/// use agency_content::domain::ContentQuery;
///
/// let pairs = ContentQuery::new()
///     .filter_eq(&["slug"], "home")
///     .populate("image")
///     .to_query_pairs();
/// assert_eq!(pairs[0], ("filters[slug][$eq]".to_owned(), "home".to_owned()));
/// assert_eq!(pairs[1], ("populate[0]".to_owned(), "image".to_owned()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentQuery {
    filters: Vec<Filter>,
    populate: Vec<String>,
    sort: Vec<(String, SortDirection)>,
    page: Option<PageRequest>,
}

impl ContentQuery {
    /// Empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require the field at `path` to equal `value`.
    #[must_use]
    pub fn filter_eq(mut self, path: &[&str], value: impl Into<String>) -> Self {
        self.filters.push(Filter {
            path: path.iter().map(|field| (*field).to_owned()).collect(),
            operator: FilterOperator::Eq,
            value: value.into(),
        });
        self
    }

    /// Hide items whose publish timestamp is after `now` (and unpublished drafts).
    #[must_use]
    pub fn published_before(mut self, now: DateTime<Utc>) -> Self {
        self.filters.push(Filter {
            path: vec![PUBLISHED_AT_FIELD.to_owned()],
            operator: FilterOperator::Lte,
            value: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        });
        self
    }

    /// Ask the repository to expand the `relation` field.
    #[must_use]
    pub fn populate(mut self, relation: impl Into<String>) -> Self {
        self.populate.push(relation.into());
        self
    }

    /// Append a sort directive.
    #[must_use]
    pub fn sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort.push((field.into(), direction));
        self
    }

    /// Attach a pagination directive.
    #[must_use]
    pub fn paginate(mut self, page: PageRequest) -> Self {
        self.page = Some(page);
        self
    }

    /// Filters in insertion order.
    pub fn filters(&self) -> &[Filter] {
        self.filters.as_slice()
    }

    /// Pagination directive, if any.
    pub fn page(&self) -> Option<PageRequest> {
        self.page
    }

    /// Render every directive as query-string pairs.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .filters
            .iter()
            .map(|filter| (filter.query_key(), filter.value.clone()))
            .collect();
        pairs.extend(
            self.populate
                .iter()
                .enumerate()
                .map(|(index, relation)| (format!("populate[{index}]"), relation.clone())),
        );
        pairs.extend(
            self.sort.iter().enumerate().map(|(index, (field, direction))| {
                (format!("sort[{index}]"), format!("{field}:{}", direction.as_str()))
            }),
        );
        if let Some(page) = self.page {
            pairs.extend(page.to_query_pairs());
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    //! Rendering coverage for query directives.

    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    fn nested_filters_render_each_path_segment() {
        let pairs = ContentQuery::new()
            .filter_eq(&["tags", "name"], "branding")
            .to_query_pairs();
        assert_eq!(
            pairs,
            vec![(
                "filters[tags][name][$eq]".to_owned(),
                "branding".to_owned()
            )]
        );
    }

    #[rstest]
    fn published_filter_uses_utc_millisecond_timestamp() {
        let now = Utc
            .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        let pairs = ContentQuery::new().published_before(now).to_query_pairs();
        assert_eq!(
            pairs,
            vec![(
                "filters[publishedAt][$lte]".to_owned(),
                "2024-05-01T12:00:00.000Z".to_owned()
            )]
        );
    }

    #[rstest]
    fn sort_and_pagination_follow_filters_and_populate() {
        let pairs = ContentQuery::new()
            .filter_eq(&["category"], "News")
            .populate("coverImage")
            .populate("tags")
            .sort(PUBLISHED_AT_FIELD, SortDirection::Desc)
            .paginate(PageRequest::offset(0, 1).expect("valid limit"))
            .to_query_pairs();
        let keys: Vec<&str> = pairs.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "filters[category][$eq]",
                "populate[0]",
                "populate[1]",
                "sort[0]",
                "pagination[start]",
                "pagination[limit]",
            ]
        );
        assert_eq!(pairs[3].1, "publishedAt:desc");
    }

    #[rstest]
    #[case("$eq", Some(FilterOperator::Eq))]
    #[case("$lte", Some(FilterOperator::Lte))]
    #[case("$gt", None)]
    fn operators_parse_from_tokens(#[case] token: &str, #[case] expected: Option<FilterOperator>) {
        assert_eq!(FilterOperator::parse(token), expected);
    }
}

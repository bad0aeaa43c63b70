//! Typed model of the search request fragments.
//!
//! The types serialize to the Elasticsearch query DSL:
//!
//! ```text
//! SortQuery    {"sort": [{"imdb_rating": "desc"}, {"title.raw": "asc"}]}   or {}
//! FilterQuery  {"bool": {"must": [{"nested": {...}}, {"range": {...}}]}}    or {}
//! ```

use movies_core::PageRequest;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// One `{target: direction}` entry of a sort list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortClause(BTreeMap<String, SortOrder>);

impl SortClause {
    /// Creates a clause sorting `target` in `order`.
    #[must_use]
    pub fn new(target: impl Into<String>, order: SortOrder) -> Self {
        Self(BTreeMap::from([(target.into(), order)]))
    }

    /// Returns the sort target and direction.
    #[must_use]
    pub fn entry(&self) -> Option<(&str, SortOrder)> {
        self.0.iter().next().map(|(target, order)| (target.as_str(), *order))
    }
}

/// Sort fragment. `sort: None` means no sorting and renders as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<SortClause>>,
}

impl SortQuery {
    /// The "no sort" fragment.
    #[must_use]
    pub const fn unsorted() -> Self {
        Self { sort: None }
    }

    /// Returns true when the fragment imposes no ordering.
    #[must_use]
    pub fn is_unsorted(&self) -> bool {
        self.sort.is_none()
    }
}

/// Inclusive bounds of a range clause. Absent bounds are omitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeBounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gte: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lte: Option<f64>,
}

/// A single query clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryClause {
    /// Matches documents where one element of the nested array at `path`
    /// satisfies `query`.
    Nested { path: String, query: Box<QueryClause> },
    /// Matches when the field holds any of the values.
    Terms(BTreeMap<String, Vec<String>>),
    /// Matches when the field lies within the bounds.
    Range(BTreeMap<String, RangeBounds>),
}

impl QueryClause {
    /// Wraps `query` in a nested clause over `path`.
    #[must_use]
    pub fn nested(path: impl Into<String>, query: QueryClause) -> Self {
        Self::Nested {
            path: path.into(),
            query: Box::new(query),
        }
    }

    /// Terms clause on one field.
    #[must_use]
    pub fn terms(field: impl Into<String>, values: Vec<String>) -> Self {
        Self::Terms(BTreeMap::from([(field.into(), values)]))
    }

    /// Range clause on one field.
    #[must_use]
    pub fn range(field: impl Into<String>, bounds: RangeBounds) -> Self {
        Self::Range(BTreeMap::from([(field.into(), bounds)]))
    }
}

/// Conjunction of clauses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoolQuery {
    #[serde(default)]
    pub must: Vec<QueryClause>,
}

/// Filter fragment. An empty filter renders as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterQuery {
    #[serde(rename = "bool", default, skip_serializing_if = "Option::is_none")]
    pub bool_query: Option<BoolQuery>,
}

impl FilterQuery {
    /// The empty filter.
    #[must_use]
    pub const fn empty() -> Self {
        Self { bool_query: None }
    }

    /// A filter requiring every clause to match.
    #[must_use]
    pub fn must(clauses: Vec<QueryClause>) -> Self {
        Self {
            bool_query: Some(BoolQuery { must: clauses }),
        }
    }

    /// Returns the required clauses.
    #[must_use]
    pub fn clauses(&self) -> &[QueryClause] {
        match &self.bool_query {
            Some(bool_query) => &bool_query.must,
            None => &[],
        }
    }

    /// Returns true when the filter constrains nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses().is_empty()
    }

    /// Conjunction of several filters.
    #[must_use]
    pub fn merge<'a>(filters: impl IntoIterator<Item = &'a FilterQuery>) -> Self {
        let must: Vec<QueryClause> = filters.into_iter().flat_map(|f| f.clauses().iter().cloned()).collect();
        if must.is_empty() {
            Self::empty()
        } else {
            Self::must(must)
        }
    }
}

#[derive(Debug, Serialize)]
struct MatchAll {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum SearchQuery {
    MatchAll(MatchAll),
    Bool(BoolQuery),
}

/// Complete body of a paginated search request.
#[derive(Debug, Serialize)]
pub struct SearchBody {
    from: usize,
    size: usize,
    query: SearchQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<Vec<SortClause>>,
}

/// Assembles the sort and filter fragments into one search request.
#[must_use]
pub fn compose_search_body(sort: &SortQuery, filters: &[&FilterQuery], page: PageRequest) -> SearchBody {
    let merged = FilterQuery::merge(filters.iter().copied());
    let query = match merged.bool_query {
        Some(bool_query) => SearchQuery::Bool(bool_query),
        None => SearchQuery::MatchAll(MatchAll {}),
    };

    SearchBody {
        from: page.offset(),
        size: page.limit(),
        query,
        sort: sort.sort.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_fragments_render_as_empty_objects() {
        assert_eq!(serde_json::to_value(SortQuery::unsorted()).unwrap(), json!({}));
        assert_eq!(serde_json::to_value(FilterQuery::empty()).unwrap(), json!({}));
    }

    #[test]
    fn test_nested_terms_layout() {
        let clause = QueryClause::nested("genre_full", QueryClause::terms("genre_full.uuid", vec!["g1".to_string()]));
        assert_eq!(
            serde_json::to_value(FilterQuery::must(vec![clause])).unwrap(),
            json!({"bool": {"must": [
                {"nested": {"path": "genre_full", "query": {"terms": {"genre_full.uuid": ["g1"]}}}}
            ]}})
        );
    }

    #[test]
    fn test_filter_deserializes_from_cached_json() {
        let cached = r#"{"bool":{"must":[{"range":{"imdb_rating":{"gte":5.0}}}]}}"#;
        let filter: FilterQuery = serde_json::from_str(cached).unwrap();
        let bounds = RangeBounds {
            gte: Some(5.0),
            lte: None,
        };
        assert_eq!(filter, FilterQuery::must(vec![QueryClause::range("imdb_rating", bounds)]));

        let empty: FilterQuery = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_merge_concatenates_in_order() {
        let genre = FilterQuery::must(vec![QueryClause::terms("a", vec!["1".to_string()])]);
        let rating = FilterQuery::must(vec![QueryClause::range("b", RangeBounds::default())]);

        let merged = FilterQuery::merge([&genre, &FilterQuery::empty(), &rating]);
        assert_eq!(merged.clauses().len(), 2);
        assert!(matches!(merged.clauses()[0], QueryClause::Terms(_)));
        assert!(FilterQuery::merge([&FilterQuery::empty()]).bool_query.is_none());
    }

    #[test]
    fn test_compose_without_filters_matches_all() {
        let body = compose_search_body(&SortQuery::unsorted(), &[&FilterQuery::empty()], PageRequest::new(2, 10));
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({"from": 10, "size": 10, "query": {"match_all": {}}})
        );
    }

    #[test]
    fn test_compose_with_sort_and_filters() {
        let sort = SortQuery {
            sort: Some(vec![SortClause::new("imdb_rating", SortOrder::Desc)]),
        };
        let rating = FilterQuery::must(vec![QueryClause::range(
            "imdb_rating",
            RangeBounds {
                gte: Some(7.0),
                lte: None,
            },
        )]);

        let body = compose_search_body(&sort, &[&rating], PageRequest::first());
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({
                "from": 0,
                "size": 50,
                "query": {"bool": {"must": [{"range": {"imdb_rating": {"gte": 7.0}}}]}},
                "sort": [{"imdb_rating": "desc"}]
            })
        );
    }
}

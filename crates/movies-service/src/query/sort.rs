//! Sort-clause builder.

use super::{SortClause, SortOrder, SortQuery};
use crate::cache::{CacheKeyArgs, CallArgs};
use movies_core::{MoviesError, MoviesResult};
use serde::{Deserialize, Serialize};

/// Directive that disables sorting wherever it appears.
pub const NO_SORT: &str = "none";

/// Ordered sort directives such as `["-imdb_rating", "title"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortRequest(Vec<String>);

impl SortRequest {
    #[must_use]
    pub fn new<S: Into<String>>(directives: impl IntoIterator<Item = S>) -> Self {
        Self(directives.into_iter().map(Into::into).collect())
    }

    /// Returns the directives in request order.
    #[must_use]
    pub fn directives(&self) -> &[String] {
        &self.0
    }
}

impl CacheKeyArgs for SortRequest {
    fn key_args(&self) -> MoviesResult<CallArgs> {
        CallArgs::new().arg(&self.0)
    }
}

fn sort_target(field: &str) -> Option<&'static str> {
    match field {
        "imdb_rating" => Some("imdb_rating"),
        "title" => Some("title.raw"),
        _ => None,
    }
}

fn parse_directive(directive: &str) -> (&str, SortOrder) {
    if let Some(field) = directive.strip_prefix('-') {
        (field, SortOrder::Desc)
    } else if let Some(field) = directive.strip_prefix('+') {
        (field, SortOrder::Asc)
    } else {
        (directive, SortOrder::Asc)
    }
}

/// Translates sort directives into a sort fragment.
///
/// A `none` directive anywhere yields the unsorted fragment. Otherwise a
/// leading `-` sorts descending, `+` or no prefix ascending, and clauses keep
/// the input order. Only `imdb_rating` and `title` can be sorted on.
pub fn build_sort_query(directives: &[String]) -> MoviesResult<SortQuery> {
    if directives.iter().any(|d| d == NO_SORT) {
        return Ok(SortQuery::unsorted());
    }

    let clauses = directives
        .iter()
        .map(|directive| {
            let (field, order) = parse_directive(directive);
            sort_target(field)
                .map(|target| SortClause::new(target, order))
                .ok_or_else(|| MoviesError::validation(format!("{} doesn't support as sorting field", field)))
        })
        .collect::<MoviesResult<Vec<_>>>()?;

    Ok(SortQuery { sort: Some(clauses) })
}

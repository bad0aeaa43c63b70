//! Genre-filter builder.

use super::{FilterQuery, QueryClause};
use crate::cache::{CacheKeyArgs, CallArgs};
use movies_core::MoviesResult;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Nested path holding a film's genres.
pub const GENRE_PATH: &str = "genre_full";

/// Field of the genre identifier inside [`GENRE_PATH`].
pub const GENRE_ID_FIELD: &str = "genre_full.uuid";

/// How several requested genres combine.
///
/// `any` matches films in at least one of the genres. Every other value is
/// read as `all`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GenreCondition {
    #[default]
    Any,
    All,
}

impl GenreCondition {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::All => "all",
        }
    }
}

impl From<&str> for GenreCondition {
    fn from(value: &str) -> Self {
        if value == "any" {
            Self::Any
        } else {
            Self::All
        }
    }
}

impl From<String> for GenreCondition {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<GenreCondition> for String {
    fn from(value: GenreCondition) -> Self {
        value.as_str().to_string()
    }
}

impl Display for GenreCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Genres to filter by and how they combine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreFilterRequest {
    pub genres: Vec<String>,
    #[serde(default)]
    pub condition: GenreCondition,
}

impl GenreFilterRequest {
    #[must_use]
    pub fn new(genres: Vec<String>, condition: GenreCondition) -> Self {
        Self { genres, condition }
    }
}

impl CacheKeyArgs for GenreFilterRequest {
    fn key_args(&self) -> MoviesResult<CallArgs> {
        CallArgs::new().arg(&self.genres)?.arg(&self.condition)
    }
}

fn genre_clause(genres: Vec<String>) -> QueryClause {
    QueryClause::nested(GENRE_PATH, QueryClause::terms(GENRE_ID_FIELD, genres))
}

/// Translates genre identifiers into a filter fragment.
///
/// No genres yields the empty filter. `any` yields one nested terms clause
/// with every identifier; `all` yields one nested clause per identifier so
/// each genre must be matched on its own.
#[must_use]
pub fn build_genre_filter(genres: &[String], condition: GenreCondition) -> FilterQuery {
    if genres.is_empty() {
        return FilterQuery::empty();
    }

    let clauses = match condition {
        GenreCondition::Any => vec![genre_clause(genres.to_vec())],
        GenreCondition::All => genres.iter().map(|genre| genre_clause(vec![genre.clone()])).collect(),
    };

    FilterQuery::must(clauses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn genres() -> Vec<String> {
        vec!["g1".to_string(), "g2".to_string()]
    }

    #[test]
    fn test_no_genres_is_empty_filter() {
        assert!(build_genre_filter(&[], GenreCondition::Any).is_empty());
        assert!(build_genre_filter(&[], GenreCondition::All).is_empty());
    }

    #[test]
    fn test_any_builds_single_clause() {
        let filter = build_genre_filter(&genres(), GenreCondition::Any);
        assert_eq!(
            serde_json::to_value(filter).unwrap(),
            json!({"bool": {"must": [
                {"nested": {"path": "genre_full", "query": {"terms": {"genre_full.uuid": ["g1", "g2"]}}}}
            ]}})
        );
    }

    #[test]
    fn test_all_builds_clause_per_genre() {
        let filter = build_genre_filter(&genres(), GenreCondition::All);
        assert_eq!(
            serde_json::to_value(filter).unwrap(),
            json!({"bool": {"must": [
                {"nested": {"path": "genre_full", "query": {"terms": {"genre_full.uuid": ["g1"]}}}},
                {"nested": {"path": "genre_full", "query": {"terms": {"genre_full.uuid": ["g2"]}}}}
            ]}})
        );
    }

    #[test]
    fn test_unknown_condition_means_all() {
        assert_eq!(GenreCondition::from("any"), GenreCondition::Any);
        assert_eq!(GenreCondition::from("all"), GenreCondition::All);
        assert_eq!(GenreCondition::from("ANY"), GenreCondition::All);
        assert_eq!(GenreCondition::from("whatever"), GenreCondition::All);
    }

    #[test]
    fn test_condition_serde() {
        let request: GenreFilterRequest = serde_json::from_value(json!({"genres": ["g1"], "condition": "both"})).unwrap();
        assert_eq!(request.condition, GenreCondition::All);

        let request: GenreFilterRequest = serde_json::from_value(json!({"genres": ["g1"]})).unwrap();
        assert_eq!(request.condition, GenreCondition::Any);
        assert_eq!(serde_json::to_value(request.condition).unwrap(), json!("any"));
    }

    #[test]
    fn test_condition_changes_key_args() {
        let any = GenreFilterRequest::new(genres(), GenreCondition::Any).key_args().unwrap();
        let all = GenreFilterRequest::new(genres(), GenreCondition::All).key_args().unwrap();
        assert_ne!(any, all);
    }
}

//! Film service trait definition.

use crate::dto::FilmSearchParams;
use crate::query::{FilterQuery, GenreCondition, SortQuery};
use async_trait::async_trait;
use movies_core::{FilmDocument, MoviesResult, Person, RoleSummary};
use serde_json::Value;

/// Film service trait.
///
/// Every operation is served through the cache: lookups with the standard
/// TTL, query fragments with the low TTL.
#[async_trait]
pub trait FilmService: Send + Sync {
    /// Gets the roles `person` holds on each of their films.
    ///
    /// Films missing from the index are skipped.
    async fn get_roles_in_films(&self, person: &Person) -> MoviesResult<Vec<RoleSummary>>;

    /// Gets the `uuid`, `title` and `imdb_rating` source fields of each of the
    /// person's films, returned as the index holds them.
    ///
    /// Films missing from the index are skipped.
    async fn get_person_films_info(&self, person: &Person) -> MoviesResult<Vec<FilmDocument>>;

    /// Builds the sort fragment for the given directives.
    async fn construct_sort_query(&self, sort_by: &[String]) -> MoviesResult<SortQuery>;

    /// Builds the genre filter fragment.
    async fn construct_filter_query(&self, genres: &[String], condition: GenreCondition) -> MoviesResult<FilterQuery>;

    /// Builds the rating range fragment.
    async fn construct_range_query(&self, rating_min: Option<f64>, rating_max: Option<f64>) -> MoviesResult<FilterQuery>;

    /// Searches films, returning the matching documents of the requested page.
    async fn search_films(&self, params: &FilmSearchParams) -> MoviesResult<Vec<Value>>;
}

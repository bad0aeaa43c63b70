//! Film service implementation.

use crate::cache::{CacheKeyArgs, CacheStore, CacheTtls, CallArgs, Memoized, OperationIdentity};
use crate::dto::FilmSearchParams;
use crate::film_service::FilmService;
use crate::query::{
    build_genre_filter, build_rating_range, build_sort_query, compose_search_body, FilterQuery, GenreCondition,
    GenreFilterRequest, RatingRangeRequest, SortQuery, SortRequest,
};
use async_trait::async_trait;
use movies_core::{FilmDocument, FilmId, FilmRole, MoviesError, MoviesResult, Person, RoleSummary, ValidateExt};
use movies_search::{BatchGetDoc, SearchBackend};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Type name used in the cache keys of the instance-bound lookups.
const SERVICE_NAME: &str = "FilmService";

/// Fields fetched for person film listings.
const FILM_INFO_FIELDS: [&str; 3] = ["uuid", "title", "imdb_rating"];

/// Lookups depend on the person's id and films only, so a rename keeps the
/// cached entries.
impl CacheKeyArgs for Person {
    fn key_args(&self) -> MoviesResult<CallArgs> {
        CallArgs::new().arg(&self.uuid)?.arg(&self.films)
    }
}

/// Uncached lookups against the films index.
struct FilmIndex {
    backend: Arc<dyn SearchBackend>,
    index: String,
}

impl FilmIndex {
    async fn fetch(&self, person: &Person, fields: Vec<String>) -> MoviesResult<Vec<BatchGetDoc>> {
        if person.films.is_empty() {
            return Ok(Vec::new());
        }

        let docs = self.backend.batch_get(&self.index, &person.film_ids(), &fields).await?;
        let requested = docs.len();
        let found: Vec<BatchGetDoc> = docs.into_iter().filter(|doc| doc.found).collect();

        if found.len() < requested {
            debug!(
                "{} of {} films of person {} not found in '{}'",
                requested - found.len(),
                requested,
                person.uuid,
                self.index
            );
        }
        Ok(found)
    }

    async fn roles_in_films(&self, person: &Person) -> MoviesResult<Vec<RoleSummary>> {
        let fields = FilmRole::ALL.iter().map(FilmRole::credit_id_path).collect();
        let person_id = person.uuid.to_string();

        self.fetch(person, fields)
            .await?
            .into_iter()
            .map(|doc| -> MoviesResult<RoleSummary> {
                let uuid = parse_film_id(&doc.id)?;
                let roles = FilmRole::ALL
                    .into_iter()
                    .filter(|role| is_credited(&doc, *role, &person_id))
                    .collect();
                Ok(RoleSummary { roles, uuid })
            })
            .collect()
    }

    async fn films_info(&self, person: &Person) -> MoviesResult<Vec<FilmDocument>> {
        let fields = FILM_INFO_FIELDS.iter().map(ToString::to_string).collect();

        let docs = self.fetch(person, fields).await?;
        Ok(docs.into_iter().map(|doc| doc.source).collect())
    }
}

fn parse_film_id(id: &str) -> MoviesResult<FilmId> {
    id.parse()
        .map_err(|e| MoviesError::external("elasticsearch", format!("Invalid film id '{}': {}", id, e)))
}

/// Checks whether `person_id` appears in the credit list of `role`.
fn is_credited(doc: &BatchGetDoc, role: FilmRole, person_id: &str) -> bool {
    doc.source
        .get(role.credits_field())
        .and_then(Value::as_array)
        .is_some_and(|credits| {
            credits
                .iter()
                .any(|credit| credit.get("uuid").and_then(Value::as_str) == Some(person_id))
        })
}

/// Film service backed by the search index, with every operation cached.
pub struct FilmServiceImpl {
    backend: Arc<dyn SearchBackend>,
    index: String,
    roles_in_films: Memoized<Person, Vec<RoleSummary>>,
    person_films_info: Memoized<Person, Vec<FilmDocument>>,
    sort_query: Memoized<SortRequest, SortQuery>,
    filter_query: Memoized<GenreFilterRequest, FilterQuery>,
    range_query: Memoized<RatingRangeRequest, FilterQuery>,
}

impl FilmServiceImpl {
    /// Creates a film service reading `index`.
    ///
    /// Lookups are cached with the standard TTL and query fragments with the
    /// low TTL.
    pub fn new(backend: Arc<dyn SearchBackend>, cache: Arc<dyn CacheStore>, index: impl Into<String>, ttls: CacheTtls) -> Self {
        let index = index.into();
        let films = Arc::new(FilmIndex {
            backend: Arc::clone(&backend),
            index: index.clone(),
        });

        let lookup = Arc::clone(&films);
        let roles_in_films: Memoized<Person, Vec<RoleSummary>> = Memoized::new(
            OperationIdentity::bound(SERVICE_NAME, "get_roles_in_films", &index),
            ttls.standard,
            Arc::clone(&cache),
            move |person: Person| {
                let lookup = Arc::clone(&lookup);
                Box::pin(async move { lookup.roles_in_films(&person).await })
            },
        );

        let lookup = films;
        let person_films_info: Memoized<Person, Vec<FilmDocument>> = Memoized::new(
            OperationIdentity::bound(SERVICE_NAME, "get_person_films_info", &index),
            ttls.standard,
            Arc::clone(&cache),
            move |person: Person| {
                let lookup = Arc::clone(&lookup);
                Box::pin(async move { lookup.films_info(&person).await })
            },
        );

        let sort_query: Memoized<SortRequest, SortQuery> = Memoized::new(
            OperationIdentity::unbound("construct_sort_query"),
            ttls.low,
            Arc::clone(&cache),
            |request: SortRequest| Box::pin(async move { build_sort_query(request.directives()) }),
        );

        let filter_query: Memoized<GenreFilterRequest, FilterQuery> = Memoized::new(
            OperationIdentity::unbound("construct_filter_query"),
            ttls.low,
            Arc::clone(&cache),
            |request: GenreFilterRequest| {
                Box::pin(async move { Ok(build_genre_filter(&request.genres, request.condition)) })
            },
        );

        let range_query: Memoized<RatingRangeRequest, FilterQuery> = Memoized::new(
            OperationIdentity::unbound("construct_range_query"),
            ttls.low,
            cache,
            |request: RatingRangeRequest| Box::pin(async move { build_rating_range(request.min, request.max) }),
        );

        Self {
            backend,
            index,
            roles_in_films,
            person_films_info,
            sort_query,
            filter_query,
            range_query,
        }
    }

    /// Returns the index this service reads.
    #[must_use]
    pub fn index(&self) -> &str {
        &self.index
    }
}

#[async_trait]
impl FilmService for FilmServiceImpl {
    async fn get_roles_in_films(&self, person: &Person) -> MoviesResult<Vec<RoleSummary>> {
        debug!("Getting roles of person {} in {} films", person.uuid, person.films.len());
        self.roles_in_films.call(person.clone()).await
    }

    async fn get_person_films_info(&self, person: &Person) -> MoviesResult<Vec<FilmDocument>> {
        debug!("Getting films of person {}", person.uuid);
        self.person_films_info.call(person.clone()).await
    }

    async fn construct_sort_query(&self, sort_by: &[String]) -> MoviesResult<SortQuery> {
        self.sort_query.call(SortRequest::new(sort_by.iter().cloned())).await
    }

    async fn construct_filter_query(&self, genres: &[String], condition: GenreCondition) -> MoviesResult<FilterQuery> {
        self.filter_query
            .call(GenreFilterRequest::new(genres.to_vec(), condition))
            .await
    }

    async fn construct_range_query(&self, rating_min: Option<f64>, rating_max: Option<f64>) -> MoviesResult<FilterQuery> {
        self.range_query
            .call(RatingRangeRequest::new(rating_min, rating_max))
            .await
    }

    async fn search_films(&self, params: &FilmSearchParams) -> MoviesResult<Vec<Value>> {
        params.validate_request()?;

        let sort = self.sort_query.call(params.sort_request()).await?;
        let genres = self.filter_query.call(params.genre_request()).await?;
        let rating = self.range_query.call(params.rating_request()).await?;

        let body = compose_search_body(&sort, &[&genres, &rating], params.page());
        let body = serde_json::to_value(&body)?;

        debug!("Searching films in '{}'", self.index);
        self.backend.search(&self.index, &body).await
    }
}

impl std::fmt::Debug for FilmServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilmServiceImpl")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

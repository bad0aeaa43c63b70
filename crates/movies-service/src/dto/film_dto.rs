//! Film search DTOs.

use crate::query::{GenreCondition, GenreFilterRequest, RatingRangeRequest, SortRequest};
use movies_core::validation::rules::finite;
use movies_core::PageRequest;
use serde::{Deserialize, Serialize};
use validator::Validate;

fn default_sort() -> Vec<String> {
    vec!["-imdb_rating".to_string()]
}

const fn default_page_number() -> usize {
    1
}

const fn default_page_size() -> usize {
    PageRequest::DEFAULT_SIZE
}

/// Film search parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct FilmSearchParams {
    /// Sort directives, e.g. `-imdb_rating` or `title`; `none` disables sorting.
    #[serde(default = "default_sort")]
    pub sort: Vec<String>,

    /// Genre identifiers to filter by.
    #[serde(default)]
    pub genres: Vec<String>,

    #[serde(default)]
    pub genre_condition: GenreCondition,

    #[validate(
        range(min = 0.0, max = 10.0, message = "Rating must be between 0 and 10"),
        custom(function = "finite")
    )]
    pub rating_min: Option<f64>,

    #[validate(
        range(min = 0.0, max = 10.0, message = "Rating must be between 0 and 10"),
        custom(function = "finite")
    )]
    pub rating_max: Option<f64>,

    #[validate(range(min = 1, max = 10_000, message = "Page number must be 1-10000"))]
    #[serde(default = "default_page_number")]
    pub page_number: usize,

    #[validate(range(min = 1, max = 100, message = "Page size must be 1-100"))]
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for FilmSearchParams {
    fn default() -> Self {
        Self {
            sort: default_sort(),
            genres: Vec::new(),
            genre_condition: GenreCondition::default(),
            rating_min: None,
            rating_max: None,
            page_number: default_page_number(),
            page_size: default_page_size(),
        }
    }
}

impl FilmSearchParams {
    /// Returns the requested page.
    #[must_use]
    pub fn page(&self) -> PageRequest {
        PageRequest::new(self.page_number, self.page_size)
    }

    #[must_use]
    pub fn sort_request(&self) -> SortRequest {
        SortRequest::new(self.sort.iter().cloned())
    }

    #[must_use]
    pub fn genre_request(&self) -> GenreFilterRequest {
        GenreFilterRequest::new(self.genres.clone(), self.genre_condition)
    }

    #[must_use]
    pub fn rating_request(&self) -> RatingRangeRequest {
        RatingRangeRequest::new(self.rating_min, self.rating_max)
    }
}

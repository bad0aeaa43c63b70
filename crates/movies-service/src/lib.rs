//! # Movies Service
//!
//! Service layer for the movies API: a cache-aside memoization wrapper over
//! an external key-value store, the builders that turn sort/genre/rating
//! intents into search query fragments, and the film lookup service that
//! ties both to the search backend.

pub mod cache;
pub mod dto;
pub mod film_service;
pub mod query;
pub mod r#impl;

pub use cache::*;
pub use dto::*;
pub use film_service::*;
pub use query::*;
pub use r#impl::FilmServiceImpl;

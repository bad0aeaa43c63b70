//! Query-fragment builders.
//!
//! Each builder is a pure function turning one query intent (sort order,
//! genre filter, rating range) into a typed fragment of the search request.
//! [`compose_search_body`] assembles the fragments into a full request.

mod document;
mod genre_filter;
mod rating_range;
mod sort;

pub use document::*;
pub use genre_filter::*;
pub use rating_range::*;
pub use sort::*;

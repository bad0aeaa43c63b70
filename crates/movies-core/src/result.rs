//! Result type aliases for the movies API.

use crate::MoviesError;

/// A specialized `Result` type for movies operations.
pub type MoviesResult<T> = Result<T, MoviesError>;

/// A boxed future returning a `MoviesResult`.
pub type BoxFuture<'a, T> = std::pin::Pin<Box<dyn std::future::Future<Output = MoviesResult<T>> + Send + 'a>>;

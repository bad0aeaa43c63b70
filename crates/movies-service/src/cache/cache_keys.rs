//! Cache key derivation.
//!
//! A key is the operation prefix followed by the JSON rendering of the call
//! arguments:
//!
//! ```text
//! FilmService:get_roles_in_films:movies:["…",["…","…"]]:{}
//! construct_sort_query:[["-imdb_rating"]]:{}
//! ```
//!
//! Arguments are rendered through `serde`, so composite values always
//! contribute their field values and never an address or identity. Named
//! arguments live in a `BTreeMap` and render in name order regardless of the
//! order they were supplied in. NaN and infinite floats have no JSON form and
//! are refused rather than rendered as `null`.

use super::float_scan::contains_non_finite;
use movies_core::{MoviesError, MoviesResult};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::{self, Display};

/// The instance an operation is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BoundInstance {
    type_name: &'static str,
    discriminator: String,
}

/// Identity of a cached operation: its name and, when it belongs to a
/// service instance, that instance's type and discriminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationIdentity {
    name: &'static str,
    bound: Option<BoundInstance>,
}

impl OperationIdentity {
    /// An operation not tied to any instance.
    #[must_use]
    pub const fn unbound(name: &'static str) -> Self {
        Self { name, bound: None }
    }

    /// An operation of a service instance, told apart from other instances of
    /// the same type by `discriminator` (e.g. the index it reads).
    #[must_use]
    pub fn bound(type_name: &'static str, name: &'static str, discriminator: impl Display) -> Self {
        Self {
            name,
            bound: Some(BoundInstance {
                type_name,
                discriminator: discriminator.to_string(),
            }),
        }
    }

    /// Returns the operation name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the key prefix: `Type:operation:discriminator` or `operation`.
    #[must_use]
    pub fn prefix(&self) -> String {
        match &self.bound {
            Some(instance) => format!("{}:{}:{}", instance.type_name, self.name, instance.discriminator),
            None => self.name.to_string(),
        }
    }
}

/// Value-based rendering of a call's arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    positional: Vec<Value>,
    named: BTreeMap<String, Value>,
}

impl CallArgs {
    /// Creates an empty argument list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional argument.
    pub fn arg<T: Serialize + ?Sized>(mut self, value: &T) -> MoviesResult<Self> {
        self.positional.push(key_value(value)?);
        Ok(self)
    }

    /// Sets a named argument.
    pub fn named<T: Serialize + ?Sized>(mut self, name: &str, value: &T) -> MoviesResult<Self> {
        self.named.insert(name.to_string(), key_value(value)?);
        Ok(self)
    }

    fn render(&self) -> String {
        // Vec<Value> and BTreeMap<String, Value> cannot fail to serialize
        let positional = serde_json::to_string(&self.positional).unwrap_or_default();
        let named = serde_json::to_string(&self.named).unwrap_or_default();
        format!("{}:{}", positional, named)
    }
}

fn key_value<T: Serialize + ?Sized>(value: &T) -> MoviesResult<Value> {
    if contains_non_finite(value) {
        return Err(MoviesError::validation(
            "NaN and infinite numbers cannot be used as cache key arguments",
        ));
    }
    Ok(serde_json::to_value(value)?)
}

/// Inputs of a memoized operation implement this to describe themselves as
/// cache key arguments.
pub trait CacheKeyArgs {
    /// Returns the arguments that identify this call.
    fn key_args(&self) -> MoviesResult<CallArgs>;
}

/// Opaque cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Derives the cache key for one call of `identity` with `args`.
#[must_use]
pub fn derive_key(identity: &OperationIdentity, args: &CallArgs) -> CacheKey {
    CacheKey(format!("{}:{}", identity.prefix(), args.render()))
}

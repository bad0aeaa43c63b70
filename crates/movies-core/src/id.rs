//! Typed ID wrappers for domain entities.
//!
//! Identifiers serialize as their bare UUID string, which is both the form
//! the search backend stores and the form used inside cache keys.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;
use uuid::Uuid;

macro_rules! typed_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from a UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Parses an ID from a string.
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                Ok(Self(Uuid::parse_str(s)?))
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

typed_id!(
    /// A strongly-typed wrapper for film IDs.
    FilmId
);

typed_id!(
    /// A strongly-typed wrapper for person IDs.
    PersonId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_film_id_new() {
        let id1 = FilmId::new();
        let id2 = FilmId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_person_id_parse() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id = PersonId::parse(uuid_str).unwrap();
        assert_eq!(id.to_string(), uuid_str);
    }

    #[test]
    fn test_film_id_from_str() {
        let id: FilmId = "120a21cf-9097-479e-904a-13dd7198c1dd".parse().unwrap();
        assert_eq!(id.to_string(), "120a21cf-9097-479e-904a-13dd7198c1dd");
        assert!("not-a-uuid".parse::<FilmId>().is_err());
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = FilmId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"550e8400-e29b-41d4-a716-446655440000\"");
        let back: FilmId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_uuid_conversions() {
        let uuid = Uuid::new_v4();
        let id = PersonId::from(uuid);
        let back: Uuid = id.into();
        assert_eq!(uuid, back);
        assert_eq!(PersonId::from_uuid(uuid).into_inner(), uuid);
    }
}

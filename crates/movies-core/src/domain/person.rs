//! Person model.

use crate::{FilmId, PersonId};
use serde::{Deserialize, Serialize};

/// A person credited on one or more films.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Unique identifier for the person.
    pub uuid: PersonId,

    /// Display name.
    pub full_name: String,

    /// Films the person is credited on, in any role.
    #[serde(default)]
    pub films: Vec<FilmId>,
}

impl Person {
    /// Creates a new person.
    #[must_use]
    pub fn new(uuid: PersonId, full_name: impl Into<String>, films: Vec<FilmId>) -> Self {
        Self {
            uuid,
            full_name: full_name.into(),
            films,
        }
    }

    /// Returns the film identifiers as strings, in credit order.
    #[must_use]
    pub fn film_ids(&self) -> Vec<String> {
        self.films.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_film_ids_preserve_order() {
        let f1 = FilmId::new();
        let f2 = FilmId::new();
        let person = Person::new(PersonId::new(), "Ridley Scott", vec![f2, f1]);
        assert_eq!(person.film_ids(), vec![f2.to_string(), f1.to_string()]);
    }

    #[test]
    fn test_deserialize_without_films() {
        let json = r#"{"uuid":"550e8400-e29b-41d4-a716-446655440000","full_name":"Nobody"}"#;
        let person: Person = serde_json::from_str(json).unwrap();
        assert!(person.films.is_empty());
    }
}

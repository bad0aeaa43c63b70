//! Film projections and role credits.

use crate::FilmId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{self, Display};

/// A credited role on a film.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilmRole {
    Actor,
    Writer,
    Director,
}

impl FilmRole {
    /// All roles, in the order they are reported.
    pub const ALL: [FilmRole; 3] = [FilmRole::Actor, FilmRole::Writer, FilmRole::Director];

    /// Returns the role name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Actor => "actor",
            Self::Writer => "writer",
            Self::Director => "director",
        }
    }

    /// Returns the film document field holding this role's credits.
    #[must_use]
    pub const fn credits_field(&self) -> &'static str {
        match self {
            Self::Actor => "actors",
            Self::Writer => "writers",
            Self::Director => "directors",
        }
    }

    /// Returns the path of the credited person's id inside the film document.
    #[must_use]
    pub fn credit_id_path(&self) -> String {
        format!("{}.uuid", self.credits_field())
    }
}

impl Display for FilmRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The roles one person holds on one film.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSummary {
    /// Roles held, in [`FilmRole::ALL`] order.
    pub roles: Vec<FilmRole>,
    /// The film.
    pub uuid: FilmId,
}

/// A film document's source, passed through as stored in the index.
pub type FilmDocument = Map<String, Value>;

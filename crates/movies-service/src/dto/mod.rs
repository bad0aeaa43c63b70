//! Data Transfer Objects (DTOs).

mod film_dto;

pub use film_dto::*;

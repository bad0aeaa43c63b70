//! Domain models consumed by the lookup service.
//!
//! Only the fields this layer reads are modelled; the full documents live in
//! the search backend.

mod film;
mod person;

pub use film::*;
pub use person::*;

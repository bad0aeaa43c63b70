//! Service implementations.

mod film_service_impl;

pub use film_service_impl::FilmServiceImpl;

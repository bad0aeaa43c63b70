//! # Movies Server Library
//!
//! Assembles the cache store, the search backend and the film service from
//! configuration, and owns their startup and shutdown.

pub mod di;
pub mod startup;

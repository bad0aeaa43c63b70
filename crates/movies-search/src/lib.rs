//! # Movies Search
//!
//! Boundary to the search backend that stores film, person and genre
//! documents.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn SearchBackend>   (backend interface)
//! ElasticSearchBackend          (HTTP / JSON)
//!   ↓
//! Elasticsearch
//! ```

pub mod elastic;
pub mod traits;

pub use elastic::*;
pub use traits::*;

// ghmeta library.
// GitHub repository metadata facade, document store, and per-product metadata cache.

pub mod config;
pub mod context;
pub mod documents;
pub mod error;
pub mod github;
pub mod metadata;
pub mod state;
pub mod sync;

pub use context::Context;
pub use error::{MetaError, Result};
pub use metadata::RepositoryMetadata;

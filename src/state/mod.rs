// State management module.
// Client-side cache of repository metadata backed by the document store.

pub mod projects;

pub use projects::ProjectStore;

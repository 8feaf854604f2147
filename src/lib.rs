//! MoodStream Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod catalog;
pub mod classifier;
pub mod config;
pub mod emotion;
pub mod mailer;
pub mod recommend;
pub mod server;

// Re-export commonly used types for convenience
pub use catalog::{CatalogSearch, SpotifyClient, TrackCandidate};
pub use recommend::{RecommendationMode, Recommender, Selection, SelectionPolicy};
pub use server::{run_server, RequestsLoggingLevel, ServerConfig};

//! The recommendation engine.
//!
//! Turns an emotion label into a deduplicated, popularity-ranked track
//! selection: facet-driven query fan-out against the catalog, a seen-id
//! pool that folds responses together, banded selection for variety, and a
//! fallback ladder that ends in a small static list so the caller always
//! gets something playable.

mod engine;
mod playlist_link;
mod pool;
mod queries;

pub use engine::{RecommendationMode, Recommender, Selection, SelectionPolicy};
pub use playlist_link::PlaylistLink;
pub use pool::CandidatePool;

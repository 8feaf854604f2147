//! External music catalog search.
//!
//! The catalog is a remote black box: the engine only depends on the
//! [`CatalogSearch`] trait, so tests substitute a scripted stub and the
//! binary wires in the Spotify-backed client.

mod spotify;

pub use spotify::{SpotifyClient, SpotifyCredentials};

use async_trait::async_trait;
use thiserror::Error;

/// One track returned by the catalog search.
#[derive(Debug, Clone)]
pub struct TrackCandidate {
    /// Opaque catalog identifier, used as the dedup key.
    pub id: String,
    pub name: String,
    /// Canonical link to the track.
    pub url: String,
    /// Artist names in catalog order, may be empty.
    pub artists: Vec<String>,
    /// Higher is more popular.
    pub popularity: u32,
    /// The search query that produced this candidate. Diagnostic only.
    pub origin_query: Option<String>,
}

/// A single search call failed. The aggregation loop treats every variant
/// as "this query returned nothing" and moves on.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("failed to reach the catalog: {0}")]
    Connection(String),

    #[error("catalog rejected the request with status {0}")]
    Status(u16),

    #[error("could not obtain an access token: {0}")]
    Token(String),

    #[error("malformed catalog response: {0}")]
    MalformedResponse(String),
}

/// Search interface of the external catalog.
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    /// Run one track search, returning at most `limit` candidates biased
    /// toward `market`. Each call is independent; a failure must not carry
    /// state over into the next call.
    async fn search(
        &self,
        query: &str,
        limit: usize,
        market: &str,
    ) -> Result<Vec<TrackCandidate>, SearchError>;
}

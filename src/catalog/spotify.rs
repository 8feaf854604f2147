//! Spotify Web API search client.
//!
//! Authenticates with the client-credentials flow: tokens are fetched from
//! the accounts service, cached until shortly before expiry, and refreshed
//! transparently on the next search.

use super::{CatalogSearch, SearchError, TrackCandidate};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const SEARCH_URL: &str = "https://api.spotify.com/v1/search";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Refresh the token this long before the reported expiry.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Catalog API credentials, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct SpotifyCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Search client for the Spotify Web API.
pub struct SpotifyClient {
    client: Client,
    credentials: SpotifyCredentials,
    cached_token: Mutex<Option<CachedToken>>,
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Deserialize)]
struct SearchResponse {
    tracks: Option<TracksPage>,
}

#[derive(Deserialize)]
struct TracksPage {
    items: Vec<ApiTrack>,
}

#[derive(Deserialize)]
struct ApiTrack {
    id: Option<String>,
    name: Option<String>,
    external_urls: Option<ExternalUrls>,
    artists: Option<Vec<ApiArtist>>,
    popularity: Option<u32>,
}

#[derive(Deserialize)]
struct ExternalUrls {
    spotify: Option<String>,
}

#[derive(Deserialize)]
struct ApiArtist {
    name: Option<String>,
}

impl SpotifyClient {
    pub fn new(credentials: SpotifyCredentials) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SearchError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            credentials,
            cached_token: Mutex::new(None),
        })
    }

    /// Get a bearer token, reusing the cached one while it is still fresh.
    async fn access_token(&self) -> Result<String, SearchError> {
        let mut cached = self.cached_token.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.expires_at > Instant::now() {
                return Ok(token.value.clone());
            }
        }

        debug!("Requesting new catalog access token");
        let response = self
            .client
            .post(TOKEN_URL)
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| SearchError::Token(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SearchError::Token(format!(
                "token endpoint returned status {}",
                response.status()
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Token(e.to_string()))?;

        let expires_at = Instant::now()
            + Duration::from_secs(body.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        *cached = Some(CachedToken {
            value: body.access_token.clone(),
            expires_at,
        });

        Ok(body.access_token)
    }
}

#[async_trait]
impl CatalogSearch for SpotifyClient {
    async fn search(
        &self,
        query: &str,
        limit: usize,
        market: &str,
    ) -> Result<Vec<TrackCandidate>, SearchError> {
        let token = self.access_token().await?;
        let limit = limit.to_string();

        let response = self
            .client
            .get(SEARCH_URL)
            .bearer_auth(token)
            .query(&[
                ("q", query),
                ("type", "track"),
                ("limit", limit.as_str()),
                ("market", market),
            ])
            .send()
            .await
            .map_err(|e| SearchError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            if status.as_u16() == 401 {
                // Token revoked early; drop it so the next call re-authenticates.
                self.cached_token.lock().await.take();
            }
            return Err(SearchError::Status(status.as_u16()));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::MalformedResponse(e.to_string()))?;

        let items = body.tracks.map(|page| page.items).unwrap_or_default();

        let candidates = items
            .into_iter()
            .filter_map(|track| {
                let id = track.id?;
                let url = track.external_urls.and_then(|u| u.spotify)?;
                let artists = track
                    .artists
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|a| a.name)
                    .collect();
                Some(TrackCandidate {
                    id,
                    name: track.name.unwrap_or_default(),
                    url,
                    artists,
                    popularity: track.popularity.unwrap_or(0),
                    origin_query: Some(query.to_string()),
                })
            })
            .collect();

        Ok(candidates)
    }
}

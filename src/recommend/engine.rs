//! Aggregation, ranking and fallback: the decision core of the server.

use super::pool::CandidatePool;
use super::queries::{build_fallback_queries, build_search_queries};
use crate::catalog::{CatalogSearch, TrackCandidate};
use crate::emotion::EmotionProfiles;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Per-query result cap for the fallback broad queries, both modes.
const FALLBACK_QUERY_LIMIT: usize = 5;

/// How many tracks the caller gets and how hard the aggregator works for
/// them. Display backs the on-screen list, Full backs the email playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationMode {
    Display,
    Full,
}

impl RecommendationMode {
    /// Stop collecting once the pool holds this many candidates.
    fn pool_target(&self) -> usize {
        match self {
            RecommendationMode::Display => 20,
            RecommendationMode::Full => 50,
        }
    }

    /// At most this many synthesized queries are sent to the catalog,
    /// bounding external calls per request.
    fn query_budget(&self) -> usize {
        match self {
            RecommendationMode::Display => 12,
            RecommendationMode::Full => 20,
        }
    }

    /// Result cap passed to the catalog per query.
    fn per_query_limit(&self) -> usize {
        match self {
            RecommendationMode::Display => 3,
            RecommendationMode::Full => 5,
        }
    }

    /// Hard cap on the rows handed back to the caller.
    fn output_limit(&self) -> usize {
        match self {
            RecommendationMode::Display => 10,
            RecommendationMode::Full => 50,
        }
    }
}

/// Tunable knobs of the ranking and fallback stages. The defaults are the
/// production values; tests shrink them to probe edge behavior.
#[derive(Debug, Clone)]
pub struct SelectionPolicy {
    /// Top-ranked tracks taken unconditionally.
    pub top_band: usize,
    /// End (exclusive, by rank) of the mid band sampled for variety.
    pub mid_band_end: usize,
    /// How many mid-band tracks are mixed in.
    pub mid_band_take: usize,
    /// Run fallback queries when the working set is smaller than this.
    pub fallback_threshold: usize,
    /// Fallback stops once the working set reaches this size.
    pub fallback_floor: usize,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            top_band: 6,
            mid_band_end: 15,
            mid_band_take: 4,
            fallback_threshold: 8,
            fallback_floor: 10,
        }
    }
}

impl SelectionPolicy {
    /// Banded selection over a ranked list: the whole top band, plus a few
    /// mid-band tracks so the result is not only the globally biggest hits.
    pub fn select_banded(&self, ranked: &[TrackCandidate]) -> Vec<TrackCandidate> {
        let mut selected: Vec<TrackCandidate> =
            ranked.iter().take(self.top_band).cloned().collect();

        if ranked.len() > self.top_band {
            let mid = &ranked[self.top_band..ranked.len().min(self.mid_band_end)];
            selected.extend(mid.iter().take(self.mid_band_take).cloned());
        }

        selected
    }
}

/// The final per-request track list.
#[derive(Debug, Clone)]
pub struct Selection {
    pub emotion: String,
    pub tracks: Vec<TrackCandidate>,
}

impl Selection {
    /// Shape the selection into wire rows: `[name, url]` for display,
    /// `[name, url, artists]` for the full list, truncated to the mode's
    /// output cap.
    pub fn rows(&self, mode: RecommendationMode) -> Vec<Vec<String>> {
        self.tracks
            .iter()
            .take(mode.output_limit())
            .map(|track| match mode {
                RecommendationMode::Display => vec![track.name.clone(), track.url.clone()],
                RecommendationMode::Full => vec![
                    track.name.clone(),
                    track.url.clone(),
                    track.artists.join(", "),
                ],
            })
            .collect()
    }
}

/// The recommendation engine. One instance is built at startup and shared
/// across requests; every call owns its candidate pool exclusively.
pub struct Recommender {
    catalog: Arc<dyn CatalogSearch>,
    profiles: EmotionProfiles,
    policy: SelectionPolicy,
    market: String,
}

impl Recommender {
    pub fn new(
        catalog: Arc<dyn CatalogSearch>,
        profiles: EmotionProfiles,
        policy: SelectionPolicy,
        market: String,
    ) -> Self {
        Self {
            catalog,
            profiles,
            policy,
            market,
        }
    }

    /// Recommend tracks for an emotion label.
    ///
    /// Never fails: unknown labels borrow the default profile, per-query
    /// search errors are skipped, and a total catalog outage degrades to a
    /// small static list.
    pub async fn recommend(&self, emotion: &str, mode: RecommendationMode) -> Selection {
        let profile = self.profiles.facets(emotion);
        let queries = build_search_queries(profile);
        debug!(
            "Synthesized {} search queries for emotion '{}'",
            queries.len(),
            emotion
        );

        let mut pool = CandidatePool::new();
        let mut failed_queries = 0usize;

        for query in queries.iter().take(mode.query_budget()) {
            match self
                .catalog
                .search(query, mode.per_query_limit(), &self.market)
                .await
            {
                Ok(tracks) => {
                    for track in tracks {
                        pool.insert(track);
                    }
                }
                Err(err) => {
                    warn!("Search failed for '{}': {}", query, err);
                    failed_queries += 1;
                }
            }

            if pool.len() >= mode.pool_target() {
                break;
            }
        }

        if !pool.is_empty() {
            pool.rank_by_popularity();
            let selected = self.policy.select_banded(pool.tracks());
            pool.retain_selected(selected);
        }

        if pool.len() < self.policy.fallback_threshold {
            self.run_fallback(emotion, &mut pool).await;
        }

        if pool.is_empty() {
            warn!(
                "No catalog results for '{}' ({} queries failed), serving the static list",
                emotion, failed_queries
            );
            return Selection {
                emotion: emotion.to_string(),
                tracks: static_fallback_tracks(),
            };
        }

        info!(
            "Selected {} tracks for emotion '{}' ({:?} mode)",
            pool.len(),
            emotion,
            mode
        );
        Selection {
            emotion: emotion.to_string(),
            tracks: pool.into_tracks(),
        }
    }

    /// Broad generic queries, run strictly after the primary budget, still
    /// deduplicating against everything the pool has ever seen.
    async fn run_fallback(&self, emotion: &str, pool: &mut CandidatePool) {
        for query in build_fallback_queries(emotion) {
            if pool.len() >= self.policy.fallback_floor {
                break;
            }

            let tracks = match self
                .catalog
                .search(&query, FALLBACK_QUERY_LIMIT, &self.market)
                .await
            {
                Ok(tracks) => tracks,
                Err(err) => {
                    warn!("Fallback search failed for '{}': {}", query, err);
                    continue;
                }
            };

            for track in tracks {
                pool.insert(track);
                if pool.len() >= self.policy.fallback_floor {
                    break;
                }
            }
        }
    }

    /// Derive the "explore similar music" link for a selection.
    pub fn playlist_link(&self, selection: &Selection) -> super::PlaylistLink {
        super::playlist_link::build_playlist_link(selection, &self.profiles)
    }
}

/// Last-resort list served when the catalog yields nothing at all. Generic
/// but always playable.
fn static_fallback_tracks() -> Vec<TrackCandidate> {
    let entries = [
        ("Tum Hi Ho", "https://open.spotify.com/track/example1"),
        ("Kal Ho Naa Ho", "https://open.spotify.com/track/example2"),
        (
            "Ae Dil Hai Mushkil",
            "https://open.spotify.com/track/example3",
        ),
        ("Raabta", "https://open.spotify.com/track/example4"),
        ("Gerua", "https://open.spotify.com/track/example5"),
    ];

    entries
        .iter()
        .map(|(name, url)| TrackCandidate {
            id: url.rsplit('/').next().unwrap_or(name).to_string(),
            name: name.to_string(),
            url: url.to_string(),
            artists: Vec::new(),
            popularity: 0,
            origin_query: None,
        })
        .collect()
}

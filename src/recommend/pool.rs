//! The deduplicated candidate pool for one recommendation request.

use crate::catalog::TrackCandidate;
use std::collections::HashSet;

/// Ordered candidates plus the set of every id seen so far.
///
/// The pool is the single aggregation context threaded through primary
/// search and fallback: selection may drop candidates from the ordered
/// list, but their ids stay in the seen-set so later queries cannot
/// re-introduce them.
#[derive(Default)]
pub struct CandidatePool {
    tracks: Vec<TrackCandidate>,
    seen_ids: HashSet<String>,
}

impl CandidatePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate unless its id was already seen. Returns whether the
    /// candidate was kept.
    pub fn insert(&mut self, track: TrackCandidate) -> bool {
        if self.seen_ids.contains(&track.id) {
            return false;
        }
        self.seen_ids.insert(track.id.clone());
        self.tracks.push(track);
        true
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Stable sort by descending popularity; ties keep insertion order.
    pub fn rank_by_popularity(&mut self) {
        self.tracks
            .sort_by(|a, b| b.popularity.cmp(&a.popularity));
    }

    /// Keep only the tracks the selection policy picked, without forgetting
    /// the ids of the ones dropped.
    pub fn retain_selected(&mut self, selected: Vec<TrackCandidate>) {
        self.tracks = selected;
    }

    pub fn tracks(&self) -> &[TrackCandidate] {
        &self.tracks
    }

    pub fn into_tracks(self) -> Vec<TrackCandidate> {
        self.tracks
    }
}

#[cfg(test)]
pub(crate) fn candidate(id: &str, popularity: u32) -> TrackCandidate {
    TrackCandidate {
        id: id.to_string(),
        name: format!("track-{}", id),
        url: format!("https://open.spotify.com/track/{}", id),
        artists: vec![format!("artist-{}", id)],
        popularity,
        origin_query: None,
    }
}

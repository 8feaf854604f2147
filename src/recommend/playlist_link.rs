//! "Explore similar music" link derivation for the email path.

use super::engine::Selection;
use crate::emotion::EmotionProfiles;

const SEARCH_BASE: &str = "https://open.spotify.com/search/";

/// Tracks considered when collecting seed artists.
const ARTIST_SOURCE_TRACKS: usize = 10;
const MAX_ARTISTS: usize = 3;
const MAX_GENRE_KEYWORDS: usize = 2;

/// A derived catalog search URL plus the terms it was built from.
#[derive(Debug, Clone)]
pub struct PlaylistLink {
    pub url: String,
    pub terms: Vec<String>,
}

impl PlaylistLink {
    /// The degraded form: a plain `<emotion> music` search.
    pub fn generic(emotion: &str) -> Self {
        Self {
            url: format!("{}{}%20music", SEARCH_BASE, urlencoding::encode(emotion)),
            terms: Vec::new(),
        }
    }
}

/// Compose a search URL from the emotion label, its genre keywords and the
/// selection's leading artists. Never fails: with no usable terms it
/// degrades to the generic `<emotion> music` search.
pub fn build_playlist_link(selection: &Selection, profiles: &EmotionProfiles) -> PlaylistLink {
    let emotion = selection.emotion.trim();
    if emotion.is_empty() {
        return PlaylistLink::generic(&selection.emotion);
    }

    // Distinct first-listed artists of the leading tracks, first-seen order.
    let mut artists: Vec<String> = Vec::new();
    for track in selection.tracks.iter().take(ARTIST_SOURCE_TRACKS) {
        if artists.len() >= MAX_ARTISTS {
            break;
        }
        let Some(first_artist) = track.artists.first() else {
            continue;
        };
        let first_artist = first_artist.trim();
        if !first_artist.is_empty() && !artists.iter().any(|a| a == first_artist) {
            artists.push(first_artist.to_string());
        }
    }

    let mut terms: Vec<String> = vec![emotion.to_string()];
    terms.extend(
        profiles
            .link_keywords(emotion)
            .iter()
            .take(MAX_GENRE_KEYWORDS)
            .map(|k| k.to_string()),
    );
    terms.extend(artists);

    let query = terms.join(" ");
    PlaylistLink {
        url: format!("{}{}", SEARCH_BASE, urlencoding::encode(&query)),
        terms,
    }
}

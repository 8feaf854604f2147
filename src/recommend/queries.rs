//! Search query synthesis from emotion facets.

use crate::emotion::EmotionProfile;

const GENRES_USED: usize = 3;
const MOODS_USED: usize = 3;
const STYLES_USED: usize = 2;
const DESCRIPTORS_USED: usize = 2;

/// Expand a profile into an ordered list of regional search phrases.
///
/// Order matters only for truncation: the aggregator consumes a prefix of
/// this list bounded by its query budget, so genre queries come first as
/// the strongest signal. No phrase is ever empty.
pub fn build_search_queries(profile: &EmotionProfile) -> Vec<String> {
    let mut queries = Vec::new();

    for genre in profile.genres.iter().take(GENRES_USED) {
        queries.push(format!("{} bollywood hindi", genre));
        queries.push(format!("{} indian music", genre));
        queries.push(format!("{} hindi songs", genre));
    }

    for mood in profile.moods.iter().take(MOODS_USED) {
        queries.push(format!("{} hindi songs", mood));
        queries.push(format!("{} bollywood music", mood));
        queries.push(format!("{} indian cinema", mood));
    }

    for style in profile.styles.iter().take(STYLES_USED) {
        queries.push(format!("{} bollywood", style));
        queries.push(format!("{} hindi music", style));
    }

    for descriptor in profile.descriptors.iter().take(DESCRIPTORS_USED) {
        queries.push(format!("{} indian music", descriptor));
    }

    queries
}

/// Generic broad queries used when the targeted fan-out comes up short.
/// The first two are qualified by the emotion label, the rest are fully
/// emotion-agnostic chart queries.
pub fn build_fallback_queries(emotion: &str) -> Vec<String> {
    vec![
        format!("{} bollywood songs", emotion),
        format!("{} hindi music", emotion),
        "popular bollywood hits".to_string(),
        "trending indian songs".to_string(),
        "bollywood chartbusters".to_string(),
        "hindi film songs popular".to_string(),
    ]
}

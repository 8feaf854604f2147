//! Static facet tables used to synthesize catalog search queries.

use super::Emotion;
use std::collections::HashMap;

/// The music facets associated with one emotion.
///
/// Facet order matters: query synthesis consumes a fixed-size prefix of each
/// list, so the strongest associations come first.
#[derive(Debug, Clone)]
pub struct EmotionProfile {
    pub genres: Vec<&'static str>,
    pub moods: Vec<&'static str>,
    pub descriptors: Vec<&'static str>,
    pub styles: Vec<&'static str>,
}

/// Immutable profile tables, built once at startup and injected into the
/// recommendation engine.
///
/// Lookups are by lower-cased label and never fail: unknown labels resolve
/// to the happy profile.
pub struct EmotionProfiles {
    profiles: HashMap<Emotion, EmotionProfile>,
    link_keywords: HashMap<Emotion, Vec<&'static str>>,
}

impl EmotionProfiles {
    /// Facets for an emotion label, falling back to the happy profile for
    /// anything unknown.
    pub fn facets(&self, label: &str) -> &EmotionProfile {
        let emotion = Emotion::parse(label).unwrap_or(Emotion::Happy);
        &self.profiles[&emotion]
    }

    /// Short genre keywords for the "explore similar music" link. Smaller
    /// table than the search facets; unknown labels get a generic keyword.
    pub fn link_keywords(&self, label: &str) -> &[&'static str] {
        match Emotion::parse(label) {
            Some(emotion) => &self.link_keywords[&emotion],
            None => &["music"],
        }
    }
}

impl Default for EmotionProfiles {
    fn default() -> Self {
        let mut profiles = HashMap::new();

        profiles.insert(
            Emotion::Happy,
            EmotionProfile {
                genres: vec!["pop", "dance", "funk", "disco", "electronic", "reggae"],
                moods: vec![
                    "upbeat",
                    "joyful",
                    "celebration",
                    "energetic",
                    "festive",
                    "cheerful",
                ],
                descriptors: vec!["bright", "optimistic", "vibrant", "bouncy", "lively"],
                styles: vec!["party", "wedding", "festival", "dance", "uplifting"],
            },
        );

        profiles.insert(
            Emotion::Sad,
            EmotionProfile {
                genres: vec!["ballad", "acoustic", "folk", "blues", "indie", "classical"],
                moods: vec![
                    "melancholy",
                    "heartbreak",
                    "emotional",
                    "lonely",
                    "nostalgic",
                    "reflective",
                ],
                descriptors: vec!["slow", "gentle", "soft", "tender", "mellow"],
                styles: vec![
                    "romantic",
                    "soulful",
                    "contemplative",
                    "introspective",
                    "emotional",
                ],
            },
        );

        profiles.insert(
            Emotion::Angry,
            EmotionProfile {
                genres: vec!["rock", "metal", "punk", "hard rock", "alternative", "grunge"],
                moods: vec![
                    "intense",
                    "powerful",
                    "aggressive",
                    "fierce",
                    "rebellious",
                    "strong",
                ],
                descriptors: vec!["loud", "heavy", "driving", "forceful", "explosive"],
                styles: vec![
                    "hardcore",
                    "aggressive",
                    "intense",
                    "powerful",
                    "energetic",
                ],
            },
        );

        profiles.insert(
            Emotion::Relaxed,
            EmotionProfile {
                genres: vec!["ambient", "chill", "lounge", "jazz", "new age", "meditation"],
                moods: vec!["calm", "peaceful", "soothing", "tranquil", "serene", "zen"],
                descriptors: vec!["smooth", "flowing", "gentle", "warm", "cozy"],
                styles: vec![
                    "chillout",
                    "ambient",
                    "peaceful",
                    "relaxing",
                    "meditative",
                ],
            },
        );

        profiles.insert(
            Emotion::Surprise,
            EmotionProfile {
                genres: vec!["experimental", "fusion", "world", "electronic", "avant-garde"],
                moods: vec![
                    "exciting",
                    "dynamic",
                    "unexpected",
                    "innovative",
                    "creative",
                    "unique",
                ],
                descriptors: vec![
                    "eclectic",
                    "diverse",
                    "unconventional",
                    "fresh",
                    "original",
                ],
                styles: vec![
                    "experimental",
                    "unique",
                    "creative",
                    "innovative",
                    "surprising",
                ],
            },
        );

        profiles.insert(
            Emotion::Disgust,
            EmotionProfile {
                genres: vec![
                    "alternative",
                    "indie",
                    "grunge",
                    "post-rock",
                    "experimental",
                ],
                moods: vec![
                    "dark",
                    "moody",
                    "brooding",
                    "introspective",
                    "mysterious",
                    "edgy",
                ],
                descriptors: vec![
                    "atmospheric",
                    "haunting",
                    "complex",
                    "layered",
                    "abstract",
                ],
                styles: vec!["alternative", "indie", "dark", "moody", "atmospheric"],
            },
        );

        profiles.insert(
            Emotion::Anxious,
            EmotionProfile {
                genres: vec![
                    "cinematic",
                    "orchestral",
                    "electronic",
                    "ambient",
                    "post-rock",
                ],
                moods: vec![
                    "tense",
                    "dramatic",
                    "suspenseful",
                    "nervous",
                    "uncertain",
                    "restless",
                ],
                descriptors: vec![
                    "building",
                    "climactic",
                    "escalating",
                    "urgent",
                    "stirring",
                ],
                styles: vec![
                    "dramatic",
                    "cinematic",
                    "suspenseful",
                    "intense",
                    "emotional",
                ],
            },
        );

        let mut link_keywords = HashMap::new();
        link_keywords.insert(
            Emotion::Happy,
            vec!["pop", "dance", "upbeat", "cheerful"],
        );
        link_keywords.insert(
            Emotion::Sad,
            vec!["ballad", "melancholy", "acoustic", "emotional"],
        );
        link_keywords.insert(
            Emotion::Angry,
            vec!["rock", "metal", "intense", "powerful"],
        );
        link_keywords.insert(
            Emotion::Relaxed,
            vec!["chill", "ambient", "peaceful", "calm"],
        );
        link_keywords.insert(Emotion::Surprise, vec!["experimental", "unique", "creative"]);
        link_keywords.insert(Emotion::Anxious, vec!["soothing", "calming", "peaceful"]);
        link_keywords.insert(Emotion::Disgust, vec!["alternative", "indie", "unique"]);

        Self {
            profiles,
            link_keywords,
        }
    }
}

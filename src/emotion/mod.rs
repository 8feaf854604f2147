//! Emotion labels and their static music-facet profiles.

mod profiles;

pub use profiles::{EmotionProfile, EmotionProfiles};

use std::fmt;

/// The seven canonical emotion labels.
///
/// The discriminants match the index contract of the external emotion
/// classifier: 0=Angry, 1=Disgust, 2=Anxious, 3=Happy, 4=Sad, 5=Surprise,
/// 6=Relaxed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emotion {
    Angry = 0,
    Disgust = 1,
    Anxious = 2,
    Happy = 3,
    Sad = 4,
    Surprise = 5,
    Relaxed = 6,
}

impl Emotion {
    pub const ALL: [Emotion; 7] = [
        Emotion::Angry,
        Emotion::Disgust,
        Emotion::Anxious,
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Surprise,
        Emotion::Relaxed,
    ];

    /// Map a classifier output index to an emotion.
    pub fn from_index(index: u8) -> Option<Emotion> {
        match index {
            0 => Some(Emotion::Angry),
            1 => Some(Emotion::Disgust),
            2 => Some(Emotion::Anxious),
            3 => Some(Emotion::Happy),
            4 => Some(Emotion::Sad),
            5 => Some(Emotion::Surprise),
            6 => Some(Emotion::Relaxed),
            _ => None,
        }
    }

    /// Case-insensitive parse of a canonical label.
    ///
    /// Returns `None` for anything outside the seven labels; the
    /// recommendation engine itself accepts arbitrary labels and falls back
    /// to the default profile, so this is only used where strict validation
    /// is wanted.
    pub fn parse(label: &str) -> Option<Emotion> {
        match label.to_lowercase().as_str() {
            "angry" => Some(Emotion::Angry),
            "disgust" => Some(Emotion::Disgust),
            "anxious" => Some(Emotion::Anxious),
            "happy" => Some(Emotion::Happy),
            "sad" => Some(Emotion::Sad),
            "surprise" => Some(Emotion::Surprise),
            "relaxed" => Some(Emotion::Relaxed),
            _ => None,
        }
    }

    /// The canonical display label, e.g. "Happy".
    pub fn label(&self) -> &'static str {
        match self {
            Emotion::Angry => "Angry",
            Emotion::Disgust => "Disgust",
            Emotion::Anxious => "Anxious",
            Emotion::Happy => "Happy",
            Emotion::Sad => "Sad",
            Emotion::Surprise => "Surprise",
            Emotion::Relaxed => "Relaxed",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

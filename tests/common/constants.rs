//! Shared constants for the e2e test suite.

pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// The seven canonical emotion labels the selection endpoint accepts.
pub const CANONICAL_EMOTIONS: [&str; 7] = [
    "Angry", "Disgust", "Anxious", "Happy", "Sad", "Surprise", "Relaxed",
];

/// Names of the static last-resort list, in order.
pub const STATIC_FALLBACK_NAMES: [&str; 5] = [
    "Tum Hi Ho",
    "Kal Ho Naa Ho",
    "Ae Dil Hai Mushkil",
    "Raabta",
    "Gerua",
];

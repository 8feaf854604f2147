use axum::extract::FromRef;

use crate::classifier::EmotionClassifier;
use crate::mailer::Mailer;
use crate::recommend::Recommender;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedRecommender = Arc<Recommender>;
pub type GuardedClassifier = Arc<dyn EmotionClassifier>;
pub type OptionalMailer = Option<Arc<dyn Mailer>>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub recommender: GuardedRecommender,
    pub classifier: GuardedClassifier,
    pub mailer: OptionalMailer,
    pub hash: String,
}

impl FromRef<ServerState> for GuardedRecommender {
    fn from_ref(input: &ServerState) -> Self {
        input.recommender.clone()
    }
}

impl FromRef<ServerState> for GuardedClassifier {
    fn from_ref(input: &ServerState) -> Self {
        input.classifier.clone()
    }
}

impl FromRef<ServerState> for OptionalMailer {
    fn from_ref(input: &ServerState) -> Self {
        input.mailer.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}

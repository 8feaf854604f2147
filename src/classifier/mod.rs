//! Client for the external camera-based emotion classifier.
//!
//! The classifier itself (camera capture + CNN) is a separate process; this
//! module only crosses the process boundary and maps its output index onto
//! [`Emotion`].

use crate::emotion::Emotion;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("no emotion classifier is configured")]
    Unavailable,

    #[error("no face detected")]
    NoFace,

    #[error("classifier timed out")]
    Timeout,

    #[error("classifier failed: {0}")]
    Failed(String),
}

/// Detects the user's current emotion. May fail; callers must treat every
/// failure as recoverable.
#[async_trait]
pub trait EmotionClassifier: Send + Sync {
    async fn detect(&self) -> Result<Emotion, ClassifierError>;

    fn is_available(&self) -> bool {
        true
    }
}

/// Runs a configured shell command and parses its stdout as the classifier
/// index (0..=6). Empty output means the classifier saw no face.
pub struct CommandClassifier {
    command: String,
    timeout: Duration,
}

impl CommandClassifier {
    pub fn new(command: String, timeout: Duration) -> Self {
        Self { command, timeout }
    }
}

#[async_trait]
impl EmotionClassifier for CommandClassifier {
    async fn detect(&self) -> Result<Emotion, ClassifierError> {
        let result = tokio::time::timeout(
            self.timeout,
            Command::new("sh").arg("-c").arg(&self.command).output(),
        )
        .await;

        let output = match result {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                warn!("Classifier command failed to execute: {}", e);
                return Err(ClassifierError::Failed(e.to_string()));
            }
            Err(_) => {
                warn!("Classifier command timed out after {:?}", self.timeout);
                return Err(ClassifierError::Timeout);
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(
                "Classifier command exited with {}: {}",
                output.status, stderr
            );
            return Err(ClassifierError::Failed(format!(
                "exit status {}",
                output.status
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if stdout.is_empty() {
            return Err(ClassifierError::NoFace);
        }

        let index: u8 = stdout
            .parse()
            .map_err(|_| ClassifierError::Failed(format!("unexpected output '{}'", stdout)))?;

        Emotion::from_index(index)
            .ok_or_else(|| ClassifierError::Failed(format!("index {} out of range", index)))
    }
}

/// Placeholder used when no classifier command is configured.
pub struct UnavailableClassifier;

#[async_trait]
impl EmotionClassifier for UnavailableClassifier {
    async fn detect(&self) -> Result<Emotion, ClassifierError> {
        Err(ClassifierError::Unavailable)
    }

    fn is_available(&self) -> bool {
        false
    }
}

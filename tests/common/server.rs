//! Test server lifecycle management
//!
//! Each test gets an isolated server on a random port, wired to stub
//! collaborators: a deterministic in-memory catalog, a scripted classifier
//! and a recording mailer.

use async_trait::async_trait;
use moodstream_server::catalog::{CatalogSearch, SearchError, TrackCandidate};
use moodstream_server::classifier::{ClassifierError, EmotionClassifier};
use moodstream_server::emotion::{Emotion, EmotionProfiles};
use moodstream_server::mailer::{Mailer, PlaylistEmail};
use moodstream_server::recommend::{Recommender, SelectionPolicy};
use moodstream_server::server::server::make_app;
use moodstream_server::server::ServerConfig;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// Stub catalog: every query yields `limit` deterministic tracks derived
/// from the query text, or nothing at all in empty mode.
struct StubCatalog {
    empty: bool,
}

#[async_trait]
impl CatalogSearch for StubCatalog {
    async fn search(
        &self,
        query: &str,
        limit: usize,
        _market: &str,
    ) -> Result<Vec<TrackCandidate>, SearchError> {
        if self.empty {
            return Ok(Vec::new());
        }

        let slug: String = query
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '-' })
            .collect();

        Ok((0..limit)
            .map(|i| TrackCandidate {
                id: format!("{}-{}", slug, i),
                name: format!("Track {} {}", slug, i),
                url: format!("https://open.spotify.com/track/{}-{}", slug, i),
                artists: vec![format!("Artist {}", i)],
                popularity: (query.len() as u32 * 3 + i as u32) % 100,
                origin_query: Some(query.to_string()),
            })
            .collect())
    }
}

/// Scripted classifier: always reports the configured emotion.
struct StubClassifier {
    emotion: Option<Emotion>,
}

#[async_trait]
impl EmotionClassifier for StubClassifier {
    async fn detect(&self) -> Result<Emotion, ClassifierError> {
        self.emotion.ok_or(ClassifierError::Unavailable)
    }

    fn is_available(&self) -> bool {
        self.emotion.is_some()
    }
}

/// A message the recording mailer accepted.
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

struct RecordingMailer {
    sent: Arc<Mutex<Vec<SentEmail>>>,
    fail: bool,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, email: &PlaylistEmail) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("SMTP delivery failed");
        }
        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            subject: email.subject.clone(),
            text_body: email.text_body.clone(),
            html_body: email.html_body.clone(),
        });
        Ok(())
    }
}

/// Knobs for degraded-collaborator scenarios.
pub struct TestServerOptions {
    /// Catalog returns zero results for every query.
    pub empty_catalog: bool,
    /// Mailer errors on every send.
    pub failing_mailer: bool,
    /// What the classifier reports; `None` means unavailable.
    pub detected_emotion: Option<Emotion>,
}

impl Default for TestServerOptions {
    fn default() -> Self {
        Self {
            empty_catalog: false,
            failing_mailer: false,
            detected_emotion: Some(Emotion::Happy),
        }
    }
}

/// Test server instance listening on a random port.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    /// Every email the recording mailer accepted.
    sent_emails: Arc<Mutex<Vec<SentEmail>>>,

    server_task: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Spawns a server with well-behaved stub collaborators.
    pub async fn spawn() -> Self {
        Self::spawn_with(TestServerOptions::default()).await
    }

    /// Spawns a server with the given collaborator behavior.
    pub async fn spawn_with(options: TestServerOptions) -> Self {
        let recommender = Arc::new(Recommender::new(
            Arc::new(StubCatalog {
                empty: options.empty_catalog,
            }),
            EmotionProfiles::default(),
            SelectionPolicy::default(),
            "IN".to_string(),
        ));

        let sent_emails = Arc::new(Mutex::new(Vec::new()));
        let mailer: Arc<dyn Mailer> = Arc::new(RecordingMailer {
            sent: sent_emails.clone(),
            fail: options.failing_mailer,
        });

        let app = make_app(
            ServerConfig::default(),
            recommender,
            Arc::new(StubClassifier {
                emotion: options.detected_emotion,
            }),
            Some(mailer),
        );

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let port = listener.local_addr().unwrap().port();

        let server_task = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            port,
            sent_emails,
            server_task,
        }
    }

    pub fn sent_emails(&self) -> Vec<SentEmail> {
        self.sent_emails.lock().unwrap().clone()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.server_task.abort();
    }
}

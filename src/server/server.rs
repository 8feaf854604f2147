use anyhow::Result;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use tracing::{error, info};

use crate::classifier::{ClassifierError, EmotionClassifier};
use crate::emotion::Emotion;
use crate::mailer::{compose_playlist_email, Mailer};
use crate::recommend::{RecommendationMode, Recommender};
use tower_http::services::ServeDir;

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;

use super::{log_requests, state::*, RequestsLoggingLevel, ServerConfig};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
    pub classifier_available: bool,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

#[derive(Serialize)]
struct RecommendationResponse {
    emotion: String,
    songs: Vec<Vec<String>>,
}

#[derive(Serialize)]
struct EmailSentResponse {
    success: bool,
    message: String,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
        classifier_available: state.classifier.is_available(),
    };
    Json(stats)
}

/// POST: run the camera classifier, then recommend for whatever it saw.
async fn detect_and_recommend(State(state): State<ServerState>) -> Response {
    let emotion = match state.classifier.detect().await {
        Ok(emotion) => emotion,
        Err(ClassifierError::NoFace) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "No face detected. Please try again.",
            );
        }
        Err(err) => {
            error!("Emotion detection failed: {}", err);
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to detect emotion. Please try again.",
            );
        }
    };

    let selection = state
        .recommender
        .recommend(emotion.label(), RecommendationMode::Display)
        .await;
    let songs = selection.rows(RecommendationMode::Display);
    info!(
        "Auto-detected emotion: {}, found {} songs",
        emotion,
        songs.len()
    );

    Json(RecommendationResponse {
        emotion: emotion.label().to_string(),
        songs,
    })
    .into_response()
}

/// Recommend for a manually selected emotion. Unlike the engine, this
/// endpoint rejects labels outside the canonical seven.
async fn select_and_recommend(
    State(recommender): State<GuardedRecommender>,
    body: Option<Json<Value>>,
) -> Response {
    let Some(Json(body)) = body else {
        return error_response(StatusCode::BAD_REQUEST, "No emotion provided");
    };
    let Some(label) = body.get("emotion").and_then(|v| v.as_str()) else {
        return error_response(StatusCode::BAD_REQUEST, "No emotion provided");
    };
    let Some(emotion) = Emotion::parse(label) else {
        return error_response(StatusCode::BAD_REQUEST, "Invalid emotion selected");
    };

    let selection = recommender
        .recommend(emotion.label(), RecommendationMode::Display)
        .await;
    let songs = selection.rows(RecommendationMode::Display);
    info!("Manual selection: {}, found {} songs", emotion, songs.len());

    Json(RecommendationResponse {
        emotion: emotion.label().to_string(),
        songs,
    })
    .into_response()
}

/// Build the full playlist and mail it. Email failures surface as a
/// generic retryable 500; the reason stays in the logs.
async fn send_email_playlist(
    State(state): State<ServerState>,
    body: Option<Json<Value>>,
) -> Response {
    let Some(Json(body)) = body else {
        return error_response(StatusCode::BAD_REQUEST, "Email and emotion are required");
    };
    let (Some(user_email), Some(emotion)) = (
        body.get("email").and_then(|v| v.as_str()),
        body.get("emotion").and_then(|v| v.as_str()),
    ) else {
        return error_response(StatusCode::BAD_REQUEST, "Email and emotion are required");
    };

    if !user_email.contains('@') || !user_email.contains('.') {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Please enter a valid email address",
        );
    }

    let Some(mailer) = state.mailer.clone() else {
        error!("Email playlist requested but no mailer is configured");
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to send email. Please try again.",
        );
    };

    let selection = state
        .recommender
        .recommend(emotion, RecommendationMode::Full)
        .await;
    if selection.tracks.is_empty() {
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Could not generate playlist. Please try again.",
        );
    }

    let link = state.recommender.playlist_link(&selection);
    let email = compose_playlist_email(&selection, &link);

    match mailer.send(user_email, &email).await {
        Ok(()) => {
            info!("Email sent successfully to {}", user_email);
            Json(EmailSentResponse {
                success: true,
                message: format!(
                    "Playlist with {} songs sent to {}!",
                    selection.tracks.len(),
                    user_email
                ),
            })
            .into_response()
        }
        Err(err) => {
            error!("Failed to send email to {}: {:#}", user_email, err);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to send email. Please try again.",
            )
        }
    }
}

pub fn make_app(
    config: ServerConfig,
    recommender: Arc<Recommender>,
    classifier: Arc<dyn EmotionClassifier>,
    mailer: Option<Arc<dyn Mailer>>,
) -> Router {
    let state = ServerState {
        config: config.clone(),
        start_time: Instant::now(),
        recommender,
        classifier,
        mailer,
        hash: env!("GIT_HASH").to_string(),
    };

    let api_routes: Router = Router::new()
        .route(
            "/detect-emotion-and-recommend",
            get(home).post(detect_and_recommend),
        )
        .route("/select-emotion-and-recommend", post(select_and_recommend))
        .route("/send-email-playlist", post(send_email_playlist))
        .with_state(state.clone());

    let home_router: Router = match config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .with_state(state.clone()),
    };

    let mut app = home_router.merge(api_routes);
    app = app.layer(middleware::from_fn_with_state(state, log_requests));
    app
}

pub async fn run_server(
    recommender: Arc<Recommender>,
    classifier: Arc<dyn EmotionClassifier>,
    mailer: Option<Arc<dyn Mailer>>,
    requests_logging_level: RequestsLoggingLevel,
    port: u16,
    frontend_dir_path: Option<String>,
) -> Result<()> {
    let config = ServerConfig {
        port,
        requests_logging_level,
        frontend_dir_path,
    };
    let app = make_app(config, recommender, classifier, mailer);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;

    Ok(axum::serve(listener, app).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogSearch, SearchError, TrackCandidate};
    use crate::classifier::UnavailableClassifier;
    use crate::emotion::EmotionProfiles;
    use crate::recommend::SelectionPolicy;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    struct EmptyCatalog;

    #[async_trait]
    impl CatalogSearch for EmptyCatalog {
        async fn search(
            &self,
            _query: &str,
            _limit: usize,
            _market: &str,
        ) -> Result<Vec<TrackCandidate>, SearchError> {
            Ok(Vec::new())
        }
    }

    fn test_app() -> Router {
        let recommender = Arc::new(Recommender::new(
            Arc::new(EmptyCatalog),
            EmotionProfiles::default(),
            SelectionPolicy::default(),
            "IN".to_string(),
        ));
        make_app(
            ServerConfig::default(),
            recommender,
            Arc::new(UnavailableClassifier),
            None,
        )
    }

    fn json_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn home_reports_status() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn select_rejects_unknown_emotion() {
        let request = json_post("/select-emotion-and-recommend", r#"{"emotion":"Euphoric"}"#);
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn select_rejects_missing_emotion_field() {
        let request = json_post("/select-emotion-and-recommend", r#"{}"#);
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn select_returns_songs_for_canonical_emotion() {
        let request = json_post("/select-emotion-and-recommend", r#"{"emotion":"Happy"}"#);
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["emotion"], "Happy");
        assert!(!body["songs"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn detect_without_classifier_is_a_server_error() {
        let request = Request::builder()
            .method("POST")
            .uri("/detect-emotion-and-recommend")
            .body(Body::empty())
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn email_endpoint_validates_the_address() {
        for bad in ["not-an-email", "missing-at.example", "missing-dot@example"] {
            let body = format!(r#"{{"email":"{}","emotion":"Happy"}}"#, bad);
            let request = json_post("/send-email-playlist", &body);
            let response = test_app().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "for {}", bad);
        }
    }

    #[tokio::test]
    async fn email_endpoint_requires_both_fields() {
        let request = json_post("/send-email-playlist", r#"{"email":"a@b.c"}"#);
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn email_without_mailer_is_a_server_error() {
        let request = json_post(
            "/send-email-playlist",
            r#"{"email":"user@example.com","emotion":"Happy"}"#,
        );
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

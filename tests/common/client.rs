//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per server endpoint. When routes or
//! request formats change, update only this file.

use super::constants::REQUEST_TIMEOUT_SECS;
use reqwest::Response;
use serde_json::json;
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    pub async fn home(&self) -> Response {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .expect("home request failed")
    }

    pub async fn detect_and_recommend(&self) -> Response {
        self.client
            .post(format!("{}/detect-emotion-and-recommend", self.base_url))
            .send()
            .await
            .expect("detect request failed")
    }

    pub async fn select_emotion(&self, emotion: &str) -> Response {
        self.client
            .post(format!("{}/select-emotion-and-recommend", self.base_url))
            .json(&json!({ "emotion": emotion }))
            .send()
            .await
            .expect("select request failed")
    }

    pub async fn send_email_playlist(&self, email: &str, emotion: &str) -> Response {
        self.client
            .post(format!("{}/send-email-playlist", self.base_url))
            .json(&json!({ "email": email, "emotion": emotion }))
            .send()
            .await
            .expect("email request failed")
    }

    /// POST an arbitrary JSON body, for malformed-payload tests.
    pub async fn post_json(&self, path: &str, body: serde_json::Value) -> Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .json(&body)
            .send()
            .await
            .expect("request failed")
    }
}

//! # Insights Client
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  request_insights(prompt) ─┐                                            │
//! │  send_chat(history, msg) ──┼──► POST json ──► proxy                     │
//! │                            │                    │                       │
//! │                            │        2xx { text }│ non-2xx { error }     │
//! │                            ▼                    ▼                       │
//! │                        Ok(text)      Err(ServiceError { status, msg })  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no retry: a failed call is reported once and the user decides
//! whether to ask again.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use ts_rs::TS;
use url::Url;

use crate::config::InsightsConfig;
use crate::error::{InsightsError, InsightsResult};

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// One turn of a chat conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        ChatMessage {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        ChatMessage {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}

#[derive(Serialize)]
struct InsightsRequest<'a> {
    prompt: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    history: &'a [ChatMessage],
    message: &'a str,
}

#[derive(Deserialize)]
struct TextReply {
    text: String,
}

#[derive(Deserialize)]
struct ErrorReply {
    error: String,
}

// =============================================================================
// Client
// =============================================================================

/// Cheap to clone; the inner [`reqwest::Client`] is reference counted.
#[derive(Debug, Clone)]
pub struct InsightsClient {
    http: Client,
    insights_url: Url,
    chat_url: Url,
}

impl InsightsClient {
    pub fn new(config: &InsightsConfig) -> InsightsResult<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(InsightsClient {
            http: builder.build()?,
            insights_url: config.insights_url()?,
            chat_url: config.chat_url()?,
        })
    }

    /// One-shot analysis of a prompt the caller has assembled.
    pub async fn request_insights(&self, prompt: &str) -> InsightsResult<String> {
        debug!(chars = prompt.len(), "Requesting insights");
        self.post(&self.insights_url, &InsightsRequest { prompt }).await
    }

    /// Sends `message` with the conversation so far.
    pub async fn send_chat(&self, history: &[ChatMessage], message: &str) -> InsightsResult<String> {
        debug!(turns = history.len(), "Sending chat message");
        self.post(&self.chat_url, &ChatRequest { history, message }).await
    }

    async fn post<B: Serialize + ?Sized>(&self, url: &Url, body: &B) -> InsightsResult<String> {
        let response = self.http.post(url.clone()).json(body).send().await?;
        let status = response.status();
        let raw = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorReply>(&raw)
                .map(|e| e.error)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            warn!(url = %url, status = status.as_u16(), error = %message, "Insights proxy returned an error");
            return Err(InsightsError::ServiceError {
                status: status.as_u16(),
                message,
            });
        }

        let reply: TextReply = serde_json::from_str(&raw)
            .map_err(|e| InsightsError::MalformedResponse(e.to_string()))?;
        info!(url = %url, chars = reply.text.len(), "Insights reply received");
        Ok(reply.text)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    async fn insights(Json(body): Json<Value>) -> Json<Value> {
        let prompt = body["prompt"].as_str().unwrap_or_default();
        Json(json!({ "text": format!("analysed: {prompt}") }))
    }

    async fn chat(Json(body): Json<Value>) -> Json<Value> {
        let turns = body["history"].as_array().map_or(0, Vec::len);
        let first_role = body["history"][0]["role"].as_str().unwrap_or("none").to_string();
        let message = body["message"].as_str().unwrap_or_default();
        Json(json!({ "text": format!("{turns} turns, first {first_role}, re: {message}") }))
    }

    async fn failing() -> (StatusCode, Json<Value>) {
        (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "error": "model unavailable" })),
        )
    }

    async fn empty_ok() -> Json<Value> {
        Json(json!({}))
    }

    /// Starts a fake proxy on an ephemeral port and returns its base URL.
    async fn spawn_proxy() -> String {
        let app = Router::new()
            .route("/api/insights", post(insights))
            .route("/api/chat", post(chat))
            .route("/broken/insights", post(failing))
            .route("/empty/insights", post(empty_ok));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });
        format!("http://{addr}")
    }

    fn client_for(base: &str, insights_path: &str) -> InsightsClient {
        let config = InsightsConfig {
            insights_path: insights_path.to_string(),
            timeout_secs: Some(5),
            ..InsightsConfig::default().with_base_url(base)
        };
        InsightsClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_request_insights_returns_text() {
        let base = spawn_proxy().await;
        let client = client_for(&base, "/api/insights");

        let text = client.request_insights("sales are up").await.unwrap();
        assert_eq!(text, "analysed: sales are up");
    }

    #[tokio::test]
    async fn test_chat_sends_history_and_message() {
        let base = spawn_proxy().await;
        let client = client_for(&base, "/api/insights");
        let history = vec![ChatMessage::user("hi"), ChatMessage::model("hello")];

        let text = client.send_chat(&history, "best seller?").await.unwrap();
        assert_eq!(text, "2 turns, first user, re: best seller?");
    }

    #[tokio::test]
    async fn test_non_success_maps_to_service_error() {
        let base = spawn_proxy().await;
        let client = client_for(&base, "/broken/insights");

        match client.request_insights("anything").await {
            Err(InsightsError::ServiceError { status, message }) => {
                assert_eq!(status, 502);
                assert_eq!(message, "model unavailable");
            }
            other => panic!("expected ServiceError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_success_without_text_is_malformed() {
        let base = spawn_proxy().await;
        let client = client_for(&base, "/empty/insights");

        let err = client.request_insights("anything").await.unwrap_err();
        assert!(matches!(err, InsightsError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_missing_route_uses_status_reason() {
        let base = spawn_proxy().await;
        let client = client_for(&base, "/nowhere");

        match client.request_insights("anything").await {
            Err(InsightsError::ServiceError { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not Found");
            }
            other => panic!("expected ServiceError, got {other:?}"),
        }
    }

    #[test]
    fn test_chat_roles_serialize_lowercase() {
        let json = serde_json::to_string(&ChatMessage::model("ok")).unwrap();
        assert_eq!(json, r#"{"role":"model","text":"ok"}"#);
    }

    #[test]
    fn test_invalid_config_is_rejected_up_front() {
        let config = InsightsConfig::default().with_base_url("not a url");
        assert!(matches!(
            InsightsClient::new(&config),
            Err(InsightsError::InvalidConfig(_))
        ));
    }
}

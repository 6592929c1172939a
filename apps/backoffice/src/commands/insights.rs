//! # Insights Commands
//!
//! ## Lock Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  request_insights                                                       │
//! │    ├── lock store ── check insights:use ── build dashboard ── unlock    │
//! │    ├── render prompt                                                    │
//! │    └── .await proxy            (store is free for other commands)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tally_insights::ChatMessage;
use tracing::{debug, info};

use super::reports::{build_dashboard, Dashboard};
use super::INSIGHTS_USE;
use crate::error::ApiError;
use crate::state::{ConfigState, InsightsState, StoreState};

/// Asks the proxy to comment on the current dashboard figures.
pub async fn request_insights(
    store: &StoreState,
    config: &ConfigState,
    insights: &InsightsState,
) -> Result<String, ApiError> {
    let filter = config.default_filter();
    let dashboard = store.read(INSIGHTS_USE, |s| build_dashboard(s, config, &filter))?;
    let prompt = insights_prompt(config, &dashboard)?;

    debug!(chars = prompt.len(), "request_insights command");
    let text = insights.client().request_insights(&prompt).await?;
    info!(chars = text.len(), "Insights delivered");
    Ok(text)
}

/// Continues a chat about the store. `history` holds earlier turns only.
pub async fn send_chat_message(
    store: &StoreState,
    insights: &InsightsState,
    history: Vec<ChatMessage>,
    message: String,
) -> Result<String, ApiError> {
    let message = message.trim();
    if message.is_empty() {
        return Err(ApiError::validation("Message must not be empty"));
    }
    store.read(INSIGHTS_USE, |_| ())?;

    debug!(turns = history.len(), "send_chat_message command");
    Ok(insights.client().send_chat(&history, message).await?)
}

fn insights_prompt(config: &ConfigState, dashboard: &Dashboard) -> Result<String, ApiError> {
    let figures = serde_json::to_string(dashboard)
        .map_err(|e| ApiError::internal(format!("Failed to encode dashboard: {e}")))?;
    Ok(format!(
        "You are reviewing the back-office figures of {store}. Amounts are in {currency} \
         minor units. Point out trends, best sellers, products to restock and anything \
         unusual.\n\n{figures}",
        store = config.store_name(),
        currency = config.config().store.currency_code,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use tally_core::EntityId;
    use tally_insights::InsightsConfig;
    use tally_store::seed::demo_store;
    use tokio::net::TcpListener;

    async fn insights(Json(body): Json<Value>) -> Json<Value> {
        let prompt = body["prompt"].as_str().unwrap_or_default();
        let mentions_store = prompt.contains("Tally Demo Store");
        Json(json!({ "text": format!("store named: {mentions_store}") }))
    }

    async fn chat(Json(body): Json<Value>) -> Json<Value> {
        let turns = body["history"].as_array().map_or(0, Vec::len);
        Json(json!({ "text": format!("{turns} earlier turns") }))
    }

    async fn spawn_proxy(ok: bool) -> String {
        let app = if ok {
            Router::new()
                .route("/api/insights", post(insights))
                .route("/api/chat", post(chat))
        } else {
            Router::new().route(
                "/api/insights",
                post(|| async {
                    (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "error": "busy" })))
                }),
            )
        };
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });
        format!("http://{addr}")
    }

    fn as_user(id: &str) -> StoreState {
        let state = StoreState::new(demo_store(chrono::Utc::now()));
        state.session(|s| s.sign_in_as(&EntityId::from(id))).unwrap();
        state
    }

    fn client(base: &str) -> InsightsState {
        InsightsState::new(&InsightsConfig::default().with_base_url(base)).unwrap()
    }

    #[tokio::test]
    async fn test_insights_prompt_carries_store_figures() {
        let base = spawn_proxy(true).await;
        let store = as_user("user-manager");

        let text = request_insights(&store, &ConfigState::default(), &client(&base))
            .await
            .unwrap();
        assert_eq!(text, "store named: true");
    }

    #[tokio::test]
    async fn test_cashier_cannot_chat() {
        let base = spawn_proxy(true).await;
        let store = as_user("user-cashier");

        let err = send_chat_message(&store, &client(&base), vec![], "hi".into())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn test_chat_forwards_history() {
        let base = spawn_proxy(true).await;
        let store = as_user("user-admin");
        let history = vec![ChatMessage::user("hi"), ChatMessage::model("hello")];

        let text = send_chat_message(&store, &client(&base), history, "top product?".into())
            .await
            .unwrap();
        assert_eq!(text, "2 earlier turns");

        let err = send_chat_message(&store, &client(&base), vec![], "   ".into())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_proxy_failure_is_external_service() {
        let base = spawn_proxy(false).await;
        let store = as_user("user-admin");

        let err = request_insights(&store, &ConfigState::default(), &client(&base))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ExternalService);
        assert_eq!(err.message, "busy");
    }
}

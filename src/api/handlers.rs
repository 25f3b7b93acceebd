use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info};

use crate::api::models::{ChatMessage, ChatResponse, ErrorResponse, Role};
use crate::error::ApiError;
use crate::{augment, communities, crawler, AppState};

const REFERENCE_PREAMBLE: &str =
    "Use the following reference content if it is relevant to the user's question:";

/// The whole request pipeline: rate limit, validate, crawl matched
/// community pages, call the completion endpoint, augment the reply.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let ip = client_ip(&headers, connect_info.map(|ConnectInfo(addr)| addr));
    if !state.quota.try_acquire(&ip, Utc::now().date_naive()) {
        return Err(ApiError::RateLimited);
    }

    let Json(body) = body.map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {e}")))?;
    let mut messages: Vec<ChatMessage> = body
        .get("messages")
        .cloned()
        .and_then(|value| serde_json::from_value(value).ok())
        .ok_or_else(|| ApiError::BadRequest("Invalid messages format".to_string()))?;

    let latest_user_message = messages
        .iter()
        .rev()
        .find(|m| m.role == Role::User)
        .map(|m| m.content.clone())
        .unwrap_or_default();

    let pages = communities::matching_pages(&state.pages, &latest_user_message);
    if !pages.is_empty() {
        let content = crawler::reference_content(&state.http, &pages, state.crawl_timeout).await;
        if !content.is_empty() {
            messages.push(ChatMessage::system(format!(
                "{REFERENCE_PREAMBLE}\n\n{content}"
            )));
        }
    }

    info!(ip = %ip, messages = messages.len(), "forwarding conversation to completion endpoint");
    let reply = state.completion.chat(&messages).await?;

    let content = augment::augment_reply(reply.content, &latest_user_message, &state.pages);
    debug!(reply_chars = content.len(), "returning augmented reply");

    Ok(Json(ChatResponse {
        result: ChatMessage {
            role: Role::Assistant,
            content,
        },
    }))
}

/// First forwarded-for hop when present, else the transport peer.
fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| match peer {
            Some(addr) => addr.ip().to_string(),
            None => "unknown".to_string(),
        })
}

pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found".to_string(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::client_ip;
    use axum::http::HeaderMap;

    fn peer() -> Option<std::net::SocketAddr> {
        Some("10.0.0.1:443".parse().unwrap())
    }

    #[test]
    fn forwarded_for_takes_first_hop() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "1.2.3.4, 5.6.7.8".parse().unwrap());
        assert_eq!(client_ip(&headers, peer()), "1.2.3.4");
    }

    #[test]
    fn empty_forwarded_for_falls_back_to_peer() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "".parse().unwrap());
        assert_eq!(client_ip(&headers, peer()), "10.0.0.1");
    }

    #[test]
    fn missing_everything_uses_sentinel() {
        assert_eq!(client_ip(&HeaderMap::new(), None), "unknown");
    }
}

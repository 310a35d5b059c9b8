//! HTTP implementation of the backend gateway (JSON over reqwest).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::config::ClientConfig;
use crate::error::BackendError;
use crate::onboarding::AthleteProfile;

use super::BackendGateway;
use super::types::{
    ChatMode, ChatRequest, ChatResponse, CoachReply, HealthReport, ProfileAck, ProfileRequest,
};

const HEALTH_PATH: &str = "/api/health";
const PROFILE_CREATE_PATH: &str = "/api/profile/create";
const CHAT_PATH: &str = "/api/chat";

/// Fallback shown when a failed response carries no usable detail.
const GENERIC_FAILURE: &str = "Failed to get response from Coach Carter";

/// Talks to the coaching backend at a fixed base URL.
pub struct HttpGateway {
    base_url: String,
    client: reqwest::Client,
    query_timeout: Duration,
    health_timeout: Duration,
}

impl HttpGateway {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            base_url: config.api_base.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            query_timeout: config.query_timeout,
            health_timeout: config.health_timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send a prepared request, mapping transport failures and non-2xx
    /// statuses to `BackendError`.
    async fn execute(
        &self,
        endpoint: &str,
        request: reqwest::RequestBuilder,
        timeout: Duration,
    ) -> Result<reqwest::Response, BackendError> {
        tracing::debug!(endpoint, "Sending backend request");
        let response = request
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| transport_error(endpoint, timeout, e))?;

        if response.status().is_success() {
            return Ok(response);
        }
        Err(status_error(endpoint, response).await)
    }
}

#[async_trait]
impl BackendGateway for HttpGateway {
    async fn check_health(&self) -> bool {
        let request = self.client.get(self.url(HEALTH_PATH));
        match self.execute(HEALTH_PATH, request, self.health_timeout).await {
            Ok(response) => {
                // The body is informational only.
                let report: HealthReport = response.json().await.unwrap_or_default();
                tracing::info!(
                    status = report.status.as_deref().unwrap_or("unknown"),
                    ai_engine = report.ai_engine.as_deref().unwrap_or("unknown"),
                    risk_module = report.risk_module.as_deref().unwrap_or("unknown"),
                    "Backend is reachable"
                );
                true
            }
            Err(e) => {
                tracing::warn!("Backend health check failed: {}", e);
                false
            }
        }
    }

    async fn submit_profile(
        &self,
        user_id: &str,
        profile: &AthleteProfile,
    ) -> Result<ProfileAck, BackendError> {
        let body = ProfileRequest {
            user_id,
            profile,
            available_equipment: Vec::new(),
            dietary_restrictions: Vec::new(),
        };
        let request = self.client.post(self.url(PROFILE_CREATE_PATH)).json(&body);
        let response = self
            .execute(PROFILE_CREATE_PATH, request, self.query_timeout)
            .await?;

        // No response shape is required; an unreadable body still counts.
        let text = response.text().await.unwrap_or_default();
        let ack: ProfileAck = serde_json::from_str(&text).unwrap_or_default();
        tracing::info!(user_id, success = ack.success, message = %ack.message, "Profile submitted");
        Ok(ack)
    }

    async fn send_query(
        &self,
        text: &str,
        user_id: &str,
        mode: ChatMode,
    ) -> Result<CoachReply, BackendError> {
        let body = ChatRequest {
            text,
            user_id,
            mode,
        };
        let request = self.client.post(self.url(CHAT_PATH)).json(&body);
        let response = self.execute(CHAT_PATH, request, self.query_timeout).await?;

        let raw = response
            .text()
            .await
            .map_err(|e| transport_error(CHAT_PATH, self.query_timeout, e))?;
        let parsed: ChatResponse =
            serde_json::from_str(&raw).map_err(|e| BackendError::InvalidResponse {
                endpoint: CHAT_PATH.to_string(),
                reason: e.to_string(),
            })?;
        tracing::debug!(
            user_id,
            %mode,
            risk_scores = parsed.risk_scores.len(),
            links = parsed.youtube_links.len(),
            "Coach replied"
        );
        Ok(parsed.into())
    }

    async fn fetch_profile(&self, user_id: &str) -> Result<Option<AthleteProfile>, BackendError> {
        let path = format!("/api/profile/{user_id}");
        let response = self
            .client
            .get(self.url(&path))
            .timeout(self.query_timeout)
            .send()
            .await
            .map_err(|e| transport_error(&path, self.query_timeout, e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(status_error(&path, response).await);
        }

        let raw = response
            .text()
            .await
            .map_err(|e| transport_error(&path, self.query_timeout, e))?;
        serde_json::from_str::<Option<AthleteProfile>>(&raw).map_err(|e| {
            BackendError::InvalidResponse {
                endpoint: path.clone(),
                reason: e.to_string(),
            }
        })
    }
}

fn transport_error(endpoint: &str, timeout: Duration, e: reqwest::Error) -> BackendError {
    if e.is_timeout() {
        BackendError::Timeout {
            endpoint: endpoint.to_string(),
            timeout,
        }
    } else {
        BackendError::Transport {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        }
    }
}

async fn status_error(endpoint: &str, response: reqwest::Response) -> BackendError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let detail = extract_detail(&body).unwrap_or_else(|| GENERIC_FAILURE.to_string());
    tracing::warn!(endpoint, status = status.as_u16(), %detail, "Backend request failed");
    BackendError::Status {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        detail,
    }
}

/// Pull a human-readable message out of an error body.
///
/// Handles `{"detail": "..."}` and the list form used for request
/// validation failures (`{"detail": [{"msg": "..."}]}`).
pub(crate) fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        serde_json::Value::String(_) | serde_json::Value::Null => None,
        serde_json::Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        other => Some(other.to_string()),
    }
}

//! REST client for the notification collection endpoint.
//!
//! Retries network failures and 5xx responses with exponential backoff;
//! 4xx responses fail immediately.

use std::time::Duration;

use chrono::{DateTime, Utc};
use futures_util::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use aula_core::config::NotificationConfig;
use aula_core::errors::{ApiError, AulaError, AulaResult};
use aula_core::models::{Notification, NotificationPriority, NotificationStatusFilter, NotificationType};

use crate::state::ReadTarget;

/// Server operations the stream client depends on.
pub trait INotificationApi: Send + Sync {
    fn list(
        &self,
        status: NotificationStatusFilter,
        limit: usize,
    ) -> BoxFuture<'_, AulaResult<Vec<Notification>>>;

    fn mark_read<'a>(&'a self, target: &'a ReadTarget) -> BoxFuture<'a, AulaResult<()>>;

    fn create<'a>(&'a self, payload: &'a NewNotification) -> BoxFuture<'a, AulaResult<Notification>>;
}

/// Creation payload for `POST /api/notifications`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub priority: NotificationPriority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    notifications: Vec<Notification>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MarkReadRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    notification_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mark_all: Option<bool>,
}

impl From<&ReadTarget> for MarkReadRequest {
    fn from(target: &ReadTarget) -> Self {
        match target {
            ReadTarget::Ids(ids) => Self {
                notification_ids: Some(ids.clone()),
                mark_all: None,
            },
            ReadTarget::All => Self {
                notification_ids: None,
                mark_all: Some(true),
            },
        }
    }
}

#[derive(Debug)]
pub struct NotificationApi {
    client: reqwest::Client,
    url: String,
    bearer_token: Option<String>,
    max_retries: u32,
    initial_backoff: Duration,
    max_backoff: Duration,
}

impl NotificationApi {
    pub fn new(config: &NotificationConfig) -> AulaResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .gzip(true)
            .build()
            .map_err(|e| network(e.to_string()))?;
        Ok(Self {
            client,
            url: config.notifications_url(),
            bearer_token: None,
            max_retries: config.max_retries,
            initial_backoff: Duration::from_millis(config.retry_initial_backoff_ms),
            max_backoff: Duration::from_millis(config.retry_max_backoff_ms),
        })
    }

    /// Set the bearer token for authenticated requests.
    pub fn set_bearer_token(&mut self, token: String) {
        self.bearer_token = Some(token);
    }

    pub fn clear_bearer_token(&mut self) {
        self.bearer_token = None;
    }

    pub fn list_url(&self, status: NotificationStatusFilter, limit: usize) -> String {
        format!("{}?status={}&limit={}", self.url, status.as_str(), limit)
    }

    /// Unified retry loop for any method. Returns the response body.
    async fn send(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<&(impl Serialize + Sync)>,
    ) -> AulaResult<String> {
        let mut backoff = self.initial_backoff;
        let mut last_err = String::new();

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                tracing::debug!(
                    "notifications api: retry attempt {}/{} after {:?}",
                    attempt,
                    self.max_retries,
                    backoff
                );
                tokio::time::sleep(backoff).await;
                backoff = (backoff * 2).min(self.max_backoff);
            }

            let mut req = self.client.request(method.clone(), url);
            if let Some(b) = body {
                req = req.json(b);
            }
            if let Some(token) = &self.bearer_token {
                req = req.bearer_auth(token);
            }

            match req.send().await {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        return resp.text().await.map_err(|e| network(e.to_string()));
                    }
                    if status.is_client_error() {
                        let body = resp.text().await.unwrap_or_default();
                        return Err(ApiError::Status {
                            status: status.as_u16(),
                            body,
                        }
                        .into());
                    }
                    last_err = format!("HTTP {status}");
                }
                Err(e) => {
                    last_err = e.to_string();
                }
            }
        }

        Err(ApiError::RetriesExhausted {
            retries: self.max_retries,
            last_error: last_err,
        }
        .into())
    }
}

impl INotificationApi for NotificationApi {
    fn list(
        &self,
        status: NotificationStatusFilter,
        limit: usize,
    ) -> BoxFuture<'_, AulaResult<Vec<Notification>>> {
        Box::pin(async move {
            let url = self.list_url(status, limit);
            let body = self.send(reqwest::Method::GET, &url, None::<&()>).await?;
            let resp: ListResponse = decode(&body)?;
            Ok(resp.notifications)
        })
    }

    fn mark_read<'a>(&'a self, target: &'a ReadTarget) -> BoxFuture<'a, AulaResult<()>> {
        Box::pin(async move {
            let request = MarkReadRequest::from(target);
            self.send(reqwest::Method::PATCH, &self.url, Some(&request))
                .await?;
            Ok(())
        })
    }

    fn create<'a>(&'a self, payload: &'a NewNotification) -> BoxFuture<'a, AulaResult<Notification>> {
        Box::pin(async move {
            let body = self
                .send(reqwest::Method::POST, &self.url, Some(payload))
                .await?;
            decode(&body)
        })
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> AulaResult<T> {
    serde_json::from_str(body).map_err(|e| {
        ApiError::Deserialization {
            reason: e.to_string(),
        }
        .into()
    })
}

fn network(reason: String) -> AulaError {
    ApiError::Network { reason }.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_read_payloads() {
        let ids = serde_json::to_value(MarkReadRequest::from(&ReadTarget::Ids(vec!["n1".into()])))
            .unwrap();
        assert_eq!(ids, serde_json::json!({ "notificationIds": ["n1"] }));

        let all = serde_json::to_value(MarkReadRequest::from(&ReadTarget::All)).unwrap();
        assert_eq!(all, serde_json::json!({ "markAll": true }));
    }

    #[test]
    fn list_url_carries_filter_and_limit() {
        let api = NotificationApi::new(&NotificationConfig::default()).unwrap();
        assert_eq!(
            api.list_url(NotificationStatusFilter::Unread, 50),
            "http://localhost:3000/api/notifications?status=unread&limit=50"
        );
    }
}

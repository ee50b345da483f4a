//! Firebase Cloud Messaging HTTP v1 transport.
//!
//! Credentials are an OAuth2 access token obtained by the process that runs
//! the job; minting tokens from a service account is outside this crate.

use std::time::Duration;

use classbell_core::config::PushConfig;
use futures::future::BoxFuture;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{DeliveryError, PushTransport};
use crate::error::{ServiceError, ServiceResult};
use crate::message::OutboundMessage;

#[derive(Debug, Clone)]
pub struct FcmTransport {
    http: reqwest::Client,
    endpoint: String,
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: ErrorBody,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    status: String,
    #[serde(default)]
    details: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDetail {
    error_code: Option<String>,
}

impl FcmTransport {
    #[must_use]
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        project_id: &str,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            http,
            endpoint: format!(
                "{}/v1/projects/{project_id}/messages:send",
                base_url.trim_end_matches('/')
            ),
            access_token: access_token.into(),
        }
    }

    /// ## Summary
    /// Builds the transport from the `push` settings section.
    ///
    /// ## Errors
    /// Returns `ServiceError::InvalidConfiguration` if the project id or access
    /// token is missing.
    pub fn from_config(http: reqwest::Client, config: &PushConfig) -> ServiceResult<Self> {
        let project_id = config
            .project_id
            .as_deref()
            .ok_or_else(|| ServiceError::InvalidConfiguration("push.project_id".to_string()))?;
        let access_token = config
            .access_token
            .as_deref()
            .ok_or_else(|| ServiceError::InvalidConfiguration("push.access_token".to_string()))?;

        Ok(Self::new(http, &config.base_url, project_id, access_token))
    }

    async fn deliver(&self, message: &OutboundMessage) -> Result<String, DeliveryError> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.access_token)
            .json(&request_body(message))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let sent = response.json::<SendResponse>().await?;
            return Ok(sent.name);
        }

        let envelope = response.json::<ErrorEnvelope>().await.unwrap_or_default();
        let error_code = envelope
            .error
            .details
            .into_iter()
            .find_map(|detail| detail.error_code);

        // A 403 with an FCM error code (e.g. SENDER_ID_MISMATCH) concerns the
        // token, not the credentials.
        let credentials_refused = status == reqwest::StatusCode::UNAUTHORIZED
            || (status == reqwest::StatusCode::FORBIDDEN && error_code.is_none());
        if credentials_refused {
            return Err(DeliveryError::Unauthorized {
                status: status.as_u16(),
            });
        }

        let code = error_code
            .or_else(|| Some(envelope.error.status).filter(|s| !s.is_empty()))
            .unwrap_or_else(|| "UNKNOWN".to_string());

        Err(DeliveryError::Rejected {
            status: status.as_u16(),
            code,
        })
    }
}

impl PushTransport for FcmTransport {
    fn send<'a>(&'a self, message: &'a OutboundMessage) -> BoxFuture<'a, Result<String, DeliveryError>> {
        Box::pin(self.deliver(message))
    }
}

/// ## Summary
/// Renders the `messages:send` request body.
///
/// High priority on both platforms so the reminder can wake the device.
#[must_use]
pub fn request_body(message: &OutboundMessage) -> Value {
    json!({
        "message": {
            "token": message.recipient,
            "notification": {
                "title": message.title,
                "body": message.body,
            },
            "android": {
                "priority": "high",
                "ttl": ttl_string(message.ttl),
                "notification": {
                    "channel_id": message.android_channel_id,
                    "sound": "default",
                },
            },
            "apns": {
                "headers": { "apns-priority": "10" },
                "payload": {
                    "aps": {
                        "alert": {
                            "title": message.title,
                            "body": message.body,
                        },
                        "sound": "default",
                    },
                },
            },
            "data": message.data,
        }
    })
}

fn ttl_string(ttl: Duration) -> String {
    format!("{}s", ttl.as_secs())
}

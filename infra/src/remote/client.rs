//! HTTP client for the backend verification endpoints

use async_trait::async_trait;
use chrono::Utc;
use raseed_core::domain::value_objects::{AuthorityKind, DeliveryToken};
use raseed_core::errors::VerificationError;
use raseed_core::services::verification::{SendPurpose, VerificationAuthority};
use raseed_shared::config::RemoteAuthorityConfig;
use raseed_shared::utils::mask_email;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::types::{
    RemoteErrorBody, RemoteMessageResponse, RemoteSendRequest, RemoteStatusRequest,
    RemoteVerifiedResponse, RemoteVerifyRequest,
};
use crate::InfrastructureError;

const DEFAULT_SENT_MESSAGE: &str = "Verification email sent";

/// Remote authority backed by the backend REST API
///
/// No retries are performed. A request timeout is applied only when one is
/// configured.
pub struct RemoteVerificationAuthority {
    client: reqwest::Client,
    config: RemoteAuthorityConfig,
    base_url: String,
}

impl RemoteVerificationAuthority {
    /// Create a client for the configured backend
    ///
    /// # Errors
    ///
    /// Returns `InfrastructureError::Config` when no base URL is configured.
    pub fn new(config: RemoteAuthorityConfig) -> Result<Self, InfrastructureError> {
        let base_url = config
            .base_url
            .clone()
            .ok_or_else(|| InfrastructureError::Config("VERIFICATION_API_URL is not set".to_string()))?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        self.config
            .endpoint(path)
            .unwrap_or_else(|| format!("{}{}", self.base_url, path))
    }

    /// POST `body` and decode a success answer
    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, VerificationError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Default,
    {
        let (status, text) = self.send_request(path, body).await?;
        if text.trim().is_empty() {
            return Ok(T::default());
        }
        serde_json::from_str(&text).map_err(|e| VerificationError::RemoteRejected {
            status,
            message: format!("Malformed response: {}", e),
        })
    }

    /// POST `body` and decode a `{verified}` answer; the field is required
    async fn post_verified<B>(&self, path: &str, body: &B) -> Result<bool, VerificationError>
    where
        B: Serialize + Sync,
    {
        let (status, text) = self.send_request(path, body).await?;
        serde_json::from_str::<RemoteVerifiedResponse>(&text)
            .map(|answer| answer.verified)
            .map_err(|e| VerificationError::RemoteRejected {
                status,
                message: format!("Malformed response: {}", e),
            })
    }

    async fn send_request<B>(&self, path: &str, body: &B) -> Result<(u16, String), VerificationError>
    where
        B: Serialize + Sync,
    {
        let url = self.endpoint(path);
        debug!(url = %url, "Calling remote verification endpoint");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, event = "remote_unreachable", "Remote verification endpoint unreachable");
                VerificationError::NetworkUnavailable(e.to_string())
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| VerificationError::NetworkUnavailable(e.to_string()))?;

        if status.is_success() {
            return Ok((status.as_u16(), text));
        }

        let message = serde_json::from_str::<RemoteErrorBody>(&text)
            .ok()
            .and_then(RemoteErrorBody::into_message)
            .or_else(|| status.canonical_reason().map(str::to_string))
            .unwrap_or_else(|| "Request failed".to_string());

        warn!(
            url = %url,
            status = status.as_u16(),
            error = %message,
            event = "remote_rejected",
            "Remote verification endpoint rejected the request"
        );

        Err(VerificationError::RemoteRejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl VerificationAuthority for RemoteVerificationAuthority {
    fn kind(&self) -> AuthorityKind {
        AuthorityKind::Remote
    }

    fn name(&self) -> &str {
        "remote"
    }

    async fn send_code(
        &self,
        email: &str,
        display_name: Option<&str>,
        purpose: SendPurpose,
    ) -> Result<DeliveryToken, VerificationError> {
        let path = match purpose {
            SendPurpose::Initial => &self.config.send_path,
            SendPurpose::Resend => &self.config.resend_path,
        };
        let request = RemoteSendRequest {
            email: email.to_string(),
            display_name: display_name.map(str::to_string),
        };

        let answer: RemoteMessageResponse = self.post(path, &request).await?;

        debug!(email = %mask_email(email), purpose = ?purpose, "Remote authority sent verification code");
        Ok(DeliveryToken::remote(
            answer
                .message
                .unwrap_or_else(|| DEFAULT_SENT_MESSAGE.to_string()),
            Utc::now(),
        ))
    }

    async fn verify_code(&self, email: &str, code: &str) -> Result<bool, VerificationError> {
        let request = RemoteVerifyRequest {
            email: email.to_string(),
            code: code.to_string(),
        };
        self.post_verified(&self.config.verify_path, &request).await
    }

    async fn check_status(&self, email: &str) -> Result<bool, VerificationError> {
        let request = RemoteStatusRequest {
            email: email.to_string(),
        };
        self.post_verified(&self.config.status_path, &request).await
    }
}

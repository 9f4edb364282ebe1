//! EmailJS delivery over its REST API

use async_trait::async_trait;
use raseed_core::services::verification::{EmailDelivery, EmailMessage};
use raseed_shared::config::EmailConfig;
use raseed_shared::utils::mask_email;
use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::InfrastructureError;

/// EmailJS credentials and endpoint
#[derive(Debug, Clone)]
pub struct EmailJsConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub api_url: String,
}

impl EmailJsConfig {
    /// Extract EmailJS settings; `None` when any credential is missing
    pub fn from_email_config(config: &EmailConfig) -> Option<Self> {
        Some(Self {
            service_id: config.service_id.clone()?,
            template_id: config.template_id.clone()?,
            public_key: config.public_key.clone()?,
            api_url: config.api_url.clone(),
        })
    }
}

#[derive(Debug, Serialize)]
struct EmailJsRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

#[derive(Debug, Serialize)]
struct TemplateParams<'a> {
    to_email: &'a str,
    to_name: &'a str,
    verification_code: String,
    subject: &'a str,
    message: &'a str,
}

/// Email service sending through EmailJS
pub struct EmailJsService {
    client: reqwest::Client,
    config: EmailJsConfig,
}

impl EmailJsService {
    pub fn new(config: EmailJsConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub async fn send(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        let request = EmailJsRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            template_params: TemplateParams {
                to_email: &message.to_email,
                to_name: &message.to_name,
                verification_code: message.code().unwrap_or_default(),
                subject: &message.subject,
                message: &message.text_body,
            },
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                provider = "emailjs",
                email = %mask_email(&message.to_email),
                status = status.as_u16(),
                body = %body,
                "EmailJS rejected the message"
            );
            return Err(InfrastructureError::Email(format!(
                "EmailJS returned {}: {}",
                status.as_u16(),
                body
            )));
        }

        let message_id = format!("emailjs_{}", Uuid::new_v4());
        info!(
            target: "email_service",
            provider = "emailjs",
            email = %mask_email(&message.to_email),
            message_id = %message_id,
            "Email sent successfully"
        );
        Ok(message_id)
    }
}

#[async_trait]
impl EmailDelivery for EmailJsService {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, String> {
        self.send(message).await.map_err(|e| e.to_string())
    }

    fn provider_name(&self) -> &str {
        "emailjs"
    }
}

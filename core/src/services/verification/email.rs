//! Verification email rendering

use once_cell::sync::Lazy;
use regex::Regex;

/// Name used in the greeting when the caller has none
pub const DEFAULT_DISPLAY_NAME: &str = "User";

static CODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{6}\b").expect("code regex is valid"));

/// An outgoing email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to_email: String,
    pub to_name: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

impl EmailMessage {
    /// Render the verification email carrying `code`
    ///
    /// # Arguments
    ///
    /// * `email` - Recipient address
    /// * `code` - The 6-digit verification code
    /// * `display_name` - Greeting name; blank or missing uses [`DEFAULT_DISPLAY_NAME`]
    /// * `expiry_minutes` - Validity window shown to the recipient
    /// * `app_name` - Product name used in subject and sign-off
    pub fn verification(
        email: &str,
        code: &str,
        display_name: Option<&str>,
        expiry_minutes: i64,
        app_name: &str,
    ) -> Self {
        let name = display_name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_DISPLAY_NAME);

        let subject = format!("{} - Your Verification Code", app_name);

        let text_body = format!(
            "Hello {name},\n\n\
             Your verification code for {app} is: {code}\n\n\
             This code will expire in {minutes} minutes.\n\n\
             If you didn't request this code, please ignore this email.\n\n\
             Best regards,\n\
             The {app} Team",
            name = name,
            app = app_name,
            code = code,
            minutes = expiry_minutes,
        );

        let html_body = format!(
            "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
             <h2>{app} Verification</h2>\
             <p>Hello {name},</p>\
             <p>Your verification code is:</p>\
             <p style=\"font-size: 32px; font-weight: bold; letter-spacing: 8px;\">{code}</p>\
             <p>This code will expire in {minutes} minutes.</p>\
             <p>If you didn't request this code, please ignore this email.</p>\
             <p>Best regards,<br>The {app} Team</p>\
             </div>",
            name = name,
            app = app_name,
            code = code,
            minutes = expiry_minutes,
        );

        Self {
            to_email: email.to_string(),
            to_name: name.to_string(),
            subject,
            html_body,
            text_body,
        }
    }

    /// The verification code carried by this message, if any
    pub fn code(&self) -> Option<String> {
        extract_code(&self.text_body)
    }
}

/// Extract the first standalone 6-digit number from a text
pub fn extract_code(text: &str) -> Option<String> {
    CODE_REGEX.find(text).map(|m| m.as_str().to_string())
}

use raseed_core::domain::value_objects::AuthorityKind;
use raseed_core::services::verification::VerificationState;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendCodeRequest {
    /// Address the verification code is sent to
    #[validate(email)]
    pub email: String,

    /// Name used in the email greeting
    #[serde(default)]
    #[validate(length(max = 100))]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCodeResponse {
    pub message: String,
    /// Which authority sent the code
    pub channel: AuthorityKind,
    /// Seconds the code stays valid
    pub expires_in: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    #[validate(email)]
    pub email: String,

    /// 6-digit verification code
    #[validate(length(equal = 6))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCodeResponse {
    pub verified: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StatusQuery {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub email: String,
    pub verified: bool,
    pub state: VerificationState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeRemainingResponse {
    pub seconds_remaining: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignOutResponse {
    pub message: String,
}

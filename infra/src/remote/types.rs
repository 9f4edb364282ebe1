//! Wire types of the backend verification endpoints

use serde::{Deserialize, Serialize};

/// Body of the send and resend endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSendRequest {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteVerifyRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteStatusRequest {
    pub email: String,
}

/// Acknowledgment of a send or resend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteMessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Answer of the verify and status endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteVerifiedResponse {
    pub verified: bool,
}

/// Error body; the backend uses either `error` or `message`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl RemoteErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.error.or(self.message)
    }
}

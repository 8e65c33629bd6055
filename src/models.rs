//! Wire models for the LemiPay auth API

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for `POST /api/auth/challenge`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeRequest {
    #[validate(length(min = 1))]
    pub public_key: String,
}

/// Response body for `POST /api/auth/challenge`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeResponse {
    pub challenge: String,
    /// Unix epoch milliseconds.
    pub expires_at: i64,
    pub network_passphrase: String,
}

/// Request body for `POST /api/auth/verify`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    #[validate(length(min = 1))]
    pub public_key: String,
    /// Base64-encoded wallet signature over the challenge.
    #[validate(length(min = 1))]
    pub signed_message: String,
    #[validate(length(min = 1))]
    pub challenge: String,
    pub display_name: Option<String>,
}

/// Response body for `POST /api/auth/verify`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub success: bool,
    pub public_key: String,
}

/// Response body for `GET /api/auth/session`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub public_key: String,
}

/// Response body for `POST /api/auth/logout`.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Error envelope shared by all endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

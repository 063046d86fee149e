use serde::{Deserialize, Serialize};

/// A recorded visit via a tracked referral code. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralHit {
    /// Unique identifier (UUIDv4, no dashes).
    pub id: String,

    /// Referral code from the visited link.
    pub code: String,

    /// Visitor's User-Agent header, if sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Caller IP as seen by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,

    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

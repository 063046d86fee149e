use serde::{Deserialize, Serialize};

/// A landing-page form submission. Immutable once stored.
///
/// JSON uses camelCase to match the wire format the frontend already
/// speaks (`sessionId`, `resolvedCity`, `createdAt`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    /// Unique identifier (UUIDv4, no dashes).
    pub id: String,

    /// Submitted full name.
    pub name: String,

    /// Submitted mobile number (digits, optional leading +).
    pub mobile: String,

    /// Submitted email address.
    pub email: String,

    /// Self-reported city from the form, if given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Browser session id, used to match a previously stored UserLocation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// City copied from the UserLocation matching `session_id`, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_city: Option<String>,

    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// Input for submitting a new lead.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLead {
    pub name: String,
    pub mobile: String,
    pub email: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

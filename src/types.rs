//! Wire types for the passlink REST backend.
//!
//! Field names follow the server's JSON contract exactly; everything here
//! is a flat record with no derived invariants.

use serde::{Deserialize, Serialize};

/// An account as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub display_name: String,
}

/// A stored credential entry owned by one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordRecord {
    pub id: u64,
    pub title: String,
    pub username: String,
    pub password: String,
    pub url: String,
    /// Owning account. Present on fetch responses; some create/update
    /// responses omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// A share grant linking a collaborator to one of the owner's records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareGrant {
    pub id: u64,
    pub password_record: PasswordRecord,
    pub owner: User,
    pub collaborator: User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

/// Response to both login and register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

/// Body for `PUT /auth/update`. The new password fields are only sent when
/// the user actually changes the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: String,
    pub email: String,
    pub current_password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_confirmation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: User,
}

/// Body for creating and updating password records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPayload {
    pub title: String,
    pub username: String,
    pub password: String,
    pub url: String,
}

/// Server-side search parameters for the record listing.
///
/// Each fragment is matched by the server against the corresponding field;
/// how the server combines them is backend-defined and passed through
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_by_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_by_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_by_url: Option<String>,
}

impl RecordFilter {
    /// A filter with every field set to the same fragment, the way the
    /// search bar submits a single query.
    pub fn query(fragment: impl Into<String>) -> Self {
        let fragment = fragment.into();
        Self {
            search_by_title: Some(fragment.clone()),
            search_by_username: Some(fragment.clone()),
            search_by_url: Some(fragment),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.search_by_title.is_none()
            && self.search_by_username.is_none()
            && self.search_by_url.is_none()
    }
}

/// Response to the record listing: records the caller owns and records
/// shared with the caller, as disjoint collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRecordsResponse {
    pub owner_records: Vec<PasswordRecord>,
    pub shared_records: Vec<PasswordRecord>,
}

/// Body for creating a share grant. Omitting `password_record_id` grants
/// access to all current and future owned records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareRequest {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_record_id: Option<u64>,
}

/// Body for revoking a single grant, addressed by collaborator email and
/// record id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteShareRequest {
    pub email: String,
    pub password_record_id: u64,
}

//! Share-grant state machine.
//!
//! Two independent read views (grants received, grants given) plus
//! create/delete mutations. Revoking a single grant is addressed by the
//! (collaborator email, record id) pair the delete endpoint takes.

use std::collections::BTreeMap;

use crate::types::{DeleteShareRequest, ShareGrant};

/// Actions consumed by the sharing slice.
#[derive(Debug, Clone, PartialEq)]
pub enum SharingAction {
    FetchWithMeRequest,
    FetchWithMeSuccess(Vec<ShareGrant>),
    FetchWithMeFailure(String),

    FetchByMeRequest,
    FetchByMeSuccess(Vec<ShareGrant>),
    FetchByMeFailure(String),

    CreateRequest,
    CreateSuccess(ShareGrant),
    CreateFailure(String),

    DeleteRequest,
    DeleteSuccess(DeleteShareRequest),
    DeleteFailure(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SharingState {
    /// Grants other accounts gave the current account.
    pub shared_with_me: Vec<ShareGrant>,
    /// Grants the current account gave out.
    pub shared_by_me: Vec<ShareGrant>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl SharingState {
    pub fn reduce(&mut self, action: SharingAction) {
        match action {
            SharingAction::FetchWithMeRequest
            | SharingAction::FetchByMeRequest
            | SharingAction::CreateRequest
            | SharingAction::DeleteRequest => {
                self.is_loading = true;
                self.error = None;
            }

            SharingAction::FetchWithMeSuccess(grants) => {
                self.shared_with_me = grants;
                self.is_loading = false;
            }

            SharingAction::FetchByMeSuccess(grants) => {
                self.shared_by_me = grants;
                self.is_loading = false;
            }

            SharingAction::CreateSuccess(grant) => {
                self.shared_by_me.push(grant);
                self.is_loading = false;
            }

            SharingAction::DeleteSuccess(request) => {
                self.shared_by_me.retain(|grant| {
                    grant.collaborator.email != request.email
                        || grant.password_record.id != request.password_record_id
                });
                self.is_loading = false;
            }

            SharingAction::FetchWithMeFailure(message)
            | SharingAction::FetchByMeFailure(message)
            | SharingAction::CreateFailure(message)
            | SharingAction::DeleteFailure(message) => {
                self.error = Some(message);
                self.is_loading = false;
            }
        }
    }

    /// Grants given out, grouped by collaborator email (sorted for stable
    /// display). Used by the shares listing and revoke-all.
    pub fn by_collaborator(&self) -> BTreeMap<String, Vec<&ShareGrant>> {
        let mut grouped: BTreeMap<String, Vec<&ShareGrant>> = BTreeMap::new();
        for grant in &self.shared_by_me {
            grouped
                .entry(grant.collaborator.email.clone())
                .or_default()
                .push(grant);
        }
        grouped
    }

    /// Record ids currently granted to the given collaborator.
    pub fn granted_record_ids(&self, email: &str) -> Vec<u64> {
        self.shared_by_me
            .iter()
            .filter(|grant| grant.collaborator.email == email)
            .map(|grant| grant.password_record.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PasswordRecord, User};

    fn user(id: u64, email: &str) -> User {
        User {
            id,
            email: email.to_string(),
            display_name: format!("User {id}"),
        }
    }

    fn grant(id: u64, record_id: u64, collaborator_email: &str) -> ShareGrant {
        ShareGrant {
            id,
            password_record: PasswordRecord {
                id: record_id,
                title: format!("record {record_id}"),
                username: "u".to_string(),
                password: "p".to_string(),
                url: "https://example.com".to_string(),
                user: Some(user(1, "owner@x.com")),
            },
            owner: user(1, "owner@x.com"),
            collaborator: user(2, collaborator_email),
        }
    }

    #[test]
    fn test_fetch_views_are_independent() {
        let mut state = SharingState::default();
        state.reduce(SharingAction::FetchWithMeSuccess(vec![grant(1, 10, "me@x.com")]));
        state.reduce(SharingAction::FetchByMeSuccess(vec![
            grant(2, 20, "bob@x.com"),
            grant(3, 21, "bob@x.com"),
        ]));

        assert_eq!(state.shared_with_me.len(), 1);
        assert_eq!(state.shared_by_me.len(), 2);
    }

    #[test]
    fn test_create_appends_to_shared_by_me() {
        let mut state = SharingState::default();
        state.reduce(SharingAction::CreateRequest);
        assert!(state.is_loading);

        state.reduce(SharingAction::CreateSuccess(grant(1, 10, "bob@x.com")));
        assert_eq!(state.shared_by_me.len(), 1);
        assert!(!state.is_loading);
    }

    #[test]
    fn test_delete_removes_single_matching_grant() {
        let mut state = SharingState::default();
        state.reduce(SharingAction::FetchByMeSuccess(vec![
            grant(1, 10, "bob@x.com"),
            grant(2, 11, "bob@x.com"),
            grant(3, 10, "carol@x.com"),
        ]));

        state.reduce(SharingAction::DeleteSuccess(DeleteShareRequest {
            email: "bob@x.com".to_string(),
            password_record_id: 10,
        }));

        assert_eq!(state.shared_by_me.len(), 2);
        assert!(state.granted_record_ids("bob@x.com") == vec![11]);
        assert_eq!(state.granted_record_ids("carol@x.com"), vec![10]);
    }

    #[test]
    fn test_by_collaborator_groups_grants() {
        let mut state = SharingState::default();
        state.reduce(SharingAction::FetchByMeSuccess(vec![
            grant(1, 10, "bob@x.com"),
            grant(2, 11, "bob@x.com"),
            grant(3, 12, "alice@x.com"),
        ]));

        let grouped = state.by_collaborator();
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped["bob@x.com"].len(), 2);
        assert_eq!(grouped["alice@x.com"].len(), 1);
    }

    #[test]
    fn test_failure_retains_message() {
        let mut state = SharingState::default();
        state.reduce(SharingAction::DeleteRequest);
        state.reduce(SharingAction::DeleteFailure("nope".to_string()));

        assert_eq!(state.error.as_deref(), Some("nope"));
        assert!(!state.is_loading);
    }
}

//! Session state machine.
//!
//! States: anonymous, authenticating (loading), authenticated, error. The
//! machine only moves on dispatched actions; network outcomes arrive as
//! success/failure variants from the effect layer.

use crate::types::{LoginResponse, User};

/// Actions consumed by the auth slice.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    LoginRequest,
    LoginSuccess(LoginResponse),
    LoginFailure(String),

    RegisterRequest,
    RegisterSuccess(LoginResponse),
    RegisterFailure(String),

    LogoutRequest,
    LogoutSuccess,
    LogoutFailure(String),

    UpdateProfileRequest,
    UpdateProfileSuccess(User),
    UpdateProfileFailure(String),

    DeleteAccountRequest,
    DeleteAccountSuccess,
    DeleteAccountFailure(String),

    /// The server rejected a call as unauthenticated; the session is over
    /// regardless of what the user was doing.
    SessionExpired,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    /// Initial state: authenticated iff a persisted token exists. The user
    /// identity is filled in by the first successful authenticated call.
    pub fn hydrated(has_token: bool) -> Self {
        Self {
            is_authenticated: has_token,
            ..Self::default()
        }
    }

    pub fn reduce(&mut self, action: AuthAction) {
        match action {
            AuthAction::LoginRequest
            | AuthAction::RegisterRequest
            | AuthAction::LogoutRequest
            | AuthAction::UpdateProfileRequest
            | AuthAction::DeleteAccountRequest => {
                self.is_loading = true;
                self.error = None;
            }

            AuthAction::LoginSuccess(response) | AuthAction::RegisterSuccess(response) => {
                self.is_loading = false;
                self.is_authenticated = true;
                self.user = Some(response.user);
            }

            AuthAction::LogoutSuccess | AuthAction::DeleteAccountSuccess => {
                self.is_loading = false;
                self.is_authenticated = false;
                self.user = None;
                self.error = None;
            }

            AuthAction::UpdateProfileSuccess(user) => {
                self.is_loading = false;
                self.user = Some(user);
            }

            AuthAction::LoginFailure(message)
            | AuthAction::RegisterFailure(message)
            | AuthAction::LogoutFailure(message)
            | AuthAction::UpdateProfileFailure(message)
            | AuthAction::DeleteAccountFailure(message) => {
                self.is_loading = false;
                self.error = Some(message);
            }

            AuthAction::SessionExpired => {
                self.is_loading = false;
                self.is_authenticated = false;
                self.user = None;
            }
        }
    }
}

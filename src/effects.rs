//! Effect layer: turns requests into API calls and state transitions.
//!
//! Every request kind maps to exactly one HTTP call. The dispatcher applies
//! the request action, performs the call, and applies exactly one of the
//! success/failure actions — unless a newer request of the same kind has
//! superseded it, in which case the outcome is dropped. Token persistence
//! happens here, at the effect boundary: saved on login/register success,
//! cleared on logout, account deletion and session expiry.

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::session::SessionStore;
use crate::store::{Action, AuthAction, RecordsAction, RequestKind, SharingAction, Store};
use crate::types::{
    DeleteShareRequest, LoginRequest, RecordFilter, RecordPayload, RegisterRequest, ShareRequest,
    UpdateProfileRequest,
};

/// One request the effect layer can perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Login(LoginRequest),
    Register(RegisterRequest),
    Logout,
    UpdateProfile(UpdateProfileRequest),
    DeleteAccount,
    FetchRecords(RecordFilter),
    FetchRecord(u64),
    CreateRecord(RecordPayload),
    UpdateRecord(u64, RecordPayload),
    DeleteRecord(u64),
    FetchSharedWithMe,
    FetchSharedByMe,
    CreateShare(ShareRequest),
    DeleteShare(DeleteShareRequest),
}

impl Request {
    pub fn kind(&self) -> RequestKind {
        match self {
            Request::Login(_) => RequestKind::Login,
            Request::Register(_) => RequestKind::Register,
            Request::Logout => RequestKind::Logout,
            Request::UpdateProfile(_) => RequestKind::UpdateProfile,
            Request::DeleteAccount => RequestKind::DeleteAccount,
            Request::FetchRecords(_) => RequestKind::FetchRecords,
            Request::FetchRecord(_) => RequestKind::FetchRecord,
            Request::CreateRecord(_) => RequestKind::CreateRecord,
            Request::UpdateRecord(..) => RequestKind::UpdateRecord,
            Request::DeleteRecord(_) => RequestKind::DeleteRecord,
            Request::FetchSharedWithMe => RequestKind::FetchSharedWithMe,
            Request::FetchSharedByMe => RequestKind::FetchSharedByMe,
            Request::CreateShare(_) => RequestKind::CreateShare,
            Request::DeleteShare(_) => RequestKind::DeleteShare,
        }
    }

    /// The action marking this request as in flight.
    fn begin_action(&self) -> Action {
        match self {
            Request::Login(_) => Action::Auth(AuthAction::LoginRequest),
            Request::Register(_) => Action::Auth(AuthAction::RegisterRequest),
            Request::Logout => Action::Auth(AuthAction::LogoutRequest),
            Request::UpdateProfile(_) => Action::Auth(AuthAction::UpdateProfileRequest),
            Request::DeleteAccount => Action::Auth(AuthAction::DeleteAccountRequest),
            Request::FetchRecords(_) => Action::Records(RecordsAction::FetchAllRequest),
            Request::FetchRecord(_) => Action::Records(RecordsAction::FetchOneRequest),
            Request::CreateRecord(_) => Action::Records(RecordsAction::CreateRequest),
            Request::UpdateRecord(..) => Action::Records(RecordsAction::UpdateRequest),
            Request::DeleteRecord(_) => Action::Records(RecordsAction::DeleteRequest),
            Request::FetchSharedWithMe => Action::Sharing(SharingAction::FetchWithMeRequest),
            Request::FetchSharedByMe => Action::Sharing(SharingAction::FetchByMeRequest),
            Request::CreateShare(_) => Action::Sharing(SharingAction::CreateRequest),
            Request::DeleteShare(_) => Action::Sharing(SharingAction::DeleteRequest),
        }
    }
}

/// Outcome of a call: the action to apply, and whether the server rejected
/// the session.
struct Outcome {
    action: Action,
    unauthorized: bool,
}

impl Outcome {
    fn ok(action: Action) -> Self {
        Self {
            action,
            unauthorized: false,
        }
    }

    fn err(error: &ApiError, action: Action) -> Self {
        Self {
            action,
            unauthorized: error.is_unauthorized(),
        }
    }
}

/// Runs requests against the API and feeds the outcomes into the store.
pub struct Dispatcher {
    api: ApiClient,
    session: SessionStore,
}

impl Dispatcher {
    pub fn new(api: ApiClient, session: SessionStore) -> Self {
        Self { api, session }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Performs one request: request action, one API call, one outcome
    /// action (dropped if superseded).
    pub async fn run(&self, store: &mut Store, request: Request) {
        let kind = request.kind();
        log::debug!("running request: {:?}", kind);

        let generation = store.begin(kind, request.begin_action());
        let outcome = self.execute(request).await;

        if store.complete(kind, generation, outcome.action.clone()) {
            self.apply_session_effects(&outcome.action);
        }
        if outcome.unauthorized {
            self.expire_session(store);
        }
    }

    /// Revokes every grant currently given to `email`: refreshes the
    /// granted view, then issues one delete call per granted record,
    /// sequentially. There is no rollback; a failed deletion leaves the
    /// earlier ones in place and its message on the sharing slice.
    /// Returns the number of delete calls issued.
    pub async fn revoke_all(&self, store: &mut Store, email: &str) -> usize {
        self.run(store, Request::FetchSharedByMe).await;

        let record_ids = store.sharing.granted_record_ids(email);
        let issued = record_ids.len();
        for password_record_id in record_ids {
            self.run(
                store,
                Request::DeleteShare(DeleteShareRequest {
                    email: email.to_string(),
                    password_record_id,
                }),
            )
            .await;
        }
        issued
    }

    /// The exhaustive request-to-call mapping. Each arm performs exactly
    /// one HTTP call and translates the result into one action; failures
    /// carry only the error's message string.
    async fn execute(&self, request: Request) -> Outcome {
        match request {
            Request::Login(body) => match self.api.login(&body).await {
                Ok(response) => Outcome::ok(Action::Auth(AuthAction::LoginSuccess(response))),
                Err(e) => Outcome::err(&e, Action::Auth(AuthAction::LoginFailure(e.message()))),
            },
            Request::Register(body) => match self.api.register(&body).await {
                Ok(response) => Outcome::ok(Action::Auth(AuthAction::RegisterSuccess(response))),
                Err(e) => Outcome::err(&e, Action::Auth(AuthAction::RegisterFailure(e.message()))),
            },
            Request::Logout => match self.api.logout().await {
                Ok(()) => Outcome::ok(Action::Auth(AuthAction::LogoutSuccess)),
                Err(e) => Outcome::err(&e, Action::Auth(AuthAction::LogoutFailure(e.message()))),
            },
            Request::UpdateProfile(body) => match self.api.update_profile(&body).await {
                Ok(user) => Outcome::ok(Action::Auth(AuthAction::UpdateProfileSuccess(user))),
                Err(e) => {
                    Outcome::err(&e, Action::Auth(AuthAction::UpdateProfileFailure(e.message())))
                }
            },
            Request::DeleteAccount => match self.api.delete_account().await {
                Ok(()) => Outcome::ok(Action::Auth(AuthAction::DeleteAccountSuccess)),
                Err(e) => {
                    Outcome::err(&e, Action::Auth(AuthAction::DeleteAccountFailure(e.message())))
                }
            },
            Request::FetchRecords(filter) => match self.api.fetch_records(&filter).await {
                Ok(response) => Outcome::ok(Action::Records(RecordsAction::FetchAllSuccess(response))),
                Err(e) => {
                    Outcome::err(&e, Action::Records(RecordsAction::FetchAllFailure(e.message())))
                }
            },
            Request::FetchRecord(id) => match self.api.fetch_record(id).await {
                Ok(record) => Outcome::ok(Action::Records(RecordsAction::FetchOneSuccess(record))),
                Err(e) => {
                    Outcome::err(&e, Action::Records(RecordsAction::FetchOneFailure(e.message())))
                }
            },
            Request::CreateRecord(body) => match self.api.create_record(&body).await {
                Ok(record) => Outcome::ok(Action::Records(RecordsAction::CreateSuccess(record))),
                Err(e) => {
                    Outcome::err(&e, Action::Records(RecordsAction::CreateFailure(e.message())))
                }
            },
            Request::UpdateRecord(id, body) => match self.api.update_record(id, &body).await {
                Ok(record) => Outcome::ok(Action::Records(RecordsAction::UpdateSuccess(record))),
                Err(e) => {
                    Outcome::err(&e, Action::Records(RecordsAction::UpdateFailure(e.message())))
                }
            },
            Request::DeleteRecord(id) => match self.api.delete_record(id).await {
                Ok(()) => Outcome::ok(Action::Records(RecordsAction::DeleteSuccess(id))),
                Err(e) => {
                    Outcome::err(&e, Action::Records(RecordsAction::DeleteFailure(e.message())))
                }
            },
            Request::FetchSharedWithMe => match self.api.shared_with_me().await {
                Ok(grants) => Outcome::ok(Action::Sharing(SharingAction::FetchWithMeSuccess(grants))),
                Err(e) => {
                    Outcome::err(&e, Action::Sharing(SharingAction::FetchWithMeFailure(e.message())))
                }
            },
            Request::FetchSharedByMe => match self.api.shared_by_me().await {
                Ok(grants) => Outcome::ok(Action::Sharing(SharingAction::FetchByMeSuccess(grants))),
                Err(e) => {
                    Outcome::err(&e, Action::Sharing(SharingAction::FetchByMeFailure(e.message())))
                }
            },
            Request::CreateShare(body) => match self.api.create_share(&body).await {
                Ok(grant) => Outcome::ok(Action::Sharing(SharingAction::CreateSuccess(grant))),
                Err(e) => {
                    Outcome::err(&e, Action::Sharing(SharingAction::CreateFailure(e.message())))
                }
            },
            Request::DeleteShare(body) => match self.api.delete_share(&body).await {
                Ok(()) => Outcome::ok(Action::Sharing(SharingAction::DeleteSuccess(body))),
                Err(e) => {
                    Outcome::err(&e, Action::Sharing(SharingAction::DeleteFailure(e.message())))
                }
            },
        }
    }

    /// Persists or clears the bearer token when an applied action changes
    /// the session.
    fn apply_session_effects(&self, action: &Action) {
        match action {
            Action::Auth(AuthAction::LoginSuccess(response))
            | Action::Auth(AuthAction::RegisterSuccess(response)) => {
                self.api.set_token(response.token.clone());
                if let Err(e) = self.session.save(&response.token) {
                    log::warn!("Failed to persist session token: {}", e);
                }
            }
            Action::Auth(AuthAction::LogoutSuccess)
            | Action::Auth(AuthAction::DeleteAccountSuccess) => {
                self.api.clear_token();
                if let Err(e) = self.session.clear() {
                    log::warn!("Failed to clear session token: {}", e);
                }
            }
            _ => {}
        }
    }

    /// Drops the session after a 401: clears the token everywhere and
    /// returns the auth machine to anonymous.
    fn expire_session(&self, store: &mut Store) {
        log::info!("Session rejected by server; clearing local session");
        self.api.clear_token();
        if let Err(e) = self.session.clear() {
            log::warn!("Failed to clear session token: {}", e);
        }
        store.dispatch(Action::Auth(AuthAction::SessionExpired));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn dispatcher_for(server: &MockServer, dir: &TempDir) -> Dispatcher {
        let api = ApiClient::new(Url::parse(&server.uri()).unwrap());
        let session = SessionStore::new(dir.path().join("session.json"));
        Dispatcher::new(api, session)
    }

    fn login_body() -> serde_json::Value {
        serde_json::json!({
            "user": {"id": 1, "email": "a@x.com", "display_name": "Alice"},
            "token": "t"
        })
    }

    #[tokio::test]
    async fn test_login_success_authenticates_and_persists_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(login_body()))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let dispatcher = dispatcher_for(&server, &dir);
        let mut store = Store::new(false);

        dispatcher
            .run(
                &mut store,
                Request::Login(LoginRequest {
                    email: "a@x.com".to_string(),
                    password: "pw".to_string(),
                }),
            )
            .await;

        assert!(store.auth.is_authenticated);
        assert_eq!(store.auth.user.as_ref().map(|u| u.id), Some(1));
        assert!(dir.path().join("session.json").exists());
    }

    #[tokio::test]
    async fn test_login_failure_carries_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(422)
                    .set_body_json(serde_json::json!({"error": "Invalid credentials"})),
            )
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let dispatcher = dispatcher_for(&server, &dir);
        let mut store = Store::new(false);

        dispatcher
            .run(
                &mut store,
                Request::Login(LoginRequest {
                    email: "a@x.com".to_string(),
                    password: "bad".to_string(),
                }),
            )
            .await;

        assert!(!store.auth.is_authenticated);
        assert_eq!(store.auth.error.as_deref(), Some("Invalid credentials"));
        assert!(!store.auth.is_loading);
    }

    #[tokio::test]
    async fn test_unauthorized_fetch_expires_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/password_records"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let dispatcher = dispatcher_for(&server, &dir);
        dispatcher.session.save("stale-token").unwrap();
        dispatcher.api.set_token("stale-token".to_string());
        let mut store = Store::new(true);

        dispatcher
            .run(&mut store, Request::FetchRecords(RecordFilter::default()))
            .await;

        assert!(!store.auth.is_authenticated);
        assert!(!dispatcher.api.has_token());
        assert_eq!(dispatcher.session.load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_logout_success_clears_persisted_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/logout"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let dispatcher = dispatcher_for(&server, &dir);
        dispatcher.session.save("t").unwrap();
        dispatcher.api.set_token("t".to_string());
        let mut store = Store::new(true);

        dispatcher.run(&mut store, Request::Logout).await;

        assert!(!store.auth.is_authenticated);
        assert!(!dispatcher.api.has_token());
        assert_eq!(dispatcher.session.load().unwrap(), None);
    }
}

//! Typed client for the passlink REST backend.
//!
//! One method per endpoint, one request per call. Authentication is a
//! bearer token attached to every request once the session is established.

use std::sync::RwLock;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::ApiError;
use crate::types::{
    DeleteShareRequest, FetchRecordsResponse, LoginRequest, LoginResponse, PasswordRecord,
    ProfileResponse, RecordFilter, RecordPayload, RegisterRequest, ShareGrant, ShareRequest,
    UpdateProfileRequest, User,
};

/// REST client for the password-record service.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    /// Bearer token for the current session, if any. Interior mutability so
    /// the client can be shared while the token changes on login/logout.
    token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            token: RwLock::new(None),
        }
    }

    pub fn with_token(base_url: Url, token: Option<String>) -> Self {
        let client = Self::new(base_url);
        if let Some(token) = token {
            client.set_token(token);
        }
        client
    }

    pub fn set_token(&self, token: String) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token);
        }
    }

    pub fn clear_token(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }

    pub fn has_token(&self) -> bool {
        self.token.read().map(|t| t.is_some()).unwrap_or(false)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.http.request(method, self.endpoint(path));
        if let Ok(guard) = self.token.read() {
            if let Some(token) = guard.as_deref() {
                builder = builder.bearer_auth(token);
            }
        }
        builder
    }

    /// Sends the request and deserializes the response body.
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let response = check_status(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Sends the request and discards the response body (204 endpoints).
    async fn send_empty(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        let response = builder.send().await?;
        check_status(response).await?;
        Ok(())
    }

    // --- Auth ---

    pub async fn login(&self, body: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.send(self.request(Method::POST, "/auth/login").json(body))
            .await
    }

    pub async fn register(&self, body: &RegisterRequest) -> Result<LoginResponse, ApiError> {
        self.send(self.request(Method::POST, "/auth/register").json(body))
            .await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.send_empty(self.request(Method::POST, "/auth/logout"))
            .await
    }

    pub async fn update_profile(&self, body: &UpdateProfileRequest) -> Result<User, ApiError> {
        let response: ProfileResponse = self
            .send(self.request(Method::PUT, "/auth/update").json(body))
            .await?;
        Ok(response.user)
    }

    pub async fn delete_account(&self) -> Result<(), ApiError> {
        self.send_empty(self.request(Method::DELETE, "/auth/delete"))
            .await
    }

    // --- Password records ---

    pub async fn fetch_records(
        &self,
        filter: &RecordFilter,
    ) -> Result<FetchRecordsResponse, ApiError> {
        let mut builder = self.request(Method::GET, "/password_records");
        if !filter.is_empty() {
            builder = builder.query(filter);
        }
        self.send(builder).await
    }

    pub async fn fetch_record(&self, id: u64) -> Result<PasswordRecord, ApiError> {
        self.send(self.request(Method::GET, &format!("/password_records/{id}")))
            .await
    }

    pub async fn create_record(&self, body: &RecordPayload) -> Result<PasswordRecord, ApiError> {
        self.send(self.request(Method::POST, "/password_records").json(body))
            .await
    }

    pub async fn update_record(
        &self,
        id: u64,
        body: &RecordPayload,
    ) -> Result<PasswordRecord, ApiError> {
        self.send(
            self.request(Method::PUT, &format!("/password_records/{id}"))
                .json(body),
        )
        .await
    }

    pub async fn delete_record(&self, id: u64) -> Result<(), ApiError> {
        self.send_empty(self.request(Method::DELETE, &format!("/password_records/{id}")))
            .await
    }

    // --- Share grants ---

    pub async fn shared_with_me(&self) -> Result<Vec<ShareGrant>, ApiError> {
        self.send(self.request(Method::GET, "/shared_password_records/shared_with_me"))
            .await
    }

    pub async fn shared_by_me(&self) -> Result<Vec<ShareGrant>, ApiError> {
        self.send(self.request(Method::GET, "/shared_password_records/shared_by_me"))
            .await
    }

    pub async fn create_share(&self, body: &ShareRequest) -> Result<ShareGrant, ApiError> {
        self.send(
            self.request(Method::POST, "/shared_password_records")
                .json(body),
        )
        .await
    }

    pub async fn delete_share(&self, body: &DeleteShareRequest) -> Result<(), ApiError> {
        self.send_empty(
            self.request(Method::DELETE, "/shared_password_records")
                .json(body),
        )
        .await
    }
}

/// Turns non-success statuses into [`ApiError::Api`], reading the body for
/// the server's message.
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::from_response(status, &body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_cleanly() {
        let client = ApiClient::new(Url::parse("http://localhost:3000").unwrap());
        assert_eq!(
            client.endpoint("/auth/login"),
            "http://localhost:3000/auth/login"
        );

        let client = ApiClient::new(Url::parse("http://localhost:3000/").unwrap());
        assert_eq!(
            client.endpoint("/password_records/7"),
            "http://localhost:3000/password_records/7"
        );
    }

    #[test]
    fn test_token_lifecycle() {
        let client = ApiClient::new(Url::parse("http://localhost:3000").unwrap());
        assert!(!client.has_token());

        client.set_token("t".to_string());
        assert!(client.has_token());

        client.clear_token();
        assert!(!client.has_token());
    }

    #[test]
    fn test_with_token_hydration() {
        let url = Url::parse("http://localhost:3000").unwrap();
        let client = ApiClient::with_token(url.clone(), Some("t".to_string()));
        assert!(client.has_token());

        let client = ApiClient::with_token(url, None);
        assert!(!client.has_token());
    }
}

//! Thin JSON-over-HTTPS client with bearer auth.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{ApiError, error_message};
use crate::messages::{AuthResponse, Listing, LoginRequest, RegisterRequest};
use crate::session::Session;

pub const DEFAULT_BASE_URL: &str = "https://localhost:7188/api/v1";

/// Connection settings for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// The development backend serves a self-signed certificate.
    pub accept_invalid_certs: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(15),
            accept_invalid_certs: false,
        }
    }
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, session: Session) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(ApiError::Connection)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Hand the session back, e.g. to persist it.
    pub fn into_session(self) -> Session {
        self.session
    }

    // --- Request plumbing ---

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, endpoint);
        let rb = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        match self.session.token() {
            Some(token) => rb.bearer_auth(token),
            None => rb,
        }
    }

    fn authed(&self, method: Method, endpoint: &str) -> Result<RequestBuilder, ApiError> {
        if !self.session.is_authenticated() {
            return Err(ApiError::NotAuthenticated);
        }
        Ok(self.request(method, endpoint))
    }

    async fn execute(&self, rb: RequestBuilder, what: &str) -> Result<Response, ApiError> {
        let resp = rb.send().await.map_err(|e| {
            warn!(request = what, error = %e, "connection failed");
            ApiError::Connection(e)
        })?;

        let status = resp.status();
        debug!(request = what, status = status.as_u16(), "api response");
        if status.is_success() {
            return Ok(resp);
        }

        let body: Value = resp.json().await.unwrap_or(Value::Null);
        let message = error_message(status.as_u16(), &body);
        warn!(request = what, status = status.as_u16(), reason = %message, "api error");
        Err(ApiError::Http {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        resp.json::<T>().await.map_err(ApiError::Decode)
    }

    /// GET a list endpoint and unwrap its envelope.
    pub(crate) async fn get_list<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        date: Option<String>,
    ) -> Result<Vec<T>, ApiError> {
        let mut rb = self.authed(Method::GET, endpoint)?;
        if let Some(date) = date {
            rb = rb.query(&[("date", date)]);
        }
        let resp = self.execute(rb, endpoint).await?;
        Ok(Self::decode::<Listing<T>>(resp).await?.into_vec())
    }

    /// Send a write request and return the HTTP status; the body is ignored.
    pub(crate) async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<u16, ApiError> {
        let mut rb = self.authed(method, endpoint)?;
        if let Some(body) = body {
            rb = rb.json(body);
        }
        let resp = self.execute(rb, endpoint).await?;
        Ok(resp.status().as_u16())
    }

    pub(crate) async fn delete(&self, endpoint: &str) -> Result<u16, ApiError> {
        self.send::<()>(Method::DELETE, endpoint, None).await
    }

    // --- Auth ---

    pub async fn login(&mut self, credentials: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let rb = self.request(Method::POST, "/user/login").json(credentials);
        let resp = self.execute(rb, "/user/login").await?;
        let auth: AuthResponse = Self::decode(resp).await?;
        self.adopt(&auth);
        Ok(auth)
    }

    pub async fn register(&mut self, data: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        let rb = self.request(Method::POST, "/User").json(data);
        let resp = self.execute(rb, "/User").await?;
        let auth: AuthResponse = Self::decode(resp).await?;
        self.adopt(&auth);
        Ok(auth)
    }

    fn adopt(&mut self, auth: &AuthResponse) {
        if let (true, Some(token)) = (auth.success, auth.token.as_deref()) {
            info!(user = auth.user.as_ref().map(|u| u.user_name.as_str()), "authenticated");
            self.session = Session::authenticated(token, auth.user.clone());
        }
    }

    /// Tell the server, then drop the session whatever it answered.
    pub async fn logout(&mut self) -> Result<(), ApiError> {
        let result = if self.session.is_authenticated() {
            self.send::<()>(Method::POST, "/user/logout", None)
                .await
                .map(|_| ())
        } else {
            Ok(())
        };
        self.session.sign_out();
        info!("signed out");
        result
    }

    /// Check the stored token with the server.
    ///
    /// A rejected token signs the session out and yields `Ok(false)`; a
    /// transport failure is returned as an error and keeps the session.
    pub async fn validate(&mut self) -> Result<bool, ApiError> {
        if !self.session.is_authenticated() {
            return Ok(false);
        }
        match self.send::<()>(Method::GET, "/user/validate", None).await {
            Ok(_) => Ok(true),
            Err(ApiError::Http { status, .. }) => {
                debug!(status, "token rejected");
                self.session.sign_out();
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let cfg = ClientConfig {
            base_url: "http://localhost:5000/api/v1/".to_string(),
            ..ClientConfig::default()
        };
        let c = ApiClient::new(&cfg, Session::Anonymous).unwrap();
        assert_eq!(c.base_url(), "http://localhost:5000/api/v1");
    }

    #[test]
    fn test_anonymous_cannot_reach_authed_endpoints() {
        let c = ApiClient::new(&ClientConfig::default(), Session::Anonymous).unwrap();
        assert!(matches!(
            c.authed(Method::GET, "/Category"),
            Err(ApiError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_bearer_header_attached() {
        let c = ApiClient::new(&ClientConfig::default(), Session::authenticated("tok", None)).unwrap();
        let req = c.authed(Method::GET, "/Category").unwrap().build().unwrap();
        assert_eq!(req.url().as_str(), "https://localhost:7188/api/v1/Category");
        assert_eq!(req.headers()["authorization"], "Bearer tok");
        assert_eq!(req.headers()["content-type"], "application/json");
    }

    #[test]
    fn test_adopt_requires_success_and_token() {
        let mut c = ApiClient::new(&ClientConfig::default(), Session::Anonymous).unwrap();
        c.adopt(&AuthResponse {
            success: true,
            token: None,
            ..AuthResponse::default()
        });
        assert!(!c.session().is_authenticated());

        c.adopt(&AuthResponse {
            success: false,
            token: Some("x".to_string()),
            ..AuthResponse::default()
        });
        assert!(!c.session().is_authenticated());

        c.adopt(&AuthResponse {
            success: true,
            token: Some("x".to_string()),
            ..AuthResponse::default()
        });
        assert_eq!(c.session().token(), Some("x"));
    }

    #[tokio::test]
    async fn test_logout_when_anonymous_is_local() {
        let mut c = ApiClient::new(&ClientConfig::default(), Session::Anonymous).unwrap();
        assert!(c.logout().await.is_ok());
        assert!(!c.validate().await.unwrap());
    }
}

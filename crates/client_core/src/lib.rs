use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, Response,
};
use shared::{
    error::ApiError,
    protocol::{LoginRequest, LoginResponse, SignupRequest, SignupResponse},
};
use tracing::{debug, info, warn};
use url::Url;

pub mod error;
pub mod session;

pub use error::{ClientError, ClientResult, FailureKind};
pub use session::{
    decode_token_claims, FileTokenStore, Landing, MemoryTokenStore, TokenStore,
    TOKEN_KEY,
};

pub const DEFAULT_API_URL: &str = "http://192.168.0.10:5000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Calls exposed by the auth API. Screens depend on this rather than on
/// [`AuthClient`] so they can be driven without a server.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse>;
    async fn signup(&self, request: SignupRequest) -> ClientResult<SignupResponse>;
}

#[derive(Debug, Clone)]
pub struct AuthClient {
    http: Client,
    base_url: Url,
}

impl AuthClient {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let mut parsed = Url::parse(base_url.trim()).map_err(|source| {
            ClientError::InvalidBaseUrl {
                url: base_url.to_string(),
                source,
            }
        })?;
        // `join` replaces the last segment unless the path ends with a slash.
        if !parsed.path().ends_with('/') {
            let path = format!("{}/", parsed.path());
            parsed.set_path(&path);
        }
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: parsed,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path)
            .map_err(|source| ClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                source,
            })
    }
}

#[async_trait]
impl AuthApi for AuthClient {
    async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let url = self.endpoint("login")?;
        debug!(%url, email, "auth: login request");
        let response = self
            .http
            .post(url)
            .form(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;
        let body = ensure_success(response).await?.text().await?;
        let login: LoginResponse = serde_json::from_str(&body)?;
        info!(email, "auth: login accepted");
        Ok(login)
    }

    async fn signup(&self, request: SignupRequest) -> ClientResult<SignupResponse> {
        let url = self.endpoint("signup")?;
        debug!(%url, email = %request.email, restaurant = request.restaurant, "auth: signup request");

        let mut form = Form::new();
        for (name, value) in request.text_fields() {
            form = form.text(name, value);
        }
        if let Some(image) = request.image {
            let mut part = Part::bytes(image.bytes).file_name(image.filename);
            if let Some(mime) = image.mime_type.as_deref() {
                part = part.mime_str(mime)?;
            }
            form = form.part("image", part);
        }

        let response = self.http.post(url).multipart(form).send().await?;
        let body = ensure_success(response).await?.text().await?;
        if body.trim().is_empty() {
            return Ok(SignupResponse::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

async fn ensure_success(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let raw = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ApiError>(&raw) {
        Ok(api_error) if !api_error.message.is_empty() => api_error.message,
        _ => raw,
    };
    warn!(status = status.as_u16(), %message, "auth: request rejected");
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

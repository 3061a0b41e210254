use std::sync::Mutex;

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use client_core::{AuthApi, ClientError, ClientResult};
use shared::protocol::{LoginResponse, SignupRequest, SignupResponse};

pub fn token_for(email: &str, restaurant: bool) -> String {
    token_with_payload(&serde_json::json!({
        "sub": "1",
        "email": email,
        "restaurant": restaurant,
        "exp": 4_102_444_800_i64,
    }))
}

pub fn token_with_payload(payload: &serde_json::Value) -> String {
    format!(
        "{}.{}.sig",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(payload.to_string())
    )
}

pub enum LoginReply {
    Token(String),
    Fail(fn() -> ClientError),
}

pub struct FakeAuth {
    login_reply: LoginReply,
    signup_fails: bool,
    pub signups: Mutex<Vec<SignupRequest>>,
    pub logins: Mutex<Vec<(String, String)>>,
}

impl FakeAuth {
    pub fn answering(login_reply: LoginReply) -> Self {
        Self {
            login_reply,
            signup_fails: false,
            signups: Mutex::new(Vec::new()),
            logins: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_signup() -> Self {
        let mut fake = Self::answering(LoginReply::Fail(unauthorized));
        fake.signup_fails = true;
        fake
    }
}

pub fn unauthorized() -> ClientError {
    ClientError::Status {
        status: 401,
        message: "invalid credentials".to_string(),
    }
}

#[async_trait]
impl AuthApi for FakeAuth {
    async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        self.logins
            .lock()
            .expect("lock")
            .push((email.to_string(), password.to_string()));
        match &self.login_reply {
            LoginReply::Token(token) => Ok(LoginResponse {
                token: token.clone(),
            }),
            LoginReply::Fail(make) => Err(make()),
        }
    }

    async fn signup(&self, request: SignupRequest) -> ClientResult<SignupResponse> {
        if self.signup_fails {
            return Err(ClientError::Status {
                status: 409,
                message: "email already registered".to_string(),
            });
        }
        let email = request.email.clone();
        self.signups.lock().expect("lock").push(request);
        Ok(serde_json::json!({ "created": email }))
    }
}

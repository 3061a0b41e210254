//! Login flow: call the API, keep the token, pick the landing screen.

use client_core::{
    decode_token_claims, AuthApi, ClientResult, FailureKind, Landing, TokenStore, TOKEN_KEY,
};
use tracing::{debug, error, info};

use crate::alert::Alert;

pub const LOGIN_SUCCESS_MESSAGE: &str = "Login realizado com sucesso!";
pub const LOGIN_FAILURE_MESSAGE: &str = "Email ou senha inválidos";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub alert: Alert,
    /// Where to navigate; `None` when the login failed.
    pub landing: Option<Landing>,
    /// Cause of a failure, for callers that want more than the alert.
    pub failure: Option<FailureKind>,
}

pub struct LoginScreen<A, S> {
    api: A,
    store: S,
    email: String,
    password: String,
    show_password: bool,
}

impl<A: AuthApi, S: TokenStore> LoginScreen<A, S> {
    pub fn new(api: A, store: S) -> Self {
        Self {
            api,
            store,
            email: String::new(),
            password: String::new(),
            show_password: false,
        }
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn toggle_password_visibility(&mut self) -> bool {
        self.show_password = !self.show_password;
        self.show_password
    }

    pub fn is_password_visible(&self) -> bool {
        self.show_password
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Every failure ends in the same alert; the detail only goes to the log.
    pub async fn submit(&self) -> LoginOutcome {
        debug!(email = %self.email, "login: submitting");
        match self.try_login().await {
            Ok(landing) => {
                info!(email = %self.email, ?landing, "login: succeeded");
                LoginOutcome {
                    alert: Alert::new(LOGIN_SUCCESS_MESSAGE),
                    landing: Some(landing),
                    failure: None,
                }
            }
            Err(err) => {
                let kind = err.kind();
                error!(email = %self.email, ?kind, error = %err, "login: failed");
                LoginOutcome {
                    alert: Alert::error(LOGIN_FAILURE_MESSAGE),
                    landing: None,
                    failure: Some(kind),
                }
            }
        }
    }

    async fn try_login(&self) -> ClientResult<Landing> {
        let response = self.api.login(&self.email, &self.password).await?;
        self.store.set(TOKEN_KEY, &response.token).await?;
        let claims = decode_token_claims(&response.token)?;
        Ok(Landing::for_claims(&claims))
    }
}

#[cfg(test)]
#[path = "tests/login_tests.rs"]
mod tests;

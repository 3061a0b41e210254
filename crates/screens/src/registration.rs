//! Sign-up form shared by end-user and restaurant registration.

use std::{collections::BTreeMap, fmt, sync::OnceLock};

use client_core::{AuthApi, ClientError};
use regex::Regex;
use shared::protocol::{SignupImage, SignupRequest, SignupResponse};
use thiserror::Error;
use tracing::{error, info};

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
    Password,
    ConfirmPassword,
}

impl Field {
    pub fn placeholder(self) -> &'static str {
        match self {
            Field::FirstName => "Nome",
            Field::LastName => "Sobrenome",
            Field::Email => "E-mail",
            Field::Phone => "Telefone",
            Field::Password => "Senha",
            Field::ConfirmPassword => "Confirmar senha",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.placeholder())
    }
}

pub type FieldErrors = BTreeMap<Field, &'static str>;

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("form has {} invalid field(s)", .0.len())]
    Invalid(FieldErrors),
    #[error(transparent)]
    Api(#[from] ClientError),
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"))
}

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    values: BTreeMap<Field, String>,
    errors: FieldErrors,
}

impl SignupForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or_default()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Updates a field and clears the error shown under it.
    pub fn handle_change(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
        self.errors.remove(&field);
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if self.value(Field::FirstName).is_empty() {
            errors.insert(Field::FirstName, "Nome é obrigatório");
        }
        if self.value(Field::LastName).is_empty() {
            errors.insert(Field::LastName, "Sobrenome é obrigatório");
        }

        let email = self.value(Field::Email);
        if email.is_empty() {
            errors.insert(Field::Email, "E-mail é obrigatório");
        } else if !email_pattern().is_match(email) {
            errors.insert(Field::Email, "E-mail inválido");
        }

        if self.value(Field::Phone).is_empty() {
            errors.insert(Field::Phone, "Telefone é obrigatório");
        }

        let password = self.value(Field::Password);
        if password.is_empty() {
            errors.insert(Field::Password, "Senha é obrigatória");
        } else if password.chars().count() < MIN_PASSWORD_LEN {
            errors.insert(Field::Password, "Senha deve ter pelo menos 6 caracteres");
        }
        if password != self.value(Field::ConfirmPassword) {
            errors.insert(Field::ConfirmPassword, "Senhas não conferem");
        }

        errors
    }

    /// Validates and keeps the errors for display. On success the form is
    /// turned into the signup payload.
    pub fn to_signup_request(
        &mut self,
        restaurant: bool,
        image: Option<SignupImage>,
    ) -> Result<SignupRequest, RegistrationError> {
        let errors = self.validate();
        if !errors.is_empty() {
            self.errors = errors.clone();
            return Err(RegistrationError::Invalid(errors));
        }

        Ok(SignupRequest {
            email: self.value(Field::Email).to_string(),
            password: self.value(Field::Password).to_string(),
            name: format!(
                "{} {}",
                self.value(Field::FirstName).trim(),
                self.value(Field::LastName).trim()
            ),
            phone: self.value(Field::Phone).to_string(),
            restaurant,
            image,
        })
    }

    pub async fn submit<A: AuthApi + ?Sized>(
        &mut self,
        api: &A,
        restaurant: bool,
        image: Option<SignupImage>,
    ) -> Result<SignupResponse, RegistrationError> {
        let request = self.to_signup_request(restaurant, image)?;
        let email = request.email.clone();
        match api.signup(request).await {
            Ok(response) => {
                info!(%email, restaurant, "registration: account created");
                Ok(response)
            }
            Err(err) => {
                error!(%email, kind = ?err.kind(), error = %err, "registration: signup failed");
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/registration_tests.rs"]
mod tests;

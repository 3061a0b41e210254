use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Form-encoded body of `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Payload carried by the token returned from `/login`. Only `restaurant`
/// drives behavior; the other claims are kept as sent, whatever their type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,
    #[serde(default, deserialize_with = "truthy")]
    pub restaurant: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<Value>,
}

impl TokenClaims {
    pub fn email(&self) -> Option<&str> {
        self.email.as_ref().and_then(Value::as_str)
    }
}

/// Reads a claim the way a JavaScript `if` would: `null`, `false`, `0`,
/// `NaN` and `""` are false, everything else is true.
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(flag) => flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupImage {
    pub filename: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Fields of the multipart `POST /signup` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub phone: String,
    pub restaurant: bool,
    pub image: Option<SignupImage>,
}

impl SignupRequest {
    /// Text parts in the order they are appended to the form.
    pub fn text_fields(&self) -> [(&'static str, String); 5] {
        [
            ("email", self.email.clone()),
            ("password", self.password.clone()),
            ("name", self.name.clone()),
            ("phone", self.phone.clone()),
            ("restaurant", self.restaurant.to_string()),
        ]
    }
}

/// The signup endpoint's answer is passed through untouched.
pub type SignupResponse = serde_json::Value;

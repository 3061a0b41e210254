//! Token handling after a successful login: payload decoding, landing
//! selection and the key/value store the token is kept in.

use std::{
    collections::HashMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use shared::protocol::TokenClaims;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{ClientError, ClientResult};

pub const TOKEN_KEY: &str = "token";

/// Decodes the payload segment of a JWT. The signature is not verified and
/// no claim other than `restaurant` is interpreted.
pub fn decode_token_claims(token: &str) -> ClientResult<TokenClaims> {
    let payload = token
        .split('.')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| ClientError::MalformedToken("missing payload segment".into()))?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| ClientError::MalformedToken(format!("payload is not base64url: {e}")))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| ClientError::MalformedToken(format!("payload is not valid claims: {e}")))
}

/// Screen the app moves to after login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    RestaurantHome,
    UserMenu,
}

impl Landing {
    pub fn for_claims(claims: &TokenClaims) -> Self {
        if claims.restaurant {
            Landing::RestaurantHome
        } else {
            Landing::UserMenu
        }
    }
}

#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn set(&self, key: &str, value: &str) -> ClientResult<()>;
    async fn get(&self, key: &str) -> ClientResult<Option<String>>;
    async fn remove(&self, key: &str) -> ClientResult<()>;
}

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn remove(&self, key: &str) -> ClientResult<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

/// Keeps entries as a JSON object in a single file.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> ClientResult<HashMap<String, String>> {
        match tokio::fs::read(&self.path).await {
            Ok(raw) if raw.is_empty() => Ok(HashMap::new()),
            Ok(raw) => Ok(serde_json::from_slice(&raw)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn write_all(&self, entries: &HashMap<String, String>) -> ClientResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, serde_json::to_vec_pretty(entries)?).await?;
        debug!(path = %self.path.display(), "token store: written");
        Ok(())
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let _guard = self.guard.lock().await;
        let mut entries = self.read_all().await?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries).await
    }

    async fn get(&self, key: &str) -> ClientResult<Option<String>> {
        let _guard = self.guard.lock().await;
        Ok(self.read_all().await?.remove(key))
    }

    async fn remove(&self, key: &str) -> ClientResult<()> {
        let _guard = self.guard.lock().await;
        let mut entries = self.read_all().await?;
        if entries.remove(key).is_some() {
            self.write_all(&entries).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;

//! Bearer-token session storage and the sign-in collaborator.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use mealdesk_api_types::auth::{Credentials, SignInResponse, UserProfile};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::cache::lock::{rw_read, rw_write};

use super::error::InfraError;
use super::rest::{ApiClient, ApiError, ApiRequest};

const SOURCE: &str = "infra::auth";
const SIGN_IN_PATH: &str = "auth/login";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthSession {
    pub token: String,
    pub user: Option<UserProfile>,
    #[serde(with = "time::serde::rfc3339")]
    pub signed_in_at: OffsetDateTime,
}

/// Shared token store consumed by the transport.
///
/// Lives in memory; when built with [`TokenStore::persistent`] every change
/// is mirrored to a JSON session file so later runs start signed in.
#[derive(Clone, Default)]
pub struct TokenStore {
    session: Arc<RwLock<Option<AuthSession>>>,
    path: Option<Arc<PathBuf>>,
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenStore")
            .field("signed_in", &self.token().is_some())
            .field("path", &self.path)
            .finish()
    }
}

impl TokenStore {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Store seeded with a bare token (e.g. from the environment).
    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::default();
        *rw_write(&store.session, SOURCE, "with_token") = Some(AuthSession {
            token: token.into(),
            user: None,
            signed_in_at: OffsetDateTime::now_utc(),
        });
        store
    }

    /// Store backed by `path`, loading an existing session if present.
    pub fn persistent(path: impl Into<PathBuf>) -> Result<Self, InfraError> {
        let path = path.into();
        let session = load_session(&path)?;
        Ok(Self {
            session: Arc::new(RwLock::new(session)),
            path: Some(Arc::new(path)),
        })
    }

    pub fn token(&self) -> Option<String> {
        rw_read(&self.session, SOURCE, "token")
            .as_ref()
            .map(|session| session.token.clone())
    }

    pub fn session(&self) -> Option<AuthSession> {
        rw_read(&self.session, SOURCE, "session").clone()
    }

    pub fn store(&self, session: AuthSession) -> Result<(), InfraError> {
        if let Some(path) = self.path.as_deref() {
            write_session(path, &session)?;
        }
        *rw_write(&self.session, SOURCE, "store") = Some(session);
        Ok(())
    }

    pub fn clear(&self) -> Result<(), InfraError> {
        if let Some(path) = self.path.as_deref()
            && path.exists()
        {
            fs::remove_file(path)?;
        }
        *rw_write(&self.session, SOURCE, "clear") = None;
        Ok(())
    }
}

fn load_session(path: &Path) -> Result<Option<AuthSession>, InfraError> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)?;
    match serde_json::from_str(&raw) {
        Ok(session) => Ok(Some(session)),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring unreadable session file");
            Ok(None)
        }
    }
}

fn write_session(path: &Path, session: &AuthSession) -> Result<(), InfraError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(session)
        .map_err(|err| InfraError::session_store(err.to_string()))?;
    fs::write(path, json)?;
    Ok(())
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Store(#[from] InfraError),
}

/// Exchanges credentials for a bearer token.
#[derive(Clone, Debug)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn sign_in(&self, credentials: &Credentials) -> Result<AuthSession, AuthError> {
        let request = ApiRequest::post(SIGN_IN_PATH).public().json(credentials)?;
        let response: SignInResponse = self.client.send(request).await?.into_data()?;

        let session = AuthSession {
            token: response.token,
            user: Some(response.user),
            signed_in_at: OffsetDateTime::now_utc(),
        };
        self.client.tokens().store(session.clone())?;
        info!(email = %credentials.email, "signed in");
        Ok(session)
    }

    pub fn sign_out(&self) -> Result<(), AuthError> {
        self.client.tokens().clear()?;
        info!("signed out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn session(token: &str) -> AuthSession {
        AuthSession {
            token: token.to_string(),
            user: None,
            signed_in_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn in_memory_store_round_trip() {
        let store = TokenStore::in_memory();
        assert!(store.token().is_none());
        store.store(session("t1")).expect("store");
        assert_eq!(store.token().as_deref(), Some("t1"));
        store.clear().expect("clear");
        assert!(store.session().is_none());
    }

    #[test]
    fn clones_share_the_session() {
        let store = TokenStore::in_memory();
        let other = store.clone();
        store.store(session("shared")).expect("store");
        assert_eq!(other.token().as_deref(), Some("shared"));
    }

    #[test]
    fn persistent_store_survives_reload() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("session.json");

        let store = TokenStore::persistent(&path).expect("store");
        store.store(session("saved")).expect("store");
        assert!(path.exists());

        let reloaded = TokenStore::persistent(&path).expect("reload");
        assert_eq!(reloaded.token().as_deref(), Some("saved"));

        reloaded.clear().expect("clear");
        assert!(!path.exists());
    }

    #[test]
    fn corrupt_session_file_is_ignored() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").expect("write");

        let store = TokenStore::persistent(&path).expect("store");
        assert!(store.token().is_none());
    }

    #[test]
    fn debug_output_hides_the_token() {
        let store = TokenStore::with_token("secret-token");
        let rendered = format!("{store:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("signed_in: true"));
    }
}

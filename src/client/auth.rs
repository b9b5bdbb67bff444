//! Authentication client and session persistence
//!
//! Sessions are kept in a `SessionStore` so a remembered login survives a
//! restart. A restored session is only trusted after the auth service
//! confirms its token.

use super::{build_http_client, error_message};
use crate::config::AdvisorConfig;
use crate::error::AdvisorError;
use crate::models::{AccountType, UserProfile};
use crate::Result;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Subject id used when a personal profile carries no user id
const DEFAULT_USER_ID: &str = "1";
/// Subject id used when a business profile carries no company id
const DEFAULT_COMPANY_ID: &str = "E001";

/// An authenticated login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub profile: UserProfile,
}

impl Session {
    pub fn account_type(&self) -> AccountType {
        self.profile.account_type
    }

    /// Id the backend scopes data by: user id for personal accounts, company id otherwise
    pub fn subject_id(&self) -> String {
        match self.profile.account_type {
            AccountType::Personal => self
                .profile
                .user_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| DEFAULT_USER_ID.to_string()),
            AccountType::Business => self
                .profile
                .empresa_id
                .clone()
                .unwrap_or_else(|| DEFAULT_COMPANY_ID.to_string()),
        }
    }
}

//
// ===== Session stores =====
//

/// Trait for session persistence
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self) -> Result<Option<Session>>;
    async fn save(&self, session: &Session) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}

/// Session store that forgets everything on exit
#[derive(Default)]
pub struct InMemorySessionStore {
    session: RwLock<Option<Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self) -> Result<Option<Session>> {
        Ok(self.session.read().await.clone())
    }

    async fn save(&self, session: &Session) -> Result<()> {
        *self.session.write().await = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.session.write().await = None;
        Ok(())
    }
}

/// Session store backed by a JSON file
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<Session>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let session = serde_json::from_str(&raw).map_err(|e| {
            AdvisorError::SessionStore(format!(
                "corrupt session file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(Some(session))
    }

    async fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let raw = serde_json::to_string_pretty(session)?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Pick the store the configuration asks for
pub fn session_store_from_config(config: &AdvisorConfig) -> Arc<dyn SessionStore> {
    match &config.session_file {
        Some(path) => Arc::new(FileSessionStore::new(path.clone())),
        None => Arc::new(InMemorySessionStore::new()),
    }
}

//
// ===== Auth client =====
//

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(rename = "nombre_completo")]
    pub full_name: String,
    #[serde(rename = "tipo_cuenta")]
    pub account_type: AccountType,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
    recordar_sesion: bool,
}

#[derive(Deserialize)]
struct RegisterResponse {
    perfil: UserProfile,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
    perfil: UserProfile,
}

/// Client for the authentication service
#[derive(Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
}

impl AuthClient {
    pub fn new(config: &AdvisorConfig, store: Arc<dyn SessionStore>) -> Result<Self> {
        Self::with_base_url(&config.auth_base_url, config.http_timeout, store)
    }

    pub fn with_base_url(base_url: &str, timeout: Duration, store: Arc<dyn SessionStore>) -> Result<Self> {
        Ok(Self {
            client: build_http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<UserProfile> {
        let response = self
            .client
            .post(self.url("/register"))
            .json(request)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(auth_failure(response, "Unknown error").await);
        }

        let body: RegisterResponse = response.json().await?;
        info!(username = %body.perfil.username, "Account registered");
        Ok(body.perfil)
    }

    /// Log in; a remembered session is written to the store
    pub async fn login(&self, username: &str, password: &str, remember: bool) -> Result<Session> {
        let response = self
            .client
            .post(self.url("/login"))
            .json(&LoginRequest {
                username,
                password,
                recordar_sesion: remember,
            })
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            warn!(username = %username, status = %response.status(), "Login rejected");
            return Err(auth_failure(response, "Invalid credentials").await);
        }

        let body: LoginResponse = response.json().await?;
        let session = Session {
            token: body.token,
            profile: body.perfil,
        };

        if remember {
            self.store.save(&session).await?;
        }

        info!(
            username = %session.profile.username,
            account_type = %session.account_type(),
            "Session started"
        );
        Ok(session)
    }

    /// True when the service accepts the token
    pub async fn verify_token(&self, token: &str) -> Result<bool> {
        let response = self
            .client
            .get(self.url("/verificar-token"))
            .bearer_auth(token)
            .send()
            .await?;
        Ok(response.status() == StatusCode::OK)
    }

    /// End the session locally; the server is notified on a best-effort basis
    pub async fn logout(&self, session: &Session) -> Result<()> {
        let notified = self
            .client
            .post(self.url("/logout"))
            .bearer_auth(&session.token)
            .send()
            .await;

        if let Err(e) = notified {
            warn!("Logout notification failed: {}", e);
        }

        self.store.clear().await?;
        info!(username = %session.profile.username, "Session closed");
        Ok(())
    }

    /// Load the stored session if its token still verifies; otherwise discard it
    pub async fn restore_session(&self) -> Result<Option<Session>> {
        let Some(session) = self.store.load().await? else {
            return Ok(None);
        };

        match self.verify_token(&session.token).await {
            Ok(true) => {
                info!(username = %session.profile.username, "Session restored");
                Ok(Some(session))
            }
            Ok(false) => {
                warn!(username = %session.profile.username, "Stored session expired");
                self.store.clear().await?;
                Ok(None)
            }
            Err(e) => {
                warn!("Could not verify stored session: {}", e);
                self.store.clear().await?;
                Ok(None)
            }
        }
    }
}

async fn auth_failure(response: reqwest::Response, fallback: &str) -> AdvisorError {
    let body = response.text().await.unwrap_or_default();
    AdvisorError::Auth(error_message(&body).unwrap_or_else(|| fallback.to_string()))
}

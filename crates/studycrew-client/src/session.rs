//! Session store: the signed-in user and their token.
//!
//! Failures never propagate out of `login`/`register`. They return `false`
//! and leave a message in [`SessionStore::error`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use studycrew_core::model::{AuthSession, RegisterData, User};
use studycrew_core::storage::{SessionStorage, SIGNED_IN_AT_KEY, TOKEN_KEY, USER_KEY};
use studycrew_core::traits::StudyCrewApi;
use studycrew_core::validation::{validate_login, validate_registration};

/// Holds the current identity and persists it to local storage.
pub struct SessionStore {
    api: Arc<dyn StudyCrewApi>,
    storage: Arc<dyn SessionStorage>,
    user: Option<User>,
    token: Option<String>,
    signed_in_at: Option<DateTime<Utc>>,
    error: Option<String>,
}

impl SessionStore {
    pub fn new(api: Arc<dyn StudyCrewApi>, storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            api,
            storage,
            user: None,
            token: None,
            signed_in_at: None,
            error: None,
        }
    }

    /// Restore a persisted session. Returns whether one was found.
    pub fn load(&mut self) -> bool {
        let (token, user_json, signed_in_at) = match self.read_stored() {
            Ok(Some(found)) => found,
            Ok(None) => return false,
            Err(e) => {
                warn!("failed to load stored session: {e:#}");
                return false;
            }
        };

        let user: User = match serde_json::from_str(&user_json) {
            Ok(user) => user,
            Err(e) => {
                warn!("ignoring corrupt stored user: {e}");
                return false;
            }
        };

        self.signed_in_at = signed_in_at
            .and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
            .map(|t| t.with_timezone(&Utc));
        self.api.set_token(Some(token.clone()));
        self.token = Some(token);
        self.user = Some(user);
        true
    }

    /// Sign in. On failure returns `false` and sets [`error`](Self::error).
    pub async fn login(&mut self, email: &str, password: &str) -> bool {
        self.error = None;
        if let Err(e) = validate_login(email, password) {
            self.error = Some(e.to_string());
            return false;
        }

        match self.api.sign_in(email.trim(), password).await {
            Ok(session) => self.accept(session),
            Err(e) => {
                warn!(%email, "login failed: {e}");
                self.error = Some(e.to_string());
                false
            }
        }
    }

    /// Create an account and sign in as it.
    pub async fn register(&mut self, data: RegisterData) -> bool {
        self.error = None;
        let data = data.normalized();
        if let Err(e) = validate_registration(&data) {
            self.error = Some(e.to_string());
            return false;
        }

        match self.api.register(&data).await {
            Ok(session) => self.accept(session),
            Err(e) => {
                warn!(email = %data.email, "registration failed: {e}");
                self.error = Some(e.to_string());
                false
            }
        }
    }

    /// Sign out locally. The backend is told best-effort.
    pub async fn logout(&mut self) {
        if self.token.is_some() {
            if let Err(e) = self.api.sign_out().await {
                warn!("sign-out request failed: {e}");
            }
        }
        self.discard_stored();
        self.api.set_token(None);
        self.token = None;
        self.user = None;
        self.signed_in_at = None;
        self.error = None;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn signed_in_at(&self) -> Option<DateTime<Utc>> {
        self.signed_in_at
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    pub fn api(&self) -> &Arc<dyn StudyCrewApi> {
        &self.api
    }

    fn accept(&mut self, session: AuthSession) -> bool {
        let now = Utc::now();
        if let Err(e) = self.persist(&session, now) {
            warn!("failed to persist session: {e:#}");
            self.discard_stored();
            self.api.set_token(None);
            self.token = None;
            self.user = None;
            self.signed_in_at = None;
            self.error = Some(format!("Failed to save session: {e}"));
            return false;
        }
        info!(user_id = session.user.id, "signed in");
        self.api.set_token(Some(session.token.clone()));
        self.token = Some(session.token);
        self.user = Some(session.user);
        self.signed_in_at = Some(now);
        true
    }

    /// Token, user JSON and sign-in time, if both token and user are stored.
    fn read_stored(&self) -> anyhow::Result<Option<(String, String, Option<String>)>> {
        let token = self.storage.get(TOKEN_KEY)?;
        let user = self.storage.get(USER_KEY)?;
        let signed_in_at = self.storage.get(SIGNED_IN_AT_KEY)?;
        Ok(token.zip(user).map(|(t, u)| (t, u, signed_in_at)))
    }

    /// Write the session, token last. A token on disk always belongs to the
    /// user record next to it; on failure the caller discards all keys.
    fn persist(&self, session: &AuthSession, now: DateTime<Utc>) -> anyhow::Result<()> {
        let user_json = serde_json::to_string(&session.user)?;
        self.storage.remove(TOKEN_KEY)?;
        self.storage.set(USER_KEY, &user_json)?;
        self.storage.set(SIGNED_IN_AT_KEY, &now.to_rfc3339())?;
        self.storage.set(TOKEN_KEY, &session.token)?;
        Ok(())
    }

    fn discard_stored(&self) {
        for key in [TOKEN_KEY, USER_KEY, SIGNED_IN_AT_KEY] {
            if let Err(e) = self.storage.remove(key) {
                warn!("failed to clear {key}: {e:#}");
            }
        }
    }
}

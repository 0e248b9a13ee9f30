//! Subcommand implementations.

pub mod assign;
pub mod auth;
pub mod courses;
pub mod dashboard;
pub mod init;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use studycrew_client::{load_config_from, HttpApi, SessionStore, StudyCrewConfig};
use studycrew_core::model::User;
use studycrew_core::storage::FileStorage;

/// Everything a command needs: config, API client and the restored session.
pub struct Context {
    pub config: StudyCrewConfig,
    pub api: Arc<HttpApi>,
    pub store: SessionStore,
}

impl Context {
    pub fn open(config_path: Option<PathBuf>) -> Result<Self> {
        let config = load_config_from(config_path.as_deref())?;
        let api = Arc::new(HttpApi::from_config(&config)?);
        let storage = Arc::new(FileStorage::new(config.session_dir()));
        let mut store = SessionStore::new(api.clone(), storage);
        let restored = store.load();
        tracing::debug!(base_url = %config.base_url, restored, "opened session");
        Ok(Self { config, api, store })
    }

    /// The signed-in user, or an error telling how to sign in.
    pub fn user(&self) -> Result<User> {
        self.store
            .user()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("not signed in. Run `studycrew login` first"))
    }
}

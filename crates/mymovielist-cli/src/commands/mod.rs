pub mod catalogue;
pub mod config;
pub mod list;
pub mod prompts;
pub mod review;
pub mod session;
pub mod status_ui;

use color_eyre::Result;
use movielist_api::ApiClient;
use movielist_config::{Config, PathManager, SessionStore};
use movielist_models::User;

/// Loaded configuration and paths shared by every API-backed command.
pub struct AppContext {
    pub paths: PathManager,
    pub config: Config,
}

impl AppContext {
    pub fn new(paths: PathManager, config: Config) -> Self {
        Self { paths, config }
    }

    pub fn client(&self) -> Result<ApiClient> {
        ApiClient::from_config(&self.config.api)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to create HTTP client: {}", e))
    }

    pub fn session(&self) -> Result<SessionStore> {
        let session_file = self.paths.session_file();
        let mut store = SessionStore::new(session_file.clone());
        store.load().map_err(|e| {
            color_eyre::eyre::eyre!("Failed to load session from {}: {}", session_file.display(), e)
        })?;
        Ok(store)
    }

    pub fn require_user(&self) -> Result<User> {
        self.session()?
            .user()
            .ok_or_else(|| color_eyre::eyre::eyre!("Not signed in. Run 'mymovielist sign-in' first."))
    }
}

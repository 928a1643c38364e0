pub mod config;
pub mod paths;
pub mod session;

pub use config::{ApiConfig, Config, LoggingConfig, BASE_URL_ENV};
pub use paths::{PathManager, HOME_ENV};
pub use session::SessionStore;

use crate::output::Output;
use crate::render;
use color_eyre::Result;
use movielist_config::{Config, PathManager, SessionStore, BASE_URL_ENV};
use serde_json::json;

pub async fn run_config(cmd: crate::ConfigCommands, paths: &PathManager, output: &Output) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show => show_config(paths, output),
        crate::ConfigCommands::SetBaseUrl { url } => set_base_url(paths, &url, output),
        crate::ConfigCommands::Path => {
            output.info(paths.config_file().display().to_string());
            Ok(())
        }
    }
}

fn load(paths: &PathManager) -> Result<Config> {
    let config_file = paths.config_file();
    Config::load_or_default(&config_file).map_err(|e| {
        color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e)
    })
}

fn show_config(paths: &PathManager, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    if !config_file.exists() {
        output.warn(format!(
            "Configuration file not found at {}; showing defaults",
            config_file.display()
        ));
    }
    let mut config = load(paths)?;
    let env_override = std::env::var(BASE_URL_ENV).ok();
    config.apply_base_url_override(env_override.clone());

    let mut session = SessionStore::new(paths.session_file());
    session
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load session: {}", e))?;
    let user = session.user();

    let rows = vec![
        ("Config file", config_file.display().to_string()),
        ("Base URL", config.api.base_url.clone()),
        ("API root", config.api.api_root()),
        (
            "Timeout",
            config
                .api
                .timeout_seconds
                .map_or_else(|| "none".to_string(), |s| format!("{}s", s)),
        ),
        ("Log level", config.logging.level.clone()),
        (
            "Log file",
            config
                .logging
                .file
                .as_ref()
                .map_or_else(|| "stderr".to_string(), |f| f.display().to_string()),
        ),
        (
            "Signed in as",
            user.as_ref()
                .map_or_else(|| "-".to_string(), |u| u.username.clone()),
        ),
    ];

    let value = json!({
        "config_file": config_file,
        "config": config,
        "base_url_from_env": env_override.is_some(),
        "user": user,
        "signed_in_at": session.signed_in_at(),
    });
    output.data(&value, || render::key_value_table(&rows));
    Ok(())
}

fn set_base_url(paths: &PathManager, url: &str, output: &Output) -> Result<()> {
    let mut config = load(paths)?;
    config.api.base_url = url.trim().to_string();
    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Invalid configuration: {}", e))?;

    let config_file = paths.config_file();
    config.save_to_file(&config_file).map_err(|e| {
        color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_file.display(), e)
    })?;

    output.success(format!("Base URL set to {}", config.api.base_url));
    if std::env::var(BASE_URL_ENV).is_ok() {
        output.warn(format!("{} is set and takes precedence over the config file", BASE_URL_ENV));
    }
    Ok(())
}

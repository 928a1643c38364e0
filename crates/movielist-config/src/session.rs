use anyhow::Result;
use chrono::{DateTime, Utc};
use movielist_models::User;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Default)]
struct SessionData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

/// The signed-in user, kept between CLI invocations.
pub struct SessionStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            values: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let data: SessionData = toml::from_str(&content)?;
            self.values = data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = SessionData {
            data: self.values.clone(),
        };
        let content = toml::to_string_pretty(&data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// Drop the session file entirely.
    pub fn clear(&mut self) -> Result<()> {
        self.values.clear();
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.values.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.values.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    pub fn user(&self) -> Option<User> {
        let id = self.get("user_id")?;
        let username = self.get("username")?;
        Some(User {
            id: id.clone(),
            username: username.clone(),
            email: self.get("email").cloned(),
        })
    }

    pub fn set_user(&mut self, user: &User) {
        self.set("user_id".to_string(), user.id.clone());
        self.set("username".to_string(), user.username.clone());
        match &user.email {
            Some(email) => self.set("email".to_string(), email.clone()),
            None => self.remove("email"),
        }
        self.set("signed_in_at".to_string(), Utc::now().to_rfc3339());
    }

    pub fn signed_in_at(&self) -> Option<DateTime<Utc>> {
        self.get("signed_in_at")
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }
}

use serde::{Deserialize, Serialize};

use crate::error::{require, ModelError};
use crate::wire;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct UserRecord {
    #[serde(rename = "_id", deserialize_with = "wire::object_id")]
    pub id: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
}

/// The signed-in user. Owns zero or more list entries on the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            email: None,
        }
    }
}

impl TryFrom<UserRecord> for User {
    type Error = ModelError;

    fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: require(record.id, "User", "_id")?,
            username: require(record.username, "User", "username")?,
            email: record.email,
        })
    }
}

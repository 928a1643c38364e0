use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{require, ModelError};
use crate::user::{User, UserRecord};
use crate::wire;

pub const MIN_VOTE: u8 = 1;
pub const MAX_VOTE: u8 = 10;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReviewRecord {
    #[serde(rename = "_id", deserialize_with = "wire::object_id")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(deserialize_with = "wire::date")]
    pub date: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "wire::number")]
    pub vote: Option<f64>,
    pub user: Option<UserRecord>,
    // Reviews written through `add_review` are stored flat.
    #[serde(deserialize_with = "wire::object_id")]
    pub user_id: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Review {
    pub id: Option<String>,
    pub title: String,
    pub content: String,
    pub date: Option<DateTime<Utc>>,
    pub vote: f64,
    pub author: Option<User>,
}

impl TryFrom<ReviewRecord> for Review {
    type Error = ModelError;

    fn try_from(record: ReviewRecord) -> Result<Self, Self::Error> {
        let author = match record.user {
            Some(user) => User::try_from(user).ok(),
            None => match (record.user_id, record.username) {
                (Some(id), Some(username)) => Some(User::new(id, username)),
                _ => None,
            },
        };
        Ok(Self {
            id: record.id,
            title: require(record.title, "Review", "title")?,
            content: require(record.content, "Review", "content")?,
            date: record.date,
            vote: record.vote.ok_or(ModelError::MissingField {
                entity: "Review",
                field: "vote",
            })?,
            author,
        })
    }
}

/// A review as written by the user, validated before it is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    title: String,
    content: String,
    vote: u8,
}

impl ReviewDraft {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        vote: u8,
    ) -> Result<Self, ModelError> {
        let title = require(Some(title.into()), "ReviewDraft", "title")?;
        let content = require(Some(content.into()), "ReviewDraft", "content")?;
        if !(MIN_VOTE..=MAX_VOTE).contains(&vote) {
            return Err(ModelError::InvalidField {
                entity: "ReviewDraft",
                field: "vote",
                reason: format!("must be between {} and {}, got {}", MIN_VOTE, MAX_VOTE, vote),
            });
        }
        Ok(Self {
            title: title.trim().to_string(),
            content: content.trim().to_string(),
            vote,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn vote(&self) -> u8 {
        self.vote
    }
}

use serde::{Deserialize, Serialize};

use crate::error::{require, ModelError};
use crate::movie::{MovieRecord, MovieSummary};
use crate::wire;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct TroupeRecord {
    #[serde(rename = "_id", deserialize_with = "wire::object_id")]
    pub id: Option<String>,
    pub full_name: Option<String>,
    pub picture: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub movies: Option<Vec<MovieRecord>>,
}

/// An actor or director. `movies` is only filled on the troupe detail endpoint.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Troupe {
    pub id: String,
    pub full_name: String,
    pub picture: Option<String>,
    pub kind: Option<String>,
    pub movies: Vec<MovieSummary>,
}

impl TryFrom<TroupeRecord> for Troupe {
    type Error = ModelError;

    fn try_from(record: TroupeRecord) -> Result<Self, Self::Error> {
        let movies = record
            .movies
            .unwrap_or_default()
            .into_iter()
            .filter_map(|m| MovieSummary::try_from(m).ok())
            .collect();
        Ok(Self {
            id: require(record.id, "Troupe", "_id")?,
            full_name: require(record.full_name, "Troupe", "full_name")?,
            picture: record.picture,
            kind: record.kind,
            movies,
        })
    }
}

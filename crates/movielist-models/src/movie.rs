use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{require, ModelError};
use crate::troupe::{Troupe, TroupeRecord};
use crate::wire;

/// Movie document exactly as the server may return it: every field optional.
///
/// Use sites convert it into [`MovieSummary`], [`MovieDetails`] or
/// [`crate::ListEntry`], each of which checks the fields it needs.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct MovieRecord {
    #[serde(rename = "_id", deserialize_with = "wire::object_id")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub poster: Option<String>,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    #[serde(deserialize_with = "wire::date")]
    pub release_date: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "wire::whole_number")]
    pub release_year: Option<i64>,
    pub genres: Option<Vec<String>>,
    pub production_companies: Option<Vec<String>>,
    pub production_countries: Option<Vec<String>>,
    pub spoken_languages: Option<Vec<String>>,
    #[serde(deserialize_with = "wire::number")]
    pub budget: Option<f64>,
    #[serde(deserialize_with = "wire::number")]
    pub revenue: Option<f64>,
    #[serde(deserialize_with = "wire::whole_number")]
    pub runtime: Option<i64>,
    #[serde(deserialize_with = "wire::number")]
    pub popularity: Option<f64>,
    pub status: Option<String>,
    #[serde(deserialize_with = "wire::whole_number")]
    pub vote_count: Option<i64>,
    #[serde(deserialize_with = "wire::number")]
    pub vote_average: Option<f64>,
    pub actors: Option<Vec<TroupeRecord>>,
    pub directors: Option<Vec<TroupeRecord>>,
    #[serde(deserialize_with = "wire::whole_number")]
    pub watched_count: Option<i64>,
    #[serde(deserialize_with = "wire::whole_number")]
    pub added_count: Option<i64>,
    #[serde(deserialize_with = "wire::flag")]
    pub watched: Option<bool>,
    #[serde(deserialize_with = "wire::flag")]
    pub favourite: Option<bool>,
}

/// What a search result row needs.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MovieSummary {
    pub id: String,
    pub title: String,
    pub poster: Option<String>,
    pub release_year: Option<i64>,
    pub vote_average: Option<f64>,
}

impl TryFrom<MovieRecord> for MovieSummary {
    type Error = ModelError;

    fn try_from(record: MovieRecord) -> Result<Self, Self::Error> {
        let release_year = release_year(&record);
        Ok(Self {
            id: require(record.id, "Movie", "_id")?,
            title: require(record.title, "Movie", "title")?,
            poster: record.poster,
            release_year,
            vote_average: record.vote_average,
        })
    }
}

/// The full detail screen of a single movie.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MovieDetails {
    pub id: String,
    pub title: String,
    pub poster: Option<String>,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub release_date: Option<DateTime<Utc>>,
    pub release_year: Option<i64>,
    pub genres: Vec<String>,
    pub runtime_minutes: Option<i64>,
    pub status: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i64>,
    pub popularity: Option<f64>,
    pub budget: Option<f64>,
    pub revenue: Option<f64>,
    pub production_companies: Vec<String>,
    pub production_countries: Vec<String>,
    pub spoken_languages: Vec<String>,
    pub actors: Vec<Troupe>,
    pub directors: Vec<Troupe>,
    pub watched_count: Option<i64>,
    pub added_count: Option<i64>,
}

impl TryFrom<MovieRecord> for MovieDetails {
    type Error = ModelError;

    fn try_from(record: MovieRecord) -> Result<Self, Self::Error> {
        let release_year = release_year(&record);
        Ok(Self {
            id: require(record.id, "Movie", "_id")?,
            title: require(record.title, "Movie", "title")?,
            poster: record.poster,
            overview: record.overview,
            tagline: record.tagline,
            release_date: record.release_date,
            release_year,
            genres: record.genres.unwrap_or_default(),
            runtime_minutes: record.runtime,
            status: record.status,
            vote_average: record.vote_average,
            vote_count: record.vote_count,
            popularity: record.popularity,
            budget: record.budget,
            revenue: record.revenue,
            production_companies: record.production_companies.unwrap_or_default(),
            production_countries: record.production_countries.unwrap_or_default(),
            spoken_languages: record.spoken_languages.unwrap_or_default(),
            actors: cast_members(record.actors),
            directors: cast_members(record.directors),
            watched_count: record.watched_count,
            added_count: record.added_count,
        })
    }
}

fn release_year(record: &MovieRecord) -> Option<i64> {
    record
        .release_year
        .or_else(|| record.release_date.map(|d| i64::from(d.year())))
}

// Cast entries without an id or name are dropped; they never fail the movie.
fn cast_members(records: Option<Vec<TroupeRecord>>) -> Vec<Troupe> {
    records
        .unwrap_or_default()
        .into_iter()
        .filter_map(|r| Troupe::try_from(r).ok())
        .collect()
}

use serde::{Deserialize, Serialize};

use crate::error::{require, ModelError};
use crate::movie::{MovieDetails, MovieRecord};

/// One movie in a user's list, with the per-user flags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListEntry {
    pub movie_id: String,
    pub title: String,
    pub poster: Option<String>,
    pub watched: bool,
    pub favourite: bool,
}

impl ListEntry {
    pub fn new(movie: &MovieRef, flags: ListFlags) -> Self {
        Self {
            movie_id: movie.id.clone(),
            title: movie.title.clone(),
            poster: movie.poster.clone(),
            watched: flags.watched(),
            favourite: flags.favourite(),
        }
    }

    pub fn set_flags(&mut self, flags: ListFlags) {
        self.watched = flags.watched();
        self.favourite = flags.favourite();
    }
}

impl TryFrom<MovieRecord> for ListEntry {
    type Error = ModelError;

    fn try_from(record: MovieRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            movie_id: require(record.id, "ListEntry", "_id")?,
            title: require(record.title, "ListEntry", "title")?,
            poster: record.poster,
            watched: record.watched.unwrap_or(false),
            favourite: record.favourite.unwrap_or(false),
        })
    }
}

/// The part of a movie needed to put it in a list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieRef {
    pub id: String,
    pub title: String,
    pub poster: Option<String>,
}

impl MovieRef {
    pub fn new(id: impl Into<String>, title: impl Into<String>, poster: Option<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            poster,
        }
    }
}

impl From<&MovieDetails> for MovieRef {
    fn from(details: &MovieDetails) -> Self {
        Self::new(details.id.clone(), details.title.clone(), details.poster.clone())
    }
}

/// `(watched, favourite)` as sent to the server. A favourite is always watched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListFlags {
    watched: bool,
    favourite: bool,
}

impl ListFlags {
    pub const TO_WATCH: ListFlags = ListFlags {
        watched: false,
        favourite: false,
    };
    pub const WATCHED: ListFlags = ListFlags {
        watched: true,
        favourite: false,
    };
    pub const FAVOURITE: ListFlags = ListFlags {
        watched: true,
        favourite: true,
    };

    pub fn new(watched: bool, favourite: bool) -> Result<Self, ModelError> {
        if favourite && !watched {
            return Err(ModelError::InvalidField {
                entity: "ListFlags",
                field: "favourite",
                reason: "a favourite movie must be watched".to_string(),
            });
        }
        Ok(Self { watched, favourite })
    }

    pub fn watched(&self) -> bool {
        self.watched
    }

    pub fn favourite(&self) -> bool {
        self.favourite
    }
}

/// The three per-user sub-lists the server can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListFilter {
    ToWatch,
    Watched,
    Favourites,
}

impl ListFilter {
    pub fn flags(&self) -> ListFlags {
        match self {
            ListFilter::ToWatch => ListFlags::TO_WATCH,
            ListFilter::Watched => ListFlags::WATCHED,
            ListFilter::Favourites => ListFlags::FAVOURITE,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ListFilter::ToWatch => "to-watch",
            ListFilter::Watched => "watched",
            ListFilter::Favourites => "favourites",
        }
    }
}

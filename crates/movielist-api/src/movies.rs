use movielist_models::{MovieDetails, MovieRecord, MovieSummary, Review, ReviewRecord};
use reqwest::Client;
use tracing::debug;

use crate::error::ApiError;
use crate::http::{fetch_many, fetch_one, segment};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// The server takes Mongo's sort direction.
    pub fn as_param(&self) -> i8 {
        match self {
            SortOrder::Ascending => 1,
            SortOrder::Descending => -1,
        }
    }
}

/// Search the catalogue by title.
pub async fn search_movies(
    client: &Client,
    api_root: &str,
    query: &str,
) -> Result<Vec<MovieSummary>, ApiError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(ApiError::InvalidRequest("search query must not be empty".to_string()));
    }
    let url = format!("{}/movies/get_movies/{}", api_root, segment(query));
    debug!(%url, "Searching movies");
    fetch_many::<MovieRecord, _>(client.get(&url), "movies/get_movies").await
}

pub async fn movies_by_genres(
    client: &Client,
    api_root: &str,
    genres: &[String],
) -> Result<Vec<MovieSummary>, ApiError> {
    if genres.is_empty() {
        return Err(ApiError::InvalidRequest("at least one genre is required".to_string()));
    }
    let url = format!("{}/movies/get_movies_by_genres", api_root);
    let params: Vec<(&str, &str)> = genres.iter().map(|g| ("genres", g.as_str())).collect();
    debug!(%url, ?genres, "Fetching movies by genres");
    fetch_many::<MovieRecord, _>(client.get(&url).query(&params), "movies/get_movies_by_genres")
        .await
}

pub async fn movies_by_release_year(
    client: &Client,
    api_root: &str,
    year: i32,
) -> Result<Vec<MovieSummary>, ApiError> {
    let url = format!("{}/movies/release_year/{}", api_root, year);
    debug!(%url, "Fetching movies by release year");
    fetch_many::<MovieRecord, _>(client.get(&url), "movies/release_year").await
}

pub async fn sort_movies(
    client: &Client,
    api_root: &str,
    field: &str,
    order: SortOrder,
) -> Result<Vec<MovieSummary>, ApiError> {
    let field = field.trim();
    if field.is_empty() {
        return Err(ApiError::InvalidRequest("sort field must not be empty".to_string()));
    }
    let url = format!("{}/movies/sort/{}/{}", api_root, segment(field), order.as_param());
    debug!(%url, "Fetching sorted movies");
    fetch_many::<MovieRecord, _>(client.get(&url), "movies/sort").await
}

pub async fn get_movie(
    client: &Client,
    api_root: &str,
    movie_id: &str,
) -> Result<MovieDetails, ApiError> {
    let url = format!("{}/movies/get_movie/{}", api_root, segment(movie_id));
    debug!(%url, "Fetching movie");
    fetch_one::<MovieRecord, _>(client.get(&url), "movies/get_movie").await
}

pub async fn movie_reviews(
    client: &Client,
    api_root: &str,
    movie_id: &str,
) -> Result<Vec<Review>, ApiError> {
    let url = format!("{}/movies/reviews/{}", api_root, segment(movie_id));
    debug!(%url, "Fetching reviews");
    fetch_many::<ReviewRecord, _>(client.get(&url), "movies/reviews").await
}

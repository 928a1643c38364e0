use async_trait::async_trait;
use movielist_config::ApiConfig;
use movielist_models::{
    ListEntry, ListFilter, ListFlags, MovieDetails, MovieRef, MovieSummary, Review, ReviewDraft,
    Troupe, User,
};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use crate::error::ApiError;
use crate::movies::{self, SortOrder};
use crate::traits::MovieStore;
use crate::troupe;
use crate::user;

/// Build the HTTP client every request goes through.
pub fn create_http_client(timeout: Option<Duration>) -> Result<Client, ApiError> {
    let mut builder =
        Client::builder().user_agent(concat!("mymovielist/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

#[derive(Clone)]
pub struct ApiClient {
    client: Arc<Client>,
    api_root: String,
}

impl ApiClient {
    /// `api_root` is the `{base_url}/api` prefix.
    pub fn new(api_root: impl Into<String>) -> Self {
        Self {
            client: Arc::new(Client::new()),
            api_root: api_root.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Ok(Self {
            client: Arc::new(create_http_client(config.timeout())?),
            api_root: config.api_root(),
        })
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    pub async fn search_movies(&self, query: &str) -> Result<Vec<MovieSummary>, ApiError> {
        movies::search_movies(&self.client, &self.api_root, query).await
    }

    pub async fn movies_by_genres(&self, genres: &[String]) -> Result<Vec<MovieSummary>, ApiError> {
        movies::movies_by_genres(&self.client, &self.api_root, genres).await
    }

    pub async fn movies_by_release_year(&self, year: i32) -> Result<Vec<MovieSummary>, ApiError> {
        movies::movies_by_release_year(&self.client, &self.api_root, year).await
    }

    pub async fn sort_movies(
        &self,
        field: &str,
        order: SortOrder,
    ) -> Result<Vec<MovieSummary>, ApiError> {
        movies::sort_movies(&self.client, &self.api_root, field, order).await
    }

    pub async fn get_movie(&self, movie_id: &str) -> Result<MovieDetails, ApiError> {
        movies::get_movie(&self.client, &self.api_root, movie_id).await
    }

    pub async fn movie_reviews(&self, movie_id: &str) -> Result<Vec<Review>, ApiError> {
        movies::movie_reviews(&self.client, &self.api_root, movie_id).await
    }

    pub async fn get_troupe(&self, troupe_id: &str) -> Result<Troupe, ApiError> {
        troupe::get_troupe(&self.client, &self.api_root, troupe_id).await
    }

    pub async fn sign_in(&self, email: &str, username: &str) -> Result<User, ApiError> {
        user::sign_in(&self.client, &self.api_root, email, username).await
    }

    pub async fn add_review(
        &self,
        movie_id: &str,
        user: &User,
        draft: &ReviewDraft,
    ) -> Result<String, ApiError> {
        user::add_review(&self.client, &self.api_root, movie_id, user, draft).await
    }

    pub async fn update_review(&self, review_id: &str, draft: &ReviewDraft) -> Result<String, ApiError> {
        user::update_review(&self.client, &self.api_root, review_id, draft).await
    }
}

#[async_trait]
impl MovieStore for ApiClient {
    async fn add_to_list(
        &self,
        user_id: &str,
        movie: &MovieRef,
        flags: ListFlags,
    ) -> Result<String, ApiError> {
        user::add_movie_to_user_list(&self.client, &self.api_root, user_id, movie, flags).await
    }

    async fn update_in_list(
        &self,
        user_id: &str,
        movie_id: &str,
        flags: ListFlags,
    ) -> Result<String, ApiError> {
        user::update_movie_in_user_list(&self.client, &self.api_root, user_id, movie_id, flags).await
    }

    async fn remove_from_list(&self, user_id: &str, movie_id: &str) -> Result<String, ApiError> {
        user::delete_movie_from_user_list(&self.client, &self.api_root, user_id, movie_id).await
    }

    async fn fetch_list(&self, user_id: &str, filter: ListFilter) -> Result<Vec<ListEntry>, ApiError> {
        user::get_movies_user_list(&self.client, &self.api_root, user_id, filter).await
    }
}

#[cfg(test)]
mod tests;
